// Re-export the fake store
pub mod fakes;
pub use fakes::FakeGraphStore;

#[cfg(feature = "mocks")]
pub mod mocks;

#[cfg(feature = "mocks")]
pub use mocks::MockGraphStore;
