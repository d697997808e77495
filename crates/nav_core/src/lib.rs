pub mod backend;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod geo;
pub mod notices;
pub mod panel;
pub mod runner;
pub mod session;
pub mod sync;
pub mod systems;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
