pub mod batch_runner;
pub mod key_rotator;

pub use batch_runner::BatchRunner;
pub use key_rotator::KeyRotator;
