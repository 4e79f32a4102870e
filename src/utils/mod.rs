pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{date_partition_dir, snapshot_filename, snapshot_path};
pub use progress::ProgressReporter;
