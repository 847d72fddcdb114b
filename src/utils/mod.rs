pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{archive_file_name, archive_url, export_base_name, is_source_file_for};
pub use progress::ProgressReporter;
