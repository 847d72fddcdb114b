pub mod fetcher;
pub mod temp_manager;

pub use fetcher::{ArchiveSource, HttpArchiveSource, LocalArchiveSource};
pub use temp_manager::TempWorkspace;

use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Stage `year`'s archive from `source` inside `workspace` and extract it.
///
/// Returns the extracted year directory. The archive file itself is gone
/// once this returns successfully.
pub fn fetch_archive(
    source: &dyn ArchiveSource,
    workspace: &TempWorkspace,
    year: u16,
) -> Result<PathBuf> {
    let bytes = source.fetch(year, &workspace.archive_path())?;
    info!(bytes, location = %source.location(year), "archive staged");
    workspace.extract_archive()
}
