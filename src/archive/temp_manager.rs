use crate::error::{LegendError, Result};
use crate::utils::filename::archive_file_name;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

/// Scoped download and extraction area for one year's archive.
///
/// Everything lives under a private temporary directory inside the
/// configured work directory; dropping the workspace removes it, so every
/// exit path after acquisition cleans up.
pub struct TempWorkspace {
    temp_dir: TempDir,
    year: u16,
    // dropped after `temp_dir`, once the parent is empty again
    created_parents: Option<CreatedDirs>,
}

/// Work directories that did not exist before this run.
struct CreatedDirs {
    leaf: PathBuf,
    top: PathBuf,
}

impl CreatedDirs {
    fn create(path: &Path) -> Result<Option<Self>> {
        let top = path
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .last();
        let created = top.map(|top| CreatedDirs {
            leaf: path.to_path_buf(),
            top: top.to_path_buf(),
        });
        fs::create_dir_all(path)?;
        Ok(created)
    }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        for dir in self.leaf.ancestors() {
            if fs::remove_dir(dir).is_err() || dir == self.top {
                break;
            }
        }
    }
}

impl TempWorkspace {
    /// Create the work area under `parent`, creating `parent` too if needed.
    ///
    /// A `parent` created here is removed again with the work area, provided
    /// nothing else was put in it.
    pub fn new(parent: &Path, year: u16) -> Result<Self> {
        let created_parents = CreatedDirs::create(parent)?;
        let temp_dir = tempfile::Builder::new()
            .prefix(&format!("legend_local_{}_", year))
            .tempdir_in(parent)
            .map_err(|e| {
                LegendError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create work area in {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;

        debug!(path = %temp_dir.path().display(), "created work area");
        Ok(Self {
            temp_dir,
            year,
            created_parents,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Where the downloaded archive is staged.
    pub fn archive_path(&self) -> PathBuf {
        self.root().join(archive_file_name(self.year))
    }

    /// Directory the archive is extracted into, named after the year.
    pub fn extracted_dir(&self) -> PathBuf {
        self.root().join(self.year.to_string())
    }

    /// Extract the staged archive into a fresh year directory, then delete the archive.
    pub fn extract_archive(&self) -> Result<PathBuf> {
        let archive_path = self.archive_path();
        let dest = self.extracted_dir();
        fs::create_dir(&dest)?;

        let file = File::open(&archive_path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| {
            LegendError::Extraction(format!("{} is not a valid zip archive: {}", archive_path.display(), e))
        })?;

        let mut extracted = 0usize;
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| LegendError::Extraction(format!("entry {}: {}", i, e)))?;

            let name = entry.name().to_string();
            let size = entry.size();
            let relative = entry.enclosed_name().map(Path::to_path_buf).ok_or_else(|| {
                LegendError::Extraction(format!("entry '{}' escapes the target directory", name))
            })?;
            let dest_path = dest.join(&relative);

            if entry.is_dir() {
                fs::create_dir_all(&dest_path)?;
                continue;
            }
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut writer = BufWriter::new(File::create(&dest_path)?);
            let written = std::io::copy(&mut entry, &mut writer)
                .map_err(|e| LegendError::Extraction(format!("reading '{}': {}", name, e)))?;
            writer.flush()?;

            if written != size {
                return Err(LegendError::Extraction(format!(
                    "'{}' extracted {} of {} bytes",
                    name, written, size
                )));
            }
            extracted += 1;
        }

        fs::remove_file(&archive_path)?;
        debug!(files = extracted, path = %dest.display(), "extracted archive");
        Ok(dest)
    }

    /// Remove the work area now, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.root().to_path_buf();
        self.temp_dir.close()?;
        drop(self.created_parents);
        debug!(path = %path.display(), "removed work area");
        Ok(())
    }
}
