use crate::error::{LegendError, Result};
use crate::models::{CoalitionTable, FederationUnit, UnitSelection};
use crate::readers::LegendReader;
use crate::utils::filename::is_source_file_for;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do when a requested unit has no source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFilePolicy {
    Skip,
    Fail,
}

impl MissingFilePolicy {
    /// Units named explicitly must exist; the `all` sentinel tolerates gaps.
    pub fn for_selection(selection: &UnitSelection) -> Self {
        if selection.is_all() {
            MissingFilePolicy::Skip
        } else {
            MissingFilePolicy::Fail
        }
    }
}

/// Concatenates per-unit source files into one coalition table.
pub struct Aggregator {
    reader: LegendReader,
    year: u16,
}

impl Aggregator {
    pub fn new(reader: LegendReader, year: u16) -> Self {
        Self { reader, year }
    }

    pub fn aggregate(
        &self,
        directory: &Path,
        units: &[FederationUnit],
        policy: MissingFilePolicy,
    ) -> Result<CoalitionTable> {
        let files = list_files(directory)?;
        debug!(count = files.len(), dir = %directory.display(), "scanned extracted files");

        let mut rows = Vec::new();
        let mut loaded = 0usize;
        for &uf in units {
            let Some(path) = self.find_source_file(&files, uf) else {
                match policy {
                    MissingFilePolicy::Skip => {
                        debug!(uf = %uf, "no source file, skipping");
                        continue;
                    }
                    MissingFilePolicy::Fail => {
                        return Err(LegendError::MissingFederationUnitFile {
                            uf: uf.code().to_string(),
                            directory: directory.to_path_buf(),
                        })
                    }
                }
            };

            let unit_rows = self.reader.read_rows(path, uf)?;
            debug!(uf = %uf, rows = unit_rows.len(), "loaded federation unit");
            rows.extend(unit_rows);
            loaded += 1;
        }

        let table = CoalitionTable::from_rows(rows)?;
        info!(units = loaded, rows = table.len(), "aggregated coalition records");
        Ok(table)
    }

    fn find_source_file<'a>(&self, files: &'a [PathBuf], uf: FederationUnit) -> Option<&'a Path> {
        let mut matches = files
            .iter()
            .filter(|p| is_source_file_for(p, self.year, uf));
        let first = matches.next()?;
        if let Some(extra) = matches.next() {
            warn!(
                uf = %uf,
                using = %first.display(),
                ignored = %extra.display(),
                "several source files match; using the first"
            );
        }
        Some(first.as_path())
    }
}

/// All regular files below `dir`, sorted by path.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
