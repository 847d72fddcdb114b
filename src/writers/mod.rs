pub mod batch;
pub mod ipc_writer;
pub mod parquet_writer;

pub use ipc_writer::IpcWriter;
pub use parquet_writer::{ColumnInfo, FileInfo, ParquetWriter};

use crate::error::{LegendError, Result};
use crate::models::CoalitionTable;
use crate::utils::constants::{ARROW_EXTENSION, PARQUET_EXTENSION};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Write `table` as `<base_name>.parquet` and `<base_name>.arrow` under `output_dir`.
///
/// Any write failure is reported as an export error naming the file.
pub fn export(
    table: &CoalitionTable,
    base_name: &str,
    output_dir: &Path,
    compression: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| LegendError::export(output_dir, e))?;

    let parquet_writer = ParquetWriter::new().with_compression(compression)?;
    let parquet_path = output_dir.join(format!("{}.{}", base_name, PARQUET_EXTENSION));
    if let Err(e) = parquet_writer.write_table(table, &parquet_path) {
        remove_partial(&[parquet_path.as_path()]);
        return Err(LegendError::export(&parquet_path, e));
    }

    let arrow_path = output_dir.join(format!("{}.{}", base_name, ARROW_EXTENSION));
    if let Err(e) = IpcWriter::new().write_table(table, &arrow_path) {
        remove_partial(&[parquet_path.as_path(), arrow_path.as_path()]);
        return Err(LegendError::export(&arrow_path, e));
    }

    info!(
        rows = table.len(),
        parquet = %parquet_path.display(),
        arrow = %arrow_path.display(),
        "exported coalition table"
    );
    Ok(vec![parquet_path, arrow_path])
}

/// A failed export leaves neither file of the pair behind.
fn remove_partial(paths: &[&Path]) {
    for path in paths {
        if path.is_file() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove partial export");
            }
        }
    }
}
