use crate::error::{LegendError, Result};
use crate::models::CoalitionTable;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use crate::writers::batch::{create_schema, table_to_batch, LABEL_METADATA_KEY};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;

/// Map a compression name (`snappy`, `gzip`, `lz4`, `zstd`, `none`) to its codec.
pub fn parse_compression(name: &str) -> Option<Compression> {
    match name.trim().to_lowercase().as_str() {
        COMPRESSION_SNAPPY => Some(Compression::SNAPPY),
        COMPRESSION_GZIP => Some(Compression::GZIP(GzipLevel::default())),
        COMPRESSION_LZ4 => Some(Compression::LZ4),
        COMPRESSION_ZSTD => Some(Compression::ZSTD(ZstdLevel::default())),
        COMPRESSION_NONE => Some(Compression::UNCOMPRESSED),
        _ => None,
    }
}

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = parse_compression(compression).ok_or_else(|| {
            LegendError::Config(config::ConfigError::Message(format!(
                "Unsupported compression: {}",
                compression
            )))
        })?;
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Write the table one row group at a time. An empty table still gets a schema-only file.
    pub fn write_table(&self, table: &CoalitionTable, path: &Path) -> Result<()> {
        let schema = create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        let mut start = 0;
        while start < table.len() {
            let end = (start + self.row_group_size).min(table.len());
            let batch = table_to_batch(table, schema.clone(), start, end)?;
            writer.write(&batch)?;
            start = end;
        }

        writer.close()?;
        Ok(())
    }

    /// Get information about a written Parquet file
    pub fn get_file_info(&self, path: &Path) -> Result<FileInfo> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let metadata = builder.metadata();
        let schema = builder.schema();

        let columns = schema
            .fields()
            .iter()
            .map(|f| ColumnInfo {
                name: f.name().clone(),
                data_type: f.data_type().to_string(),
                label: f.metadata().get(LABEL_METADATA_KEY).cloned(),
            })
            .collect();

        Ok(FileInfo {
            total_rows: metadata.file_metadata().num_rows(),
            row_groups: metadata.num_row_groups(),
            file_size: std::fs::metadata(path)?.len(),
            columns,
        })
    }

    /// First `limit` rows rendered as strings, in column order.
    pub fn read_sample_rows(&self, path: &Path, limit: usize) -> Result<Vec<Vec<String>>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut rows = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            for row in 0..batch.num_rows() {
                if rows.len() >= limit {
                    return Ok(rows);
                }
                let values = batch
                    .columns()
                    .iter()
                    .map(|column| array_value_to_string(column, row))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows.push(values);
            }
        }

        Ok(rows)
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub total_rows: i64,
    pub row_groups: usize,
    pub file_size: u64,
    pub columns: Vec<ColumnInfo>,
}

impl FileInfo {
    pub fn summary(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                format!(
                    "  {:<22} {:<8} {}",
                    c.name,
                    c.data_type,
                    c.label.as_deref().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "File Statistics:\n- Total rows: {}\n- Row groups: {}\n- File size: {:.2} MB\n- Columns:\n{}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / (1024.0 * 1024.0),
            columns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use tempfile::NamedTempFile;

    fn row(i: usize) -> StringRecord {
        let seq = i.to_string();
        StringRecord::from(vec![
            "10/10/2016", "10:59:06", "2016", "1", "ELEICOES", "AC", "01120", "RIO BRANCO",
            "11", "PREFEITO", "COLIGACAO", "13", "PT", "PARTIDO DOS TRABALHADORES",
            "FRENTE POPULAR", "10000000123", "PT / PC do B", seq.as_str(),
        ])
    }

    #[test]
    fn test_write_and_inspect() -> Result<()> {
        let table = CoalitionTable::from_rows((0..25).map(row).collect())?;
        let file = NamedTempFile::new()?;

        let writer = ParquetWriter::new().with_row_group_size(10);
        writer.write_table(&table, file.path())?;

        let info = writer.get_file_info(file.path())?;
        assert_eq!(info.total_rows, 25);
        assert_eq!(info.row_groups, 3);
        assert_eq!(info.columns.len(), 18);
        assert_eq!(info.columns[5].name, "SIGLA_UF");
        assert_eq!(info.columns[5].label.as_deref(), Some("Federation unit code"));
        assert!(info.summary().contains("Total rows: 25"));

        let sample = writer.read_sample_rows(file.path(), 2)?;
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[1][17], "1");
        assert_eq!(sample[0][7], "RIO BRANCO");
        Ok(())
    }

    #[test]
    fn test_empty_table_writes_schema() -> Result<()> {
        let file = NamedTempFile::new()?;
        let writer = ParquetWriter::new();
        writer.write_table(&CoalitionTable::empty(), file.path())?;

        let info = writer.get_file_info(file.path())?;
        assert_eq!(info.total_rows, 0);
        assert_eq!(info.columns.len(), 18);
        Ok(())
    }

    #[test]
    fn test_compression_options() {
        assert!(ParquetWriter::new().with_compression("ZSTD").is_ok());
        assert!(ParquetWriter::new().with_compression("none").is_ok());
        assert!(matches!(
            ParquetWriter::new().with_compression("brotli-9000"),
            Err(LegendError::Config(_))
        ));
    }
}
