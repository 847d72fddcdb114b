use crate::error::Result;
use crate::models::CoalitionTable;
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use crate::writers::batch::{create_schema, table_to_batch};
use arrow::ipc::writer::FileWriter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes Arrow IPC files (Feather v2), readable by R's `arrow` and pandas.
pub struct IpcWriter {
    batch_size: usize,
}

impl IpcWriter {
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn write_table(&self, table: &CoalitionTable, path: &Path) -> Result<()> {
        let schema = create_schema();
        let file = BufWriter::new(File::create(path)?);
        let mut writer = FileWriter::try_new(file, &schema)?;

        let mut start = 0;
        while start < table.len() {
            let end = (start + self.batch_size).min(table.len());
            writer.write(&table_to_batch(table, schema.clone(), start, end)?)?;
            start = end;
        }

        writer.finish()?;
        writer.into_inner()?.flush()?;
        Ok(())
    }
}

impl Default for IpcWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::ipc::reader::FileReader;
    use csv::StringRecord;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let row = StringRecord::from(vec![
            "10/10/2016", "10:59:06", "2016", "1", "ELEICOES", "RR", "03018", "BOA VISTA", "11",
            "PREFEITO", "PARTIDO ISOLADO", "50", "PSOL", "PARTIDO SOCIALISMO E LIBERDADE",
            "#NULO#", "-1", "PSOL", "1",
        ]);
        let table = CoalitionTable::from_rows(vec![row.clone(), row.clone(), row])?;
        let file = NamedTempFile::new()?;

        IpcWriter::new().with_batch_size(2).write_table(&table, file.path())?;

        let reader = FileReader::try_new(File::open(file.path())?, None)?;
        assert_eq!(reader.schema().fields().len(), 18);
        let rows: usize = reader
            .map(|batch| batch.map(|b| b.num_rows()))
            .collect::<std::result::Result<Vec<_>, _>>()?
            .iter()
            .sum();
        assert_eq!(rows, 3);
        Ok(())
    }
}
