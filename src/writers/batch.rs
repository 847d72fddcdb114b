use crate::error::Result;
use crate::models::coalition::parse_generation_date;
use crate::models::{CoalitionTable, ColumnKind, COLUMNS};
use arrow::array::{ArrayRef, Date32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;

pub const LABEL_METADATA_KEY: &str = "label";

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Arrow schema for the canonical layout, each field labelled with its description.
pub fn create_schema() -> Arc<Schema> {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|spec| {
            let (data_type, nullable) = match spec.kind {
                ColumnKind::Integer => (DataType::Int64, true),
                ColumnKind::Date => (DataType::Date32, true),
                ColumnKind::Text | ColumnKind::Time => (DataType::Utf8, false),
            };
            Field::new(spec.name, data_type, nullable).with_metadata(HashMap::from([(
                LABEL_METADATA_KEY.to_string(),
                spec.label.to_string(),
            )]))
        })
        .collect();

    let metadata = HashMap::from([(
        "dataset".to_string(),
        "consulta_legendas (municipal elections)".to_string(),
    )]);
    Arc::new(Schema::new(fields).with_metadata(metadata))
}

/// Convert rows `[start, end)` of `table` into a record batch.
pub fn table_to_batch(
    table: &CoalitionTable,
    schema: Arc<Schema>,
    start: usize,
    end: usize,
) -> Result<RecordBatch> {
    let rows = &table.rows()[start..end];

    let columns: Vec<ArrayRef> = COLUMNS
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let values = rows.iter().map(move |r| r.get(index).unwrap_or("").trim());
            let array: ArrayRef = match spec.kind {
                ColumnKind::Integer => Arc::new(Int64Array::from(
                    values.map(|v| v.parse::<i64>().ok()).collect::<Vec<_>>(),
                )),
                ColumnKind::Date => Arc::new(Date32Array::from(
                    values
                        .map(|v| {
                            parse_generation_date(v)
                                .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
                        })
                        .collect::<Vec<_>>(),
                )),
                ColumnKind::Text | ColumnKind::Time => Arc::new(StringArray::from(
                    rows.iter()
                        .map(|r| r.get(index).unwrap_or(""))
                        .collect::<Vec<_>>(),
                )),
            };
            array
        })
        .collect();

    Ok(RecordBatch::try_new(schema, columns)?)
}
