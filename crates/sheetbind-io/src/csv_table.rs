//! Csv backend.
//!
//! Csv is a plain-text interchange path: every cell reads back as text and
//! styles plus type tags are dropped on write.

use std::io::Cursor;

use tracing::debug;

use sheetbind_engine::Encoded;
use sheetbind_model::Value;

use crate::error::IoError;
use crate::source::{SheetDestination, SheetSource};
use crate::table::Table;

/// Read a csv file or byte buffer into a raw table.
pub fn read_table(source: &SheetSource) -> Result<Table, IoError> {
    match source {
        SheetSource::Path(path) => {
            let reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(path)?;
            table_from_reader(reader)
        }
        SheetSource::Bytes(bytes) => {
            let reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(Cursor::new(bytes.as_slice()));
            table_from_reader(reader)
        }
    }
}

fn table_from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Table, IoError> {
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Err(IoError::MissingHeader),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let values: Vec<Value> = record.iter().map(field_to_value).collect();
        if values.iter().all(Value::is_empty) {
            continue;
        }
        rows.push(values);
    }
    debug!(headers = headers.len(), rows = rows.len(), "read csv table");

    Ok(Table { headers, rows })
}

fn field_to_value(field: &str) -> Value {
    if field.trim().is_empty() {
        Value::Empty
    } else {
        Value::text(field)
    }
}

/// Write encoded rows as csv. Styles cannot be carried and are ignored.
pub fn write_table(
    destination: &SheetDestination,
    encoded: &Encoded,
) -> Result<Option<Vec<u8>>, IoError> {
    match destination {
        SheetDestination::Path(path) => {
            let writer = csv::Writer::from_path(path)?;
            write_records(writer, encoded)?;
            Ok(None)
        }
        SheetDestination::Buffer => {
            let mut buffer = Vec::new();
            write_records(csv::Writer::from_writer(&mut buffer), encoded)?;
            Ok(Some(buffer))
        }
    }
}

fn write_records<W: std::io::Write>(
    mut writer: csv::Writer<W>,
    encoded: &Encoded,
) -> Result<(), IoError> {
    writer.write_record(&encoded.headers)?;
    for row in &encoded.rows {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush().map_err(IoError::Io)?;
    Ok(())
}
