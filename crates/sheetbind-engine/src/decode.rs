//! Row decoding: header row + data rows into validated record instances.

use indexmap::IndexMap;
use tracing::debug;

use sheetbind_model::{CellError, FieldValues, RowModel, RowValues, Value};

use crate::dynamic;
use crate::error::DecodeError;

/// Decode `data_rows` under `header_row` into records of type `R`.
///
/// Fail-fast across the whole batch: the first failing row or column aborts
/// the call and nothing is returned. With `dynamic_columns` disabled, headers
/// not declared in the schema are silently ignored. Row indices in errors are
/// zero-based over `data_rows` (the header row is not counted).
pub fn decode_rows<R: RowModel>(
    header_row: &[String],
    data_rows: &[Vec<Value>],
    dynamic_columns: bool,
) -> Result<Vec<R>, DecodeError> {
    let schema = R::schema();

    // Header -> column index; first occurrence wins on duplicate headers.
    let mut index: IndexMap<&str, usize> = IndexMap::with_capacity(header_row.len());
    for (col, header) in header_row.iter().enumerate() {
        index.entry(header.as_str()).or_insert(col);
    }

    for column in schema.static_columns() {
        if column.is_required() && !index.contains_key(column.header()) {
            return Err(DecodeError::ColumnNotFound {
                header: column.header().to_string(),
            });
        }
    }

    let leftovers = if dynamic_columns && schema.dynamic_column().is_some() {
        dynamic::leftover_headers(header_row, schema)
    } else {
        Vec::new()
    };
    debug!(
        rows = data_rows.len(),
        static_columns = schema.static_columns().len(),
        dynamic_headers = leftovers.len(),
        "decoding rows"
    );

    let mut records = Vec::with_capacity(data_rows.len());
    for (row_idx, row) in data_rows.iter().enumerate() {
        let mut fields = FieldValues::new();

        for column in schema.static_columns() {
            let raw = index
                .get(column.header())
                .and_then(|&col| row.get(col))
                .cloned()
                .unwrap_or(Value::Empty);
            let mut value = if raw.is_empty() {
                column.default_value().cloned().unwrap_or(Value::Empty)
            } else {
                raw
            };
            if column.is_required() && value.is_empty() {
                return Err(DecodeError::validation(
                    column.header(),
                    row_idx,
                    CellError::MissingValue,
                ));
            }
            if let Some(validator) = column.validator() {
                value = validator
                    .apply(column.header(), value)
                    .map_err(|source| DecodeError::validation(column.header(), row_idx, source))?;
            }
            fields.insert(column.field(), value);
        }

        if let Some(column) = schema.dynamic_column().filter(|_| dynamic_columns) {
            let mut map = RowValues::with_capacity(leftovers.len());
            for &header in &leftovers {
                let raw = index
                    .get(header)
                    .and_then(|&col| row.get(col))
                    .cloned()
                    .unwrap_or(Value::Empty);
                let value = dynamic::validate_cell(column, header, raw)
                    .map_err(|source| DecodeError::validation(header, row_idx, source))?;
                map.insert(header.to_string(), value);
            }
            fields.set_dynamic(map);
        }

        // Record construction performs its own declared-type coercion and
        // surfaces as the same validation category.
        let record = R::from_fields(fields).map_err(|err| {
            let header = schema
                .header_for(&err.field)
                .unwrap_or(err.field.as_str())
                .to_string();
            DecodeError::Validation {
                header,
                row: row_idx,
                source: err.source,
            }
        })?;
        records.push(record);
    }

    Ok(records)
}
