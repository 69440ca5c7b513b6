//! Dynamic-column resolution.
//!
//! Pure helpers shared by the decoder and the encoder so that both agree on
//! which headers are dynamic: the decoder subtracts static headers from the
//! source header row, the encoder unions dynamic keys across records, and
//! both select validators the same way.

use indexmap::IndexSet;

use sheetbind_model::{CellError, DynamicColumn, Schema, Value};

/// Headers in `header_row` not claimed by any static column, in
/// first-seen order with duplicates dropped.
///
/// Blank header cells are skipped entirely; a data column without a header
/// is never collected as dynamic.
pub fn leftover_headers<'a, R>(header_row: &'a [String], schema: &Schema<R>) -> Vec<&'a str> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for header in header_row {
        if header.trim().is_empty() {
            continue;
        }
        if schema.column_for(header).is_none() {
            seen.insert(header.as_str());
        }
    }
    seen.into_iter().collect()
}

/// Validate one dynamic cell.
///
/// Selection order: the per-header validator registered for `header`, else
/// the column's general validator, else identity.
pub fn validate_cell<R>(
    column: &DynamicColumn<R>,
    header: &str,
    value: Value,
) -> Result<Value, CellError> {
    match column.validator_override(header).or_else(|| column.validator()) {
        Some(validator) => validator.apply(header, value),
        None => Ok(value),
    }
}

/// Union of dynamic keys across all records, first key appearance wins the
/// position.
///
/// Applies the same subtraction as [`leftover_headers`]: keys claimed by a
/// static column or blank are dropped, so the final layout never carries a
/// duplicate or empty header.
pub fn union_headers<R>(
    records: &[R],
    column: &DynamicColumn<R>,
    schema: &Schema<R>,
) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    for record in records {
        for (header, _) in column.values_of(record) {
            if header.trim().is_empty() || schema.column_for(&header).is_some() {
                continue;
            }
            seen.insert(header);
        }
    }
    seen.into_iter().collect()
}
