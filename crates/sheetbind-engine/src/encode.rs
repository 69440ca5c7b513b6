//! Row encoding: record instances into an ordered header list, value rows,
//! and per-cell style rows.

use std::collections::BTreeMap;

use tracing::debug;

use sheetbind_model::{Column, RowModel, RowValues, Style, StyleContext, TypeTag, Value};

use crate::dynamic;
use crate::error::EncodeError;
use crate::order::{self, ColumnOrder};

/// Encoded output: one shared header layout, then per-record value and style
/// rows aligned to it.
#[derive(Debug)]
pub struct Encoded {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub styles: Vec<Vec<Option<Style>>>,
}

/// What a final header resolves to.
enum Slot<'a, R> {
    Static(&'a Column<R>),
    Dynamic,
}

const EMPTY_CELL: Value = Value::Empty;

/// Encode `records` into headers, rows, and styles.
///
/// Three phases: dynamic-header discovery across all records, column
/// ordering, then per-record value/style extraction. The header layout is
/// fixed before any row is produced; extraction has no cross-record state.
/// No validators run here, getters are trusted.
pub fn encode_rows<R: RowModel>(
    records: &[R],
    column_order: Option<&ColumnOrder>,
) -> Result<Encoded, EncodeError> {
    if records.is_empty() {
        return Err(EncodeError::NoRecords);
    }
    let schema = R::schema();

    // Phase 1: header discovery.
    let static_headers: Vec<&str> = schema
        .static_columns()
        .iter()
        .map(|column| column.header())
        .collect();
    let dynamic_headers = match schema.dynamic_column() {
        Some(column) => dynamic::union_headers(records, column, schema),
        None => Vec::new(),
    };

    // Phase 2: ordering.
    let headers = order::plan(&static_headers, &dynamic_headers, column_order);
    debug!(
        records = records.len(),
        static_columns = static_headers.len(),
        dynamic_columns = dynamic_headers.len(),
        "encoding rows"
    );

    // plan() only emits headers from the schema or the dynamic union, so a
    // non-static header belongs to the dynamic column.
    let dynamic_column = schema.dynamic_column();
    let slots: Vec<Slot<'_, R>> = headers
        .iter()
        .map(|header| match schema.column_for(header) {
            Some(column) => Slot::Static(column),
            None => Slot::Dynamic,
        })
        .collect();

    // Phase 3: per-record extraction, independent across records.
    let mut rows = Vec::with_capacity(records.len());
    let mut styles = Vec::with_capacity(records.len());
    for (row_index, record) in records.iter().enumerate() {
        let dynamic_values = dynamic_column.map(|column| column.values_of(record));

        let mut row_values = RowValues::with_capacity(headers.len());
        for (header, slot) in headers.iter().zip(&slots) {
            let value = match slot {
                Slot::Static(column) => column.value_of(record),
                Slot::Dynamic => dynamic_values
                    .as_ref()
                    .and_then(|map| map.get(header.as_str()))
                    .cloned()
                    .unwrap_or(Value::Empty),
            };
            row_values.insert(header.clone(), value);
        }

        let mut style_row = Vec::with_capacity(headers.len());
        for (header, slot) in headers.iter().zip(&slots) {
            let context = StyleContext {
                value: row_values.get(header.as_str()).unwrap_or(&EMPTY_CELL),
                row: &row_values,
                header,
                row_index,
            };
            let style = match slot {
                Slot::Static(column) => column.style().and_then(|f| f(&context)),
                Slot::Dynamic => dynamic_column.and_then(|column| {
                    column
                        .style_override(header)
                        .or_else(|| column.style())
                        .and_then(|f| f(&context))
                }),
            };
            style_row.push(style);
        }

        rows.push(row_values.into_values().collect());
        styles.push(style_row);
    }

    Ok(Encoded {
        headers,
        rows,
        styles,
    })
}

/// Writer-side type hints for a final header layout, keyed by header.
///
/// Static columns contribute their declared tag, dynamic headers ask the
/// dynamic column's hint function; headers without a hint are absent.
pub fn column_types<R: RowModel>(headers: &[String]) -> BTreeMap<String, TypeTag> {
    let schema = R::schema();
    let mut types = BTreeMap::new();
    for header in headers {
        let tag = match schema.column_for(header) {
            Some(column) => column.type_tag(),
            None => schema
                .dynamic_column()
                .and_then(|column| column.type_hint(header)),
        };
        if let Some(tag) = tag {
            types.insert(header.clone(), tag);
        }
    }
    types
}
