//! Xlsx backend: calamine for reading, rust_xlsxwriter for writing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};

use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Color as XlsxColor, Format, Workbook, Worksheet};
use tracing::debug;

use sheetbind_engine::Encoded;
use sheetbind_model::{Style, TypeTag, Value};

use crate::error::IoError;
use crate::source::{SheetDestination, SheetSource};
use crate::table::Table;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Read the first worksheet into a raw table.
///
/// Headers are trimmed and rows with nothing but empty cells are skipped.
pub fn read_table(source: &SheetSource) -> Result<Table, IoError> {
    match source {
        SheetSource::Path(path) => {
            let workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
            table_from_workbook(workbook)
        }
        SheetSource::Bytes(bytes) => {
            let workbook = Xlsx::new(Cursor::new(bytes.as_slice()))?;
            table_from_workbook(workbook)
        }
    }
}

fn table_from_workbook<RS: Read + Seek>(mut workbook: Xlsx<RS>) -> Result<Table, IoError> {
    let range = workbook.worksheet_range_at(0).ok_or(IoError::EmptySheet)??;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or(IoError::MissingHeader)?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut data = Vec::new();
    for row in rows {
        let values: Vec<Value> = row.iter().map(cell_to_value).collect();
        if values.iter().all(Value::is_empty) {
            continue;
        }
        data.push(values);
    }
    debug!(headers = headers.len(), rows = data.len(), "read xlsx sheet");

    Ok(Table {
        headers,
        rows: data,
    })
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Value::Empty
            } else {
                Value::Text(s.clone())
            }
        }
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(Value::Float(dt.as_f64()), Value::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::text(e.to_string()),
    }
}

/// Write encoded rows to a workbook with a bold header row.
///
/// Returns the workbook bytes for a `Buffer` destination, `None` for a path.
/// Integer cells go through f64, the only number type xlsx has, so
/// magnitudes above 2^53 lose precision in the written file.
pub fn write_table(
    destination: &SheetDestination,
    encoded: &Encoded,
    types: &BTreeMap<String, TypeTag>,
) -> Result<Option<Vec<u8>>, IoError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, header) in encoded.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, (row, styles)) in encoded.rows.iter().zip(&encoded.styles).enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, (value, style)) in row.iter().zip(styles).enumerate() {
            let tag = types.get(&encoded.headers[col]).copied();
            write_cell(worksheet, row_num, col as u16, value, style.as_ref(), tag)?;
        }
    }
    debug!(
        headers = encoded.headers.len(),
        rows = encoded.rows.len(),
        "wrote xlsx sheet"
    );

    match destination {
        SheetDestination::Path(path) => {
            workbook.save(path)?;
            Ok(None)
        }
        SheetDestination::Buffer => Ok(Some(workbook.save_to_buffer()?)),
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    style: Option<&Style>,
    tag: Option<TypeTag>,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    let is_datetime = matches!(value, Value::DateTime(_));
    let format = cell_format(style, tag, is_datetime);

    match (value, format) {
        (Value::Empty, Some(format)) => {
            worksheet.write_blank(row, col, &format)?;
        }
        (Value::Empty, None) => {}
        (Value::Bool(b), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *b, &format)?;
        }
        (Value::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (Value::Int(i), Some(format)) => {
            worksheet.write_number_with_format(row, col, *i as f64, &format)?;
        }
        (Value::Int(i), None) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        (Value::Float(f), Some(format)) => {
            worksheet.write_number_with_format(row, col, *f, &format)?;
        }
        (Value::Float(f), None) => {
            worksheet.write_number(row, col, *f)?;
        }
        (Value::Text(s), Some(format)) => {
            worksheet.write_string_with_format(row, col, s, &format)?;
        }
        (Value::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (Value::DateTime(dt), Some(format)) => {
            worksheet.write_datetime_with_format(row, col, dt, &format)?;
        }
        // cell_format always emits a format for datetimes, this arm is for
        // exhaustiveness only.
        (Value::DateTime(dt), None) => {
            worksheet.write_datetime_with_format(
                row,
                col,
                dt,
                &Format::new().set_num_format(DATETIME_FORMAT),
            )?;
        }
    }
    Ok(())
}

/// Merge an optional per-cell style with the column's type tag.
fn cell_format(style: Option<&Style>, tag: Option<TypeTag>, is_datetime: bool) -> Option<Format> {
    let mut format = Format::new();
    let mut used = false;

    if let Some(style) = style {
        if let Some(color) = style.fill {
            format = format.set_background_color(XlsxColor::RGB(color.0));
            used = true;
        }
        if let Some(color) = style.font {
            format = format.set_font_color(XlsxColor::RGB(color.0));
            used = true;
        }
        if style.bold {
            format = format.set_bold();
            used = true;
        }
        if style.italic {
            format = format.set_italic();
            used = true;
        }
    }
    if is_datetime || tag == Some(TypeTag::Date) {
        format = format.set_num_format(DATETIME_FORMAT);
        used = true;
    }

    used.then_some(format)
}
