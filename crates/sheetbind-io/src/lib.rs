//! File backends and the caller-facing facade.
//!
//! Reading goes source -> raw [`Table`] -> decoded records; writing goes
//! records -> [`sheetbind_engine::Encoded`] -> backend. The xlsx backend
//! carries styles and type tags, the csv backend drops them.

pub mod csv_table;
pub mod error;
pub mod source;
pub mod table;
pub mod xlsx;

pub use error::{IoError, Result, SheetError};
pub use source::{SheetDestination, SheetSource};
pub use table::Table;

use sheetbind_engine::{ColumnOrder, column_types, decode_rows, encode_rows};
use sheetbind_model::RowModel;

/// Decode records of type `R` from the first worksheet of an xlsx source.
pub fn read_xlsx<R: RowModel>(
    source: impl Into<SheetSource>,
    dynamic_columns: bool,
) -> Result<Vec<R>> {
    let table = xlsx::read_table(&source.into()).map_err(SheetError::Io)?;
    Ok(decode_rows(&table.headers, &table.rows, dynamic_columns)?)
}

/// Encode records to an xlsx workbook.
///
/// Returns `Some(bytes)` for [`SheetDestination::Buffer`], `None` for a path.
pub fn write_xlsx<R: RowModel>(
    records: &[R],
    destination: impl Into<SheetDestination>,
    order: Option<&ColumnOrder>,
) -> Result<Option<Vec<u8>>> {
    let encoded = encode_rows(records, order)?;
    let types = column_types::<R>(&encoded.headers);
    Ok(xlsx::write_table(&destination.into(), &encoded, &types)?)
}

/// Decode records of type `R` from a csv source. Every cell arrives as text,
/// so validators and `FromValue` coercions do the typing.
pub fn read_csv<R: RowModel>(
    source: impl Into<SheetSource>,
    dynamic_columns: bool,
) -> Result<Vec<R>> {
    let table = csv_table::read_table(&source.into()).map_err(SheetError::Io)?;
    Ok(decode_rows(&table.headers, &table.rows, dynamic_columns)?)
}

/// Encode records to csv. Styles and type tags are dropped.
pub fn write_csv<R: RowModel>(
    records: &[R],
    destination: impl Into<SheetDestination>,
    order: Option<&ColumnOrder>,
) -> Result<Option<Vec<u8>>> {
    let encoded = encode_rows(records, order)?;
    Ok(csv_table::write_table(&destination.into(), &encoded)?)
}
