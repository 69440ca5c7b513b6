use sheetbind_model::CellError;
use thiserror::Error;

/// Decode failures.
///
/// Decode is fail-fast: the first failing row or column aborts the whole
/// call and no partial result is returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required static header is absent from the source header row.
    #[error("required column not found: {header:?}")]
    ColumnNotFound { header: String },
    /// A validator or the record-construction step rejected a cell.
    #[error("validation failed for column {header:?} at row {row}: {source}")]
    Validation {
        header: String,
        row: usize,
        #[source]
        source: CellError,
    },
}

impl DecodeError {
    pub(crate) fn validation(header: impl Into<String>, row: usize, source: CellError) -> Self {
        Self::Validation {
            header: header.into(),
            row,
            source,
        }
    }
}

/// Encode failures, raised before any output is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cannot encode an empty record list")]
    NoRecords,
}
