use thiserror::Error;

use sheetbind_engine::{DecodeError, EncodeError};

pub type Result<T, E = SheetError> = std::result::Result<T, E>;

/// Backend-level failures: the file or byte stream itself.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read workbook: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("failed to write workbook: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("workbook contains no worksheets")]
    EmptySheet,

    #[error("sheet has no header row")]
    MissingHeader,
}

/// Everything a facade call can fail with.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Io(#[from] IoError),
}
