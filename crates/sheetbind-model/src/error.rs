use thiserror::Error;

/// Schema construction errors.
///
/// Raised once when a schema is built, never during decode or encode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate column header: {0:?}")]
    DuplicateHeader(String),
    #[error("column header must not be empty (field {0:?})")]
    EmptyHeader(String),
    #[error("schema already has a dynamic column ({first:?}); cannot add {second:?}")]
    DuplicateDynamic { first: String, second: String },
    #[error("schema has no columns")]
    NoColumns,
}

/// Why a single cell failed validation or coercion.
#[derive(Debug, Error)]
pub enum CellError {
    /// Rejected by a caller-supplied validator.
    #[error("{0}")]
    Invalid(String),
    /// The raw value could not be coerced to the declared field type.
    #[error("expected {expected}, got {got}")]
    Coerce { expected: &'static str, got: String },
    /// A required cell was empty and the column has no default.
    #[error("value required but cell is empty")]
    MissingValue,
    /// `FieldValues::take` was called for a field the decoder never produced.
    #[error("no decoded value for field {0:?}")]
    MissingField(String),
}

impl CellError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn coerce(expected: &'static str, got: impl Into<String>) -> Self {
        Self::Coerce {
            expected,
            got: got.into(),
        }
    }
}

/// Record construction failure reported by `RowModel::from_fields`.
///
/// Carries the record field name; the decoder maps it back to a column
/// header before surfacing the error.
#[derive(Debug, Error)]
#[error("field {field:?}: {source}")]
pub struct BuildError {
    pub field: String,
    #[source]
    pub source: CellError,
}

impl BuildError {
    pub fn new(field: impl Into<String>, source: CellError) -> Self {
        Self {
            field: field.into(),
            source,
        }
    }
}
