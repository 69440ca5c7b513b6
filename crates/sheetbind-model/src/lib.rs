//! Data model for schema-driven sheet/record mapping.
//!
//! This crate defines the vocabulary the engine and I/O layers share:
//!
//! - **value**: raw cell values and declared-type coercion
//! - **schema**: static/dynamic column declarations and the schema builder
//! - **style**: per-cell conditional formatting decisions and color presets
//! - **record**: the [`RowModel`] seam through which record instances are built
//! - **error**: schema, cell, and record-construction errors

pub mod error;
pub mod record;
pub mod schema;
pub mod style;
pub mod value;

pub use error::{BuildError, CellError, SchemaError};
pub use record::{FieldValues, RowModel};
pub use schema::{Column, DynamicColumn, Schema, SchemaBuilder, StyleContext, StyleFn, Validator};
pub use style::{Color, Style, colors};
pub use value::{FromValue, RowValues, TypeTag, Value};
