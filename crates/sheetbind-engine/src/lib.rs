//! Schema-driven row decode/encode engine.
//!
//! Pure, I/O-free core of the sheet/record mapping:
//!
//! - **decode**: header row + data rows into validated record instances
//! - **dynamic**: resolution of columns not declared in the schema
//! - **encode**: records into an ordered header layout, value rows, and
//!   per-cell styles
//! - **order**: merging static and dynamic ordering specs into one layout
//!
//! Schemas are read-only and shared; decode never mutates the schema, encode
//! never mutates the input records.

pub mod decode;
pub mod dynamic;
pub mod encode;
pub mod error;
pub mod order;

pub use decode::decode_rows;
pub use encode::{Encoded, column_types, encode_rows};
pub use error::{DecodeError, EncodeError};
pub use order::{ColumnOrder, DynamicOrderFn, StaticOrder, plan};
