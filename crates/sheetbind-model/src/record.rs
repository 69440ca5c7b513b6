//! The record-construction seam.
//!
//! The engine never builds record instances itself: it hands a
//! [`FieldValues`] bag to [`RowModel::from_fields`], which performs
//! declared-type coercion through [`FromValue`] and may fail with a typed
//! cause. Failures surface from decode as validation errors carrying the
//! column header and row index.

use indexmap::IndexMap;

use crate::error::{BuildError, CellError};
use crate::schema::Schema;
use crate::value::{FromValue, RowValues, Value};

/// Decoded values for one row, keyed by record field name, plus the dynamic
/// header->value map when dynamic columns were enabled.
#[derive(Debug, Default)]
pub struct FieldValues {
    values: IndexMap<String, Value>,
    dynamic: RowValues,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn set_dynamic(&mut self, map: RowValues) {
        self.dynamic = map;
    }

    /// Remove and coerce the value decoded for `field`.
    pub fn take<T: FromValue>(&mut self, field: &str) -> Result<T, BuildError> {
        match self.values.shift_remove(field) {
            Some(value) => T::from_value(value).map_err(|source| BuildError::new(field, source)),
            None => Err(BuildError::new(
                field,
                CellError::MissingField(field.to_string()),
            )),
        }
    }

    /// Remove and return the dynamic header->value map.
    pub fn take_dynamic(&mut self) -> RowValues {
        std::mem::take(&mut self.dynamic)
    }

    pub fn dynamic(&self) -> &RowValues {
        &self.dynamic
    }
}

/// A record type that maps to and from one sheet row.
///
/// The `'static` bound is part of the contract: [`RowModel::schema`] hands
/// out a `&'static Schema<Self>`, which only exists for types without
/// borrowed data.
pub trait RowModel: Sized + 'static {
    /// The schema shared by every decode/encode call for this type.
    ///
    /// Implementations build it once and cache it, typically in a
    /// `std::sync::LazyLock` inside this method.
    fn schema() -> &'static Schema<Self>;

    /// Construct a record from decoded field values.
    fn from_fields(fields: FieldValues) -> Result<Self, BuildError>;
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::schema::Column;

    struct Unit;

    impl RowModel for Unit {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Unit>> = LazyLock::new(|| {
                Schema::builder()
                    .column(Column::new("id", "Id", |_: &Unit| Value::Int(0)))
                    .build()
                    .expect("unit schema")
            });
            &SCHEMA
        }

        fn from_fields(_: FieldValues) -> Result<Self, BuildError> {
            Ok(Self)
        }
    }

    // The bare trait bound must be enough to hold the schema for 'static.
    fn schema_of<R: RowModel>() -> &'static Schema<R> {
        R::schema()
    }

    #[test]
    fn schema_handle_outlives_any_caller() {
        let schema = schema_of::<Unit>();
        assert_eq!(schema.static_columns().len(), 1);
    }

    #[test]
    fn take_coerces_and_removes() {
        let mut fields = FieldValues::new();
        fields.insert("age", Value::text("30"));
        let age: i64 = fields.take("age").unwrap();
        assert_eq!(age, 30);
        // Second take sees a missing field.
        let err = fields.take::<i64>("age").unwrap_err();
        assert!(matches!(err.source, CellError::MissingField(_)));
    }

    #[test]
    fn take_reports_field_on_coercion_failure() {
        let mut fields = FieldValues::new();
        fields.insert("age", Value::text("abc"));
        let err = fields.take::<i64>("age").unwrap_err();
        assert_eq!(err.field, "age");
        assert!(matches!(err.source, CellError::Coerce { .. }));
    }

    #[test]
    fn dynamic_map_is_taken_once() {
        let mut fields = FieldValues::new();
        let mut map = RowValues::new();
        map.insert("Sales".to_string(), Value::Int(100));
        fields.set_dynamic(map);
        assert_eq!(fields.take_dynamic().len(), 1);
        assert!(fields.take_dynamic().is_empty());
    }
}
