//! Decoder integration tests: static columns, validators, defaults, and
//! dynamic column collection.

use std::sync::LazyLock;

use sheetbind_engine::{DecodeError, decode_rows};
use sheetbind_model::{
    BuildError, CellError, Column, DynamicColumn, FieldValues, FromValue, RowModel, RowValues,
    Schema, Value,
};

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    age: i64,
    email: Option<String>,
}

impl RowModel for User {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<User>> = LazyLock::new(|| {
            Schema::builder()
                .column(Column::new("name", "Name", |u: &User| Value::text(u.name.clone())).required())
                .column(
                    Column::new("age", "Age", |u: &User| Value::Int(u.age))
                        .with_validator(|value| i64::from_value(value).map(Value::Int)),
                )
                .column(Column::new("email", "Email", |u: &User| {
                    Value::from(u.email.clone())
                }))
                .build()
                .expect("user schema")
        });
        &SCHEMA
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, BuildError> {
        Ok(Self {
            name: fields.take("name")?,
            age: fields.take("age")?,
            email: fields.take("email")?,
        })
    }
}

#[derive(Debug)]
struct Contact {
    email: String,
}

impl RowModel for Contact {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Contact>> = LazyLock::new(|| {
            Schema::builder()
                .column(
                    Column::new("email", "Email", |c: &Contact| Value::text(c.email.clone()))
                        .required(),
                )
                .build()
                .expect("contact schema")
        });
        &SCHEMA
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, BuildError> {
        Ok(Self {
            email: fields.take("email")?,
        })
    }
}

#[derive(Debug)]
struct Forecast {
    month: String,
    extras: RowValues,
}

impl RowModel for Forecast {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Forecast>> = LazyLock::new(|| {
            Schema::builder()
                .column(
                    Column::new("month", "Month", |f: &Forecast| Value::text(f.month.clone()))
                        .required(),
                )
                .dynamic(DynamicColumn::new("extras", |f: &Forecast| f.extras.clone()))
                .build()
                .expect("forecast schema")
        });
        &SCHEMA
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, BuildError> {
        Ok(Self {
            month: fields.take("month")?,
            extras: fields.take_dynamic(),
        })
    }
}

#[derive(Debug)]
struct Plain {
    age: i64,
    note: String,
}

impl RowModel for Plain {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Plain>> = LazyLock::new(|| {
            Schema::builder()
                .column(Column::new("age", "Age", |p: &Plain| Value::Int(p.age)))
                .column(
                    Column::new("note", "Note", |p: &Plain| Value::text(p.note.clone()))
                        .with_default("n/a"),
                )
                .build()
                .expect("plain schema")
        });
        &SCHEMA
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, BuildError> {
        Ok(Self {
            age: fields.take("age")?,
            note: fields.take("note")?,
        })
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn text_row(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|cell| Value::text(*cell)).collect()
}

#[test]
fn decodes_static_columns_with_validator() {
    let users: Vec<User> = decode_rows(
        &headers(&["Name", "Age"]),
        &[text_row(&["Alice", "30"])],
        false,
    )
    .unwrap();

    assert_eq!(
        users,
        vec![User {
            name: "Alice".to_string(),
            age: 30,
            email: None,
        }]
    );
}

#[test]
fn missing_required_header_aborts() {
    let err = decode_rows::<Contact>(
        &headers(&["Name", "Age"]),
        &[text_row(&["Alice", "30"])],
        false,
    )
    .unwrap_err();

    match err {
        DecodeError::ColumnNotFound { header } => assert_eq!(header, "Email"),
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
}

#[test]
fn collects_dynamic_columns_when_enabled() {
    let forecasts: Vec<Forecast> = decode_rows(
        &headers(&["Month", "Sales Volume", "Priority"]),
        &[text_row(&["2024-01", "100", "High"])],
        true,
    )
    .unwrap();

    let extras = &forecasts[0].extras;
    assert_eq!(
        extras.get("Sales Volume"),
        Some(&Value::text("100"))
    );
    assert_eq!(extras.get("Priority"), Some(&Value::text("High")));
    assert_eq!(extras.len(), 2);
}

#[test]
fn unmatched_headers_ignored_when_dynamic_disabled() {
    let forecasts: Vec<Forecast> = decode_rows(
        &headers(&["Month", "Sales Volume", "Priority"]),
        &[text_row(&["2024-01", "100", "High"])],
        false,
    )
    .unwrap();

    assert!(forecasts[0].extras.is_empty());
}

#[test]
fn validator_failure_names_header_and_row() {
    let err = decode_rows::<User>(
        &headers(&["Name", "Age"]),
        &[text_row(&["Alice", "30"]), text_row(&["Bob", "not a number"])],
        false,
    )
    .unwrap_err();

    match err {
        DecodeError::Validation { header, row, .. } => {
            assert_eq!(header, "Age");
            assert_eq!(row, 1);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn fail_fast_reports_earliest_failing_row() {
    let err = decode_rows::<User>(
        &headers(&["Name", "Age"]),
        &[
            text_row(&["Alice", "30"]),
            text_row(&["Bob", "bad"]),
            text_row(&["Carol", "also bad"]),
        ],
        false,
    )
    .unwrap_err();

    match err {
        DecodeError::Validation { row, .. } => assert_eq!(row, 1),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn default_applies_to_empty_cell() {
    let rows = vec![vec![Value::Int(40), Value::Empty]];
    let decoded: Vec<Plain> = decode_rows(&headers(&["Age", "Note"]), &rows, false).unwrap();
    assert_eq!(decoded[0].note, "n/a");
}

#[test]
fn required_empty_cell_without_default_fails() {
    let rows = vec![vec![Value::Empty, Value::text("30")]];
    let err = decode_rows::<User>(&headers(&["Name", "Age"]), &rows, false).unwrap_err();

    match err {
        DecodeError::Validation { header, row, source } => {
            assert_eq!(header, "Name");
            assert_eq!(row, 0);
            assert!(matches!(source, CellError::MissingValue));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn first_occurrence_wins_on_duplicate_source_headers() {
    let users: Vec<User> = decode_rows(
        &headers(&["Name", "Name", "Age"]),
        &[text_row(&["First", "Second", "30"])],
        false,
    )
    .unwrap();

    assert_eq!(users[0].name, "First");
}

#[test]
fn record_construction_failure_maps_field_to_header() {
    let rows = vec![vec![Value::text("abc"), Value::text("fine")]];
    let err = decode_rows::<Plain>(&headers(&["Age", "Note"]), &rows, false).unwrap_err();

    match err {
        DecodeError::Validation { header, row, source } => {
            assert_eq!(header, "Age");
            assert_eq!(row, 0);
            assert!(matches!(source, CellError::Coerce { .. }));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn dynamic_validator_failure_wraps_like_static_ones() {
    #[derive(Debug)]
    struct Strict {
        month: String,
        extras: RowValues,
    }

    impl RowModel for Strict {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Strict>> = LazyLock::new(|| {
                Schema::builder()
                    .column(Column::new("month", "Month", |s: &Strict| {
                        Value::text(s.month.clone())
                    }))
                    .dynamic(
                        DynamicColumn::new("extras", |s: &Strict| s.extras.clone())
                            .with_validator_for("Sales", |_, value| {
                                f64::from_value(value).map(Value::Float)
                            }),
                    )
                    .build()
                    .expect("strict schema")
            });
            &SCHEMA
        }

        fn from_fields(mut fields: FieldValues) -> Result<Self, BuildError> {
            Ok(Self {
                month: fields.take("month")?,
                extras: fields.take_dynamic(),
            })
        }
    }

    let err = decode_rows::<Strict>(
        &headers(&["Month", "Sales"]),
        &[text_row(&["2024-01", "not numeric"])],
        true,
    )
    .unwrap_err();

    match err {
        DecodeError::Validation { header, row, .. } => {
            assert_eq!(header, "Sales");
            assert_eq!(row, 0);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
