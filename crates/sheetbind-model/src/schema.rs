//! Column schemas.
//!
//! A [`Schema`] is the single declaration both operations run from: decoding
//! applies validators and defaults per column, encoding applies getters and
//! style functions. Schemas are built once per record type through
//! [`SchemaBuilder`], are immutable afterwards, and are shared read-only by
//! every decode/encode call (all stored closures are `Send + Sync`).

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::error::{CellError, SchemaError};
use crate::style::Style;
use crate::value::{RowValues, TypeTag, Value};

/// Everything a style decision may look at for one cell.
pub struct StyleContext<'a> {
    /// The cell's own value.
    pub value: &'a Value,
    /// The whole row, keyed by header in final column order.
    pub row: &'a RowValues,
    /// Header of the cell's column.
    pub header: &'a str,
    /// Zero-based index of the record within the encode call.
    pub row_index: usize,
}

/// Conditional style decision for one cell.
pub type StyleFn = Box<dyn Fn(&StyleContext<'_>) -> Option<Style> + Send + Sync>;

type ValueGetter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type MapGetter<R> = Box<dyn Fn(&R) -> RowValues + Send + Sync>;
type SimpleFn = Box<dyn Fn(Value) -> Result<Value, CellError> + Send + Sync>;
type NamedFn = Box<dyn Fn(&str, Value) -> Result<Value, CellError> + Send + Sync>;
type TypeHintFn = Box<dyn Fn(&str) -> Option<TypeTag> + Send + Sync>;

/// Cell validator.
///
/// The two arms mirror the two call shapes a column can declare: static
/// columns validate the value alone, dynamic columns also receive the header
/// the value was found under. Dispatch is on the tag, never on closure arity.
pub enum Validator {
    Simple(SimpleFn),
    Named(NamedFn),
}

impl Validator {
    pub fn simple(f: impl Fn(Value) -> Result<Value, CellError> + Send + Sync + 'static) -> Self {
        Self::Simple(Box::new(f))
    }

    pub fn named(
        f: impl Fn(&str, Value) -> Result<Value, CellError> + Send + Sync + 'static,
    ) -> Self {
        Self::Named(Box::new(f))
    }

    pub fn apply(&self, header: &str, value: Value) -> Result<Value, CellError> {
        match self {
            Self::Simple(f) => f(value),
            Self::Named(f) => f(header, value),
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple(_) => f.write_str("Validator::Simple"),
            Self::Named(_) => f.write_str("Validator::Named"),
        }
    }
}

/// A column declared in the schema, always expected at a known record field.
pub struct Column<R> {
    field: &'static str,
    header: String,
    required: bool,
    default: Option<Value>,
    validator: Option<Validator>,
    getter: ValueGetter<R>,
    style: Option<StyleFn>,
    type_tag: Option<TypeTag>,
}

impl<R> Column<R> {
    /// Declare a column mapping `field` to `header`.
    ///
    /// The getter extracts the cell value from a record at encode time; Rust
    /// has no field reflection, so it is supplied here rather than inferred.
    pub fn new(
        field: &'static str,
        header: impl Into<String>,
        getter: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            header: header.into(),
            required: false,
            default: None,
            validator: None,
            getter: Box::new(getter),
            style: None,
            type_tag: None,
        }
    }

    /// The header must be present in the source at decode time.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value substituted for an empty or missing cell at decode time.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate (and possibly rewrite) the raw cell value at decode time.
    pub fn with_validator(
        mut self,
        f: impl Fn(Value) -> Result<Value, CellError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Validator::simple(f));
        self
    }

    /// Conditional style for this column's cells at encode time.
    pub fn with_style(
        mut self,
        f: impl Fn(&StyleContext<'_>) -> Option<Style> + Send + Sync + 'static,
    ) -> Self {
        self.style = Some(Box::new(f));
        self
    }

    /// Writer-side type hint for this column.
    pub fn with_type(mut self, tag: TypeTag) -> Self {
        self.type_tag = Some(tag);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn style(&self) -> Option<&StyleFn> {
        self.style.as_ref()
    }

    pub fn type_tag(&self) -> Option<TypeTag> {
        self.type_tag
    }

    /// Extract this column's cell value from a record.
    pub fn value_of(&self, record: &R) -> Value {
        (self.getter)(record)
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("required", &self.required)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// The open-map column: its record field holds every header/value pair not
/// claimed by a static column. At most one per schema.
pub struct DynamicColumn<R> {
    field: &'static str,
    getter: MapGetter<R>,
    validator: Option<Validator>,
    validators: BTreeMap<String, Validator>,
    style: Option<StyleFn>,
    styles: BTreeMap<String, StyleFn>,
    type_hint: Option<TypeHintFn>,
}

impl<R> DynamicColumn<R> {
    /// Declare the dynamic column backed by `field`; the getter returns the
    /// record's open header->value map at encode time.
    pub fn new(field: &'static str, getter: impl Fn(&R) -> RowValues + Send + Sync + 'static) -> Self {
        Self {
            field,
            getter: Box::new(getter),
            validator: None,
            validators: BTreeMap::new(),
            style: None,
            styles: BTreeMap::new(),
            type_hint: None,
        }
    }

    /// General validator for every dynamic cell without a per-header one.
    pub fn with_validator(
        mut self,
        f: impl Fn(&str, Value) -> Result<Value, CellError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Validator::named(f));
        self
    }

    /// Validator applied only to cells under `header`.
    pub fn with_validator_for(
        mut self,
        header: impl Into<String>,
        f: impl Fn(&str, Value) -> Result<Value, CellError> + Send + Sync + 'static,
    ) -> Self {
        self.validators.insert(header.into(), Validator::named(f));
        self
    }

    /// General style decision for dynamic cells.
    pub fn with_style(
        mut self,
        f: impl Fn(&StyleContext<'_>) -> Option<Style> + Send + Sync + 'static,
    ) -> Self {
        self.style = Some(Box::new(f));
        self
    }

    /// Style decision applied only to cells under `header`.
    pub fn with_style_for(
        mut self,
        header: impl Into<String>,
        f: impl Fn(&StyleContext<'_>) -> Option<Style> + Send + Sync + 'static,
    ) -> Self {
        self.styles.insert(header.into(), Box::new(f));
        self
    }

    /// Writer-side type hint per dynamic header.
    pub fn with_type_hint(
        mut self,
        f: impl Fn(&str) -> Option<TypeTag> + Send + Sync + 'static,
    ) -> Self {
        self.type_hint = Some(Box::new(f));
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The record's dynamic header->value map.
    pub fn values_of(&self, record: &R) -> RowValues {
        (self.getter)(record)
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn validator_override(&self, header: &str) -> Option<&Validator> {
        self.validators.get(header)
    }

    pub fn style(&self) -> Option<&StyleFn> {
        self.style.as_ref()
    }

    pub fn style_override(&self, header: &str) -> Option<&StyleFn> {
        self.styles.get(header)
    }

    pub fn type_hint(&self, header: &str) -> Option<TypeTag> {
        self.type_hint.as_ref().and_then(|f| f(header))
    }
}

impl<R> std::fmt::Debug for DynamicColumn<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicColumn")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Immutable description of a record type's static and dynamic columns.
pub struct Schema<R> {
    columns: Vec<Column<R>>,
    dynamic: Option<DynamicColumn<R>>,
    by_header: IndexMap<String, usize>,
    by_field: BTreeMap<&'static str, usize>,
}

impl<R> Schema<R> {
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder {
            columns: Vec::new(),
            dynamics: Vec::new(),
        }
    }

    /// Static columns in declaration order.
    pub fn static_columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn dynamic_column(&self) -> Option<&DynamicColumn<R>> {
        self.dynamic.as_ref()
    }

    /// Header declared for a static field, if any.
    pub fn header_for(&self, field: &str) -> Option<&str> {
        self.by_field
            .get(field)
            .map(|&idx| self.columns[idx].header())
    }

    /// Static field declared for a header, if any.
    pub fn field_for(&self, header: &str) -> Option<&'static str> {
        self.by_header
            .get(header)
            .map(|&idx| self.columns[idx].field())
    }

    /// Static column declared for a header, if any.
    pub fn column_for(&self, header: &str) -> Option<&Column<R>> {
        self.by_header.get(header).map(|&idx| &self.columns[idx])
    }
}

impl<R> std::fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("columns", &self.columns)
            .field("dynamic", &self.dynamic)
            .finish()
    }
}

/// Builds a [`Schema`], checking its invariants once at build time.
pub struct SchemaBuilder<R> {
    columns: Vec<Column<R>>,
    dynamics: Vec<DynamicColumn<R>>,
}

impl<R> SchemaBuilder<R> {
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn dynamic(mut self, column: DynamicColumn<R>) -> Self {
        self.dynamics.push(column);
        self
    }

    /// Fails if two static columns share a header, a header is empty, or
    /// more than one dynamic column was declared.
    pub fn build(self) -> Result<Schema<R>, SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        if self.dynamics.len() > 1 {
            return Err(SchemaError::DuplicateDynamic {
                first: self.dynamics[0].field().to_string(),
                second: self.dynamics[1].field().to_string(),
            });
        }

        let mut by_header = IndexMap::with_capacity(self.columns.len());
        let mut by_field = BTreeMap::new();
        for (idx, column) in self.columns.iter().enumerate() {
            if column.header().trim().is_empty() {
                return Err(SchemaError::EmptyHeader(column.field().to_string()));
            }
            if by_header.insert(column.header().to_string(), idx).is_some() {
                return Err(SchemaError::DuplicateHeader(column.header().to_string()));
            }
            by_field.insert(column.field(), idx);
        }

        Ok(Schema {
            columns: self.columns,
            dynamic: self.dynamics.into_iter().next(),
            by_header,
            by_field,
        })
    }
}
