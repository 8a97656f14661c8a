//! Model trait and the static schema descriptor behind it

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{Error, Result};
use crate::naming;
use crate::row::Row;
use crate::traits::{FromValue, ToValue};
use crate::validate::validate;
use crate::value::{Value, ValueKind};

/// Marks a model field as the record's identity column.
///
/// The wrapped value is compared and validated as `T`. `Session::update`
/// uses the first `PrimaryKey` field in declaration order to build its
/// default WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PrimaryKey<T>(pub T);

impl<T> PrimaryKey<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for PrimaryKey<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for PrimaryKey<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for PrimaryKey<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: fmt::Display> fmt::Display for PrimaryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ToValue> ToValue for PrimaryKey<T> {
    fn to_value(&self) -> Value {
        self.0.to_value()
    }
}

impl<T: FromValue> FromValue for PrimaryKey<T> {
    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(PrimaryKey)
    }
}

/// One declared field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, also used as the column name
    pub name: &'static str,
    /// Declared kind with optional/primary-key wrappers removed
    pub kind: ValueKind,
    /// Whether the field is `Option<T>`
    pub nullable: bool,
    /// Whether the field is `PrimaryKey<T>`
    pub primary_key: bool,
    /// Whether the field falls back to `Default::default()` when not supplied
    pub has_default: bool,
}

/// Static description of a model type, in field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSchema {
    /// The Rust type name of the model
    pub type_name: &'static str,
    /// Explicit table name from `#[model(table = "...")]`
    pub table: Option<&'static str>,
    pub fields: &'static [FieldDef],
}

impl ModelSchema {
    /// The table this model maps to.
    pub fn table_name(&self) -> String {
        match self.table {
            Some(table) => table.to_string(),
            None => naming::table_name(self.type_name),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The first primary-key field and its position.
    pub fn primary_key(&self) -> Option<(usize, &FieldDef)> {
        self.fields.iter().enumerate().find(|(_, f)| f.primary_key)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// Named values supplied to [`Model::from_values`].
///
/// Insertion order is kept; setting a name twice replaces the earlier value.
///
/// # Example
///
/// ```ignore
/// let user = User::from_values(
///     FieldValues::new()
///         .set("id", 1i64)
///         .set("name", "Alice")
///         .set("age", Value::Null),
/// )?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    entries: Vec<(String, Value)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove and decode a required field.
    #[doc(hidden)]
    pub fn take_field<T: FromValue>(&mut self, model: &'static str, field: &'static str) -> Result<T> {
        let value = self.take(field).ok_or(Error::MissingValue { model, field })?;
        T::from_value(value)
    }

    /// Remove and decode a field, falling back to `T::default()`.
    #[doc(hidden)]
    pub fn take_or_default<T: FromValue + Default>(&mut self, field: &str) -> Result<T> {
        match self.take(field) {
            Some(value) => T::from_value(value),
            None => Ok(T::default()),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FieldValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// A typed record mapped to a table.
///
/// This trait is implemented with `#[derive(Model)]`, which builds the
/// schema from the struct's named fields in declaration order.
///
/// # Example
///
/// ```ignore
/// use rowmap::{Model, PrimaryKey};
///
/// #[derive(Debug, Model)]
/// pub struct EventTeam {
///     pub id: PrimaryKey<i64>,
///     pub name: String,
///     pub seed: Option<i32>,
/// }
///
/// assert_eq!(EventTeam::table_name(), "event_teams");
/// ```
pub trait Model: Sized {
    /// The static schema of this model.
    fn schema() -> &'static ModelSchema;

    /// Field values in declaration order.
    fn to_values(&self) -> Vec<Value>;

    /// Build an instance from a result row, by column name.
    fn from_row(row: &Row) -> Result<Self>;

    /// Build an instance from values that already passed [`validate`].
    #[doc(hidden)]
    fn from_validated(values: FieldValues) -> Result<Self>;

    /// Build an instance from named values, validating them against the
    /// schema first.
    fn from_values(values: FieldValues) -> Result<Self> {
        validate(Self::schema(), &values)?;
        Self::from_validated(values)
    }

    /// The table this model maps to.
    fn table_name() -> String {
        Self::schema().table_name()
    }

    /// `(field, value)` pairs in declaration order.
    fn fields(&self) -> Vec<(&'static str, Value)> {
        Self::schema().column_names().zip(self.to_values()).collect()
    }

    /// A `TypeName(field=value, ...)` rendering of this instance.
    fn describe(&self) -> String {
        let fields = self
            .fields()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", Self::schema().type_name, fields)
    }
}
