//! Result rows and the result-set marker

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::FromValue;
use crate::value::Value;

/// One result row: column names zipped with values, in result order.
///
/// Rows of the same result set share their column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from a shared column list and its values.
    ///
    /// Extra values beyond the column list are dropped; missing ones are
    /// treated as absent columns.
    pub fn new(columns: Arc<[String]>, mut values: Vec<Value>) -> Self {
        values.truncate(columns.len());
        Self { columns, values }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value from the row by column name as a dynamic Value.
    ///
    /// Returns an error if the column doesn't exist.
    pub fn get_value(&self, column: &str) -> Result<Value> {
        self.value_ref(column)
            .cloned()
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }

    /// Get a typed value from the row by column name.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.get_value(column)?;
        if value.is_null() {
            // Option<T> turns NULL into None; anything else cannot hold it
            return T::from_value(Value::Null)
                .map_err(|_| Error::UnexpectedNull(column.to_string()));
        }
        T::from_value(value)
    }

    /// Borrow a value by column name.
    pub fn value_ref(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    /// Borrow a value by position.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterate `(column, value)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the row into `(column, value)` pairs in result order.
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.columns.iter().cloned().zip(self.values).collect()
    }

    /// Consume the row into a map keyed by column name.
    ///
    /// If a column name repeats, the last value wins.
    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.into_pairs().into_iter().collect()
    }
}

/// The outcome of executing a statement.
///
/// A statement that produced column descriptors always yields `Rows`, even
/// when no row matched; statements without them (INSERT, UPDATE) yield
/// `NoResultSet`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Rows(Vec<Row>),
    NoResultSet,
}

impl QueryResult {
    /// Whether the statement produced a result set.
    pub fn is_result_set(&self) -> bool {
        matches!(self, QueryResult::Rows(_))
    }

    /// Borrow the rows, if there is a result set.
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryResult::Rows(rows) => Some(rows),
            QueryResult::NoResultSet => None,
        }
    }

    /// Take the rows, if there is a result set.
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            QueryResult::Rows(rows) => Some(rows),
            QueryResult::NoResultSet => None,
        }
    }

    /// Take the rows, treating a missing result set as an error.
    pub fn expect_rows(self) -> Result<Vec<Row>> {
        self.into_rows()
            .ok_or_else(|| Error::Query("Statement did not produce a result set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        let columns: Arc<[String]> = vec!["id".to_string(), "name".to_string(), "age".to_string()].into();
        Row::new(columns, vec![Value::I64(1), "Alice".into(), Value::Null])
    }

    #[test]
    fn test_lookup_by_name() {
        let row = row();
        assert_eq!(row.get::<i32>("id").unwrap(), 1);
        assert_eq!(row.get::<String>("name").unwrap(), "Alice");
        assert_eq!(row.get::<Option<i64>>("age").unwrap(), None);
        assert!(matches!(row.get::<i64>("age"), Err(Error::UnexpectedNull(_))));
        assert!(matches!(row.get_value("missing"), Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_keeps_result_order() {
        let row = row();
        let names: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(names, ["id", "name", "age"]);
        let pairs = row.clone().into_pairs();
        assert_eq!(pairs[1], ("name".to_string(), Value::from("Alice")));
        assert_eq!(row.into_map().len(), 3);
    }

    #[test]
    fn test_empty_result_set_is_not_no_result_set() {
        let empty = QueryResult::Rows(Vec::new());
        assert!(empty.is_result_set());
        assert_eq!(empty.rows().map(<[Row]>::len), Some(0));
        assert_ne!(empty, QueryResult::NoResultSet);
        assert!(QueryResult::NoResultSet.into_rows().is_none());
    }
}
