//! Error types for rowmap

use thiserror::Error;

use crate::value::ValueKind;

/// Result type alias for rowmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// MySQL server error code for a duplicate entry on a unique or primary key.
pub const ER_DUP_ENTRY: u16 = 1062;

/// Errors that can occur while building or executing statements
#[derive(Error, Debug)]
pub enum Error {
    /// MySQL driver error (I/O, protocol, URL parsing)
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Error reported by the database server
    #[error("Database error {code} ({state}): {message}")]
    Database {
        code: u16,
        state: String,
        message: String,
    },

    /// Low-level connection fault raised by a connection adapter
    #[error("Connection error: {0}")]
    Connection(String),

    /// An operation was attempted on a session that holds no connection
    #[error("Database connection was never initialized")]
    UninitializedConnection,

    /// More substitution values were supplied than placeholders remain
    #[error("Not enough placeholders to substitute: {values} values supplied, {placeholders} placeholders found")]
    SubstitutionCount { values: usize, placeholders: usize },

    /// A field value's kind disagrees with the declared field type
    #[error("Invalid value of type '{actual}' provided for field '{field}' of model {model}, expected '{expected}'")]
    TypeMismatch {
        model: &'static str,
        field: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A declared field received no value and has no default
    #[error("No value provided for field '{field}' of model {model}")]
    MissingValue {
        model: &'static str,
        field: &'static str,
    },

    /// An update needs a WHERE clause but the model has no primary key
    #[error("A WHERE clause is required to update {model}: no primary key is declared")]
    MissingPrimaryKey { model: &'static str },

    /// An update needs a WHERE clause but the primary-key field is NULL
    #[error("A WHERE clause is required to update {model}: primary key '{field}' is NULL")]
    NullPrimaryKey {
        model: &'static str,
        field: &'static str,
    },

    /// A model schema that cannot be instantiated
    #[error("Construction error: {0}")]
    Construction(String),

    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// Column not found in row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Null value for non-optional field
    #[error("Unexpected null value for column: {0}")]
    UnexpectedNull(String),

    /// Query result did not have the expected shape
    #[error("Query error: {0}")]
    Query(String),
}

impl Error {
    /// Whether this is a low-level runtime fault (I/O or driver state) rather
    /// than an error the server reported for the statement.
    pub fn is_runtime_fault(&self) -> bool {
        matches!(
            self,
            Error::Connection(_)
                | Error::MySql(mysql_async::Error::Io(_))
                | Error::MySql(mysql_async::Error::Driver(_))
        )
    }

    /// Whether the server rejected the statement with a duplicate-key error.
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            Error::Database { code, .. } => *code == ER_DUP_ENTRY,
            Error::MySql(mysql_async::Error::Server(e)) => e.code == ER_DUP_ENTRY,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let dup = Error::Database {
            code: ER_DUP_ENTRY,
            state: "23000".into(),
            message: "Duplicate entry '1' for key 'PRIMARY'".into(),
        };
        assert!(dup.is_duplicate_key());
        assert!(!dup.is_runtime_fault());

        let fault = Error::Connection("broken pipe".into());
        assert!(fault.is_runtime_fault());
        assert!(!fault.is_duplicate_key());

        assert!(!Error::UninitializedConnection.is_runtime_fault());
    }

    #[test]
    fn test_messages() {
        let err = Error::TypeMismatch {
            model: "User",
            field: "name",
            expected: ValueKind::String,
            actual: ValueKind::I32,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value of type 'i32' provided for field 'name' of model User, expected 'string'"
        );
        let err = Error::SubstitutionCount {
            values: 2,
            placeholders: 1,
        };
        assert!(err.to_string().contains("2 values supplied"));
    }
}
