//! Connection trait for the wire-protocol client behind a session

use crate::error::Result;
use crate::value::Value;
use async_trait::async_trait;

/// Escapes text for inclusion in a SQL string literal.
///
/// The returned text is not quoted; callers add the surrounding quotes.
pub trait Escape {
    fn escape(&self, text: &str) -> String;
}

impl<E: Escape + ?Sized> Escape for &E {
    fn escape(&self, text: &str) -> String {
        (**self).escape(text)
    }
}

/// The untyped outcome of one statement.
///
/// `columns` is `None` when the statement produced no column descriptors
/// (INSERT, UPDATE, DDL); `rows` is then empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResult {
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Vec<Value>>,
}

impl RawResult {
    /// A result without column descriptors.
    pub fn no_result_set() -> Self {
        Self::default()
    }

    /// A result set with the given columns and rows.
    pub fn rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: Some(columns),
            rows,
        }
    }
}

/// One live, stateful link to a database.
///
/// This abstracts over the driver so the session's retry policy can run
/// against MySQL or an in-memory double.
#[async_trait]
pub trait Connection: Escape + Send {
    /// Probe the link, reconnecting if it has been lost.
    async fn ping(&mut self) -> Result<()>;

    /// Run a fully substituted statement.
    async fn execute(&mut self, sql: &str) -> Result<RawResult>;

    /// Commit the current transaction.
    async fn commit(&mut self) -> Result<()>;

    /// Close the link.
    async fn disconnect(self) -> Result<()>;
}
