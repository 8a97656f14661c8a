//! Query builder for rowmap

use crate::error::{Error, Result};
use crate::model::Model;
use crate::row::QueryResult;
use crate::session::Session;
use crate::traits::{Connection, FromValue, ToValue};
use crate::value::Value;

/// A query builder that supports fluent parameter binding.
///
/// Bound values replace `?` placeholders in order. Placeholders are
/// replaced with the escaped value only, so string values need their quotes
/// written into the SQL.
///
/// # Example
///
/// ```ignore
/// use rowmap::{Query, Session};
///
/// async fn find_team(session: &mut Session, name: &str) -> rowmap::Result<Option<EventTeam>> {
///     Query::new("SELECT * FROM event_teams WHERE name = '?'")
///         .bind(name)
///         .fetch_optional(session)
///         .await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Query<'q> {
    sql: &'q str,
    params: Vec<Value>,
}

impl<'q> Query<'q> {
    /// Create a new query with the given SQL.
    pub fn new(sql: &'q str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Bind a single value to the query.
    pub fn bind<T: ToValue>(mut self, value: T) -> Self {
        self.params.push(value.to_value());
        self
    }

    /// Bind multiple values to the query.
    pub fn bind_all<T: ToValue>(mut self, values: &[T]) -> Self {
        for value in values {
            self.params.push(value.to_value());
        }
        self
    }

    pub fn sql(&self) -> &str {
        self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Execute the query and return its rows, or the absence of a result set.
    pub async fn execute<C: Connection>(self, session: &mut Session<C>) -> Result<QueryResult> {
        session.execute(self.sql, &self.params).await
    }

    /// Fetch all matching rows as models.
    pub async fn fetch_all<M: Model, C: Connection>(self, session: &mut Session<C>) -> Result<Vec<M>> {
        session.fetch_all(self.sql, &self.params).await
    }

    /// Fetch the first matching row, if any.
    pub async fn fetch_optional<M: Model, C: Connection>(
        self,
        session: &mut Session<C>,
    ) -> Result<Option<M>> {
        let rows = session.execute(self.sql, &self.params).await?.expect_rows()?;
        rows.first().map(M::from_row).transpose()
    }

    /// Fetch exactly one row.
    pub async fn fetch_one<M: Model, C: Connection>(self, session: &mut Session<C>) -> Result<M> {
        self.fetch_optional(session)
            .await?
            .ok_or_else(|| Error::Query("Expected one row, found none".to_string()))
    }

    /// Fetch a scalar value (first column of first row).
    pub async fn fetch_scalar<T: FromValue, C: Connection>(self, session: &mut Session<C>) -> Result<T> {
        let rows = session.execute(self.sql, &self.params).await?.expect_rows()?;
        let row = rows
            .first()
            .ok_or_else(|| Error::Query("Expected one row, found none".to_string()))?;
        let value = row
            .value_at(0)
            .ok_or_else(|| Error::Query("Expected at least one column".to_string()))?;
        T::from_value(value.clone())
    }
}
