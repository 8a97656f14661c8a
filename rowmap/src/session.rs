//! A session over one managed database connection

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::Model;
use crate::mysql::MySqlConnection;
use crate::options::SessionOptions;
use crate::row::{QueryResult, Row};
use crate::statement::{build_insert, build_update};
use crate::substitute::substitute;
use crate::traits::{Connection, RawResult};
use crate::value::Value;

/// How one execution attempt, including its single retry, ended.
#[derive(Debug)]
enum Outcome {
    Success(RawResult),
    /// The retry hit a duplicate key after the first attempt died with a
    /// runtime fault. Some drivers surface a fault after the statement has
    /// already been applied, so the retry's duplicate is taken as proof the
    /// first attempt landed. This is a heuristic: it cannot tell a genuine
    /// conflicting row apart from our own earlier write.
    RetryableDuplicate,
    Fatal(Error),
}

/// The owner of one live database connection.
///
/// Every operation takes `&mut self`, so a session is driven by one caller
/// at a time; concurrent work needs one session per task.
///
/// # Example
///
/// ```ignore
/// use rowmap::{Model, PrimaryKey, Session, SessionOptions};
///
/// #[derive(Model)]
/// struct EventTeam {
///     id: PrimaryKey<i64>,
///     name: String,
///     seed: Option<i32>,
/// }
///
/// let mut session = Session::connect(SessionOptions::new("localhost", "app", "secret", "events")).await?;
/// session.insert(&EventTeam { id: PrimaryKey(1), name: "Reds".into(), seed: None }).await?;
/// let rows = session.execute("SELECT * FROM event_teams WHERE name = '?'", &["Reds".into()]).await?;
/// ```
pub struct Session<C = MySqlConnection> {
    conn: Option<C>,
}

impl Session<MySqlConnection> {
    /// Open a MySQL connection and wrap it in a session.
    pub async fn connect(options: SessionOptions) -> Result<Self> {
        let conn = MySqlConnection::connect(&options).await?;
        Ok(Self::new(conn))
    }
}

impl<C: Connection> Session<C> {
    /// Wrap an established connection.
    pub fn new(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    /// Whether the session still holds a connection.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> Option<&C> {
        self.conn.as_ref()
    }

    fn conn_mut(&mut self) -> Result<&mut C> {
        self.conn.as_mut().ok_or(Error::UninitializedConnection)
    }

    /// Make sure the connection exists and is alive, reconnecting if the
    /// driver finds it dead.
    pub async fn ensure_live(&mut self) -> Result<()> {
        self.conn_mut()?.ping().await
    }

    /// Substitute `params` into the `?` placeholders of `sql` and run it.
    ///
    /// A failed attempt is retried once after re-probing the connection.
    pub async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.run(sql, params, true).await
    }

    /// Run `sql` and decode every row into `M`.
    ///
    /// A statement without a result set yields no models.
    pub async fn fetch_all<M: Model>(&mut self, sql: &str, params: &[Value]) -> Result<Vec<M>> {
        match self.execute(sql, params).await? {
            QueryResult::Rows(rows) => rows.iter().map(M::from_row).collect(),
            QueryResult::NoResultSet => Ok(Vec::new()),
        }
    }

    /// Insert `model` as a new row and commit.
    pub async fn insert<M: Model>(&mut self, model: &M) -> Result<()> {
        self.ensure_live().await?;
        let sql = build_insert(model, &*self.conn_mut()?);
        self.run(&sql, &[], false).await?;
        self.commit().await
    }

    /// Update the row for `model` and commit.
    ///
    /// `where_clause` is used verbatim (including `WHERE`); without it the
    /// model's primary key selects the row.
    pub async fn update<M: Model>(&mut self, model: &M, where_clause: Option<&str>) -> Result<()> {
        self.ensure_live().await?;
        let sql = build_update(model, where_clause, &*self.conn_mut()?)?;
        self.run(&sql, &[], false).await?;
        self.commit().await
    }

    /// Disconnect. Later operations fail with
    /// [`Error::UninitializedConnection`].
    pub async fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            Some(conn) => {
                info!("closing session");
                conn.disconnect().await
            }
            None => Ok(()),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        debug!("committing");
        self.conn_mut()?.commit().await
    }

    async fn run(&mut self, sql: &str, params: &[Value], ensure_live: bool) -> Result<QueryResult> {
        if ensure_live {
            self.ensure_live().await?;
        }

        let conn = self.conn_mut()?;
        let sql = substitute(sql, params, &*conn)?;

        match Self::attempt(conn, &sql).await {
            Outcome::Success(raw) => Ok(shape(raw)),
            Outcome::RetryableDuplicate => Ok(QueryResult::NoResultSet),
            Outcome::Fatal(e) => Err(e),
        }
    }

    async fn attempt(conn: &mut C, sql: &str) -> Outcome {
        debug!(sql, "executing");
        let first = match conn.execute(sql).await {
            Ok(raw) => return Outcome::Success(raw),
            Err(e) => e,
        };

        warn!(error = %first, "statement failed, re-probing connection and retrying once");
        if let Err(e) = conn.ping().await {
            return Outcome::Fatal(e);
        }

        match conn.execute(sql).await {
            Ok(raw) => Outcome::Success(raw),
            Err(retry) if first.is_runtime_fault() && retry.is_duplicate_key() => {
                warn!(
                    error = %retry,
                    "duplicate key on retry after a runtime fault; treating the first attempt as applied"
                );
                Outcome::RetryableDuplicate
            }
            Err(retry) => Outcome::Fatal(retry),
        }
    }
}

/// Zip column names against each row, or mark the absence of a result set.
fn shape(raw: RawResult) -> QueryResult {
    match raw.columns {
        Some(columns) if !columns.is_empty() => {
            let columns: Arc<[String]> = columns.into();
            let rows = raw
                .rows
                .into_iter()
                .map(|values| Row::new(Arc::clone(&columns), values))
                .collect();
            QueryResult::Rows(rows)
        }
        _ => QueryResult::NoResultSet,
    }
}
