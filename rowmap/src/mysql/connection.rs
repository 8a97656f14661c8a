//! MySQL connection implementation

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::options::SessionOptions;
use crate::traits::{Connection, Escape, RawResult};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, Row as MySqlAsyncRow};
use tracing::{info, warn};

use super::escape::MySqlEscaper;
use super::types::decode_cell;

/// A single MySQL connection.
///
/// This wraps `mysql_async::Conn` and keeps the options it was opened with
/// so that [`Connection::ping`] can replace a dead link with a fresh one.
/// Statements go over the text protocol because values are substituted into
/// the SQL before it is sent.
pub struct MySqlConnection {
    conn: Conn,
    opts: Opts,
    escaper: MySqlEscaper,
}

impl MySqlConnection {
    /// Open a connection with the given options.
    pub async fn connect(options: &SessionOptions) -> Result<Self> {
        let opts = options.to_opts();
        info!(
            host = %options.host,
            port = options.port,
            database = %options.database,
            autocommit = options.autocommit,
            "connecting to MySQL"
        );
        let conn = Conn::new(opts.clone()).await.map_err(map_driver_error)?;
        Ok(Self {
            conn,
            opts,
            escaper: MySqlEscaper::new(options.no_backslash_escapes),
        })
    }

    /// Get a reference to the underlying mysql_async connection.
    pub fn inner(&self) -> &Conn {
        &self.conn
    }

    /// Get a mutable reference to the underlying mysql_async connection.
    pub fn inner_mut(&mut self) -> &mut Conn {
        &mut self.conn
    }

    async fn reconnect(&mut self) -> Result<()> {
        let fresh = Conn::new(self.opts.clone()).await.map_err(map_driver_error)?;
        // the stale handle is dropped; mysql_async closes it in the background
        self.conn = fresh;
        info!("reconnected to MySQL");
        Ok(())
    }
}

impl Escape for MySqlConnection {
    fn escape(&self, text: &str) -> String {
        self.escaper.escape(text)
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    async fn ping(&mut self) -> Result<()> {
        if let Err(e) = self.conn.ping().await {
            warn!(error = %e, "ping failed, reconnecting");
            self.reconnect().await?;
        }
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<RawResult> {
        let mut result = self.conn.query_iter(sql).await.map_err(map_driver_error)?;

        let columns = result.columns().filter(|columns| !columns.is_empty());
        let rows: Vec<MySqlAsyncRow> = result.collect().await.map_err(map_driver_error)?;
        result.drop_result().await.map_err(map_driver_error)?;

        let Some(columns) = columns else {
            return Ok(RawResult::no_result_set());
        };

        let mut decoded = Vec::with_capacity(rows.len());
        for row in rows {
            decoded.push(decode_row(row, &columns)?);
        }

        let names = columns
            .iter()
            .map(|c| c.name_str().into_owned())
            .collect();
        Ok(RawResult::rows(names, decoded))
    }

    async fn commit(&mut self) -> Result<()> {
        self.conn.query_drop("COMMIT").await.map_err(map_driver_error)
    }

    async fn disconnect(self) -> Result<()> {
        self.conn.disconnect().await.map_err(map_driver_error)
    }
}

fn decode_row(row: MySqlAsyncRow, columns: &Arc<[mysql_async::Column]>) -> Result<Vec<crate::Value>> {
    let mut values = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        let cell = row
            .as_ref(i)
            .ok_or_else(|| Error::ColumnNotFound(column.name_str().into_owned()))?
            .clone();
        values.push(decode_cell(cell, column)?);
    }
    Ok(values)
}

/// Lift server errors into [`Error::Database`] so the retry policy can read
/// their codes; everything else stays a driver error.
fn map_driver_error(e: mysql_async::Error) -> Error {
    match e {
        mysql_async::Error::Server(server) => Error::Database {
            code: server.code,
            state: server.state,
            message: server.message,
        },
        other => Error::MySql(other),
    }
}
