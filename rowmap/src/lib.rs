//! rowmap - a small model-to-SQL mapping layer for MySQL
//!
//! Typed records are translated into INSERT and UPDATE statements and sent
//! over one managed `mysql_async` connection; result rows come back as
//! ordered column/value pairs or decoded models.
//!
//! # Features
//!
//! - **Derive Macro**: `#[derive(Model)]` builds a static schema from a struct
//! - **Validation**: field kinds are checked when a model is built from values
//! - **Statement Builder**: INSERT/UPDATE generation with primary-key WHERE clauses
//! - **Resilient Session**: liveness probing and a single bounded retry per statement
//!
//! # Example
//!
//! ```ignore
//! use rowmap::{Model, PrimaryKey, Query, Session, SessionOptions};
//!
//! #[derive(Debug, Model)]
//! pub struct EventTeam {
//!     pub id: PrimaryKey<i64>,
//!     pub name: String,
//!     pub seed: Option<i32>,
//! }
//!
//! async fn rename(session: &mut Session, id: i64, name: &str) -> rowmap::Result<()> {
//!     let mut team: EventTeam = Query::new("SELECT * FROM event_teams WHERE id = ?")
//!         .bind(id)
//!         .fetch_one(session)
//!         .await?;
//!     team.name = name.to_string();
//!     session.update(&team, None).await
//! }
//! ```

// Lets `#[derive(Model)]` output, which names `rowmap::...`, compile inside this crate.
extern crate self as rowmap;

pub mod error;
pub mod model;
pub mod mysql;
pub mod naming;
pub mod options;
pub mod query;
pub mod row;
pub mod session;
pub mod statement;
pub mod substitute;
pub mod traits;
pub mod validate;
pub mod value;

// Re-export the derive macro
pub use rowmap_derive::Model;

// Re-export main types
pub use error::{Error, Result, ER_DUP_ENTRY};
pub use model::{FieldDef, FieldValues, Model, ModelSchema, PrimaryKey};
pub use mysql::{MySqlConnection, MySqlEscaper};
pub use naming::table_name;
pub use options::{SessionOptions, DEFAULT_PORT};
pub use query::Query;
pub use row::{QueryResult, Row};
pub use session::Session;
pub use statement::{build_insert, build_update, insert_sql, update_sql};
pub use substitute::{substitute, PLACEHOLDER};
pub use traits::{Column, Connection, Escape, FromValue, RawResult, ToValue};
pub use validate::validate;
pub use value::{Value, ValueKind};
