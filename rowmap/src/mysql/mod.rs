//! MySQL implementation for rowmap

mod connection;
mod escape;
mod types;

pub use connection::MySqlConnection;
pub use escape::MySqlEscaper;
