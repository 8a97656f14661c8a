//! Core traits for rowmap

mod column;
mod connection;
mod from_value;
mod to_value;

pub use column::Column;
pub use connection::{Connection, Escape, RawResult};
pub use from_value::FromValue;
pub use to_value::ToValue;
