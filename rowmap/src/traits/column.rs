//! Column trait describing how a Rust field type is declared in a schema

use crate::model::PrimaryKey;
use crate::traits::{FromValue, ToValue};
use crate::value::ValueKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// A Rust type usable as a model field.
///
/// `#[derive(Model)]` reads these constants to build the static schema, so
/// `Option<T>` marks a nullable column and [`PrimaryKey<T>`] marks the
/// identity column while both report `T`'s kind for validation.
pub trait Column: ToValue + FromValue {
    /// The declared kind, with optional and primary-key wrappers removed.
    const KIND: ValueKind;

    /// Whether the column accepts NULL.
    const NULLABLE: bool = false;

    /// Whether the column is the model's identity column.
    const PRIMARY_KEY: bool = false;
}

macro_rules! impl_column {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Column for $ty {
                const KIND: ValueKind = ValueKind::$kind;
            }
        )*
    };
}

impl_column! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    NaiveTime => Time,
    Decimal => Decimal,
    serde_json::Value => Json,
}

impl<T: Column> Column for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;
    const PRIMARY_KEY: bool = T::PRIMARY_KEY;
}

impl<T: Column> Column for PrimaryKey<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = T::NULLABLE;
    const PRIMARY_KEY: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrappers_unwrap_kind() {
        assert_eq!(<Option<i64> as Column>::KIND, ValueKind::I64);
        assert!(<Option<i64> as Column>::NULLABLE);
        assert!(!<Option<i64> as Column>::PRIMARY_KEY);

        assert_eq!(<PrimaryKey<String> as Column>::KIND, ValueKind::String);
        assert!(<PrimaryKey<String> as Column>::PRIMARY_KEY);
        assert!(!<PrimaryKey<String> as Column>::NULLABLE);
    }
}
