//! FromValue trait for converting database values to Rust types

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Trait for types that can be constructed from a database value.
///
/// Conversions are lenient across integer widths: the MySQL text protocol
/// reports every integer column as `I64`/`U64`, so narrowing is range-checked
/// instead of rejected outright.
pub trait FromValue: Sized {
    /// Convert a database value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, value: &Value) -> Result<T> {
    Err(Error::TypeConversion {
        expected,
        actual: value.type_name().to_string(),
    })
}

fn out_of_range(expected: &'static str, value: &Value) -> Error {
    Error::TypeConversion {
        expected,
        actual: format!("{}({}) out of range", value.type_name(), value),
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    let converted = match &value {
                        Value::I8(v) => $ty::try_from(*v).ok(),
                        Value::I16(v) => $ty::try_from(*v).ok(),
                        Value::I32(v) => $ty::try_from(*v).ok(),
                        Value::I64(v) => $ty::try_from(*v).ok(),
                        Value::U8(v) => $ty::try_from(*v).ok(),
                        Value::U16(v) => $ty::try_from(*v).ok(),
                        Value::U32(v) => $ty::try_from(*v).ok(),
                        Value::U64(v) => $ty::try_from(*v).ok(),
                        Value::Bool(v) => Some($ty::from(*v)),
                        Value::String(s) => match s.parse::<$ty>() {
                            Ok(v) => Some(v),
                            Err(_) => return mismatch(stringify!($ty), &value),
                        },
                        _ => return mismatch(stringify!($ty), &value),
                    };
                    converted.ok_or_else(|| out_of_range(stringify!($ty), &value))
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I8(_)
            | Value::I16(_)
            | Value::I32(_)
            | Value::I64(_)
            | Value::U8(_)
            | Value::U16(_)
            | Value::U32(_)
            | Value::U64(_) => Ok(i64::from_value(value)? != 0),
            Value::String(ref s) if s == "0" || s == "1" => Ok(s == "1"),
            other => mismatch("bool", &other),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F32(v) => Ok(v),
            Value::F64(v) => Ok(v as f32),
            Value::String(ref s) => s.parse().or_else(|_| mismatch("f32", &value)),
            other => mismatch("f32", &other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::F32(v) => Ok(v.into()),
            Value::I32(v) => Ok(v.into()),
            Value::Decimal(v) => v.to_string().parse().or_else(|_| mismatch("f64", &value)),
            Value::String(ref s) => s.parse().or_else(|_| mismatch("f64", &value)),
            other => mismatch("f64", &other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::Bytes(v) => String::from_utf8(v).map_err(|e| Error::TypeConversion {
                expected: "string",
                actual: format!("invalid utf-8: {}", e),
            }),
            other => mismatch("string", &other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            other => mismatch("bytes", &other),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(v) => Ok(v),
            Value::DateTime(v) => Ok(v.date()),
            Value::String(ref s) => {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").or_else(|_| mismatch("date", &value))
            }
            other => mismatch("date", &other),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::Date(v) => Ok(v.and_time(NaiveTime::default())),
            Value::String(ref s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| mismatch("datetime", &value)),
            other => mismatch("datetime", &other),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(v) => Ok(v),
            Value::String(ref s) => {
                NaiveTime::parse_from_str(s, "%H:%M:%S%.f").or_else(|_| mismatch("time", &value))
            }
            other => mismatch("time", &other),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(v) => Ok(v),
            Value::I64(v) => Ok(Decimal::from(v)),
            Value::U64(v) => Ok(Decimal::from(v)),
            Value::String(ref s) => s.parse().or_else(|_| mismatch("decimal", &value)),
            other => mismatch("decimal", &other),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Json(v) => Ok(v),
            Value::String(ref s) => {
                serde_json::from_str(s).map_err(|e| Error::TypeConversion {
                    expected: "json",
                    actual: format!("invalid json: {}", e),
                })
            }
            Value::Null => Ok(serde_json::Value::Null),
            other => mismatch("json", &other),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}
