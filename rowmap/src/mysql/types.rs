//! Type conversion utilities for MySQL

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mysql_async::consts::{ColumnFlags, ColumnType};
use mysql_async::{Column, Value as MySqlValue};
use rust_decimal::Decimal;

/// Character set id MySQL reports for binary strings and blobs.
const BINARY_CHARSET: u16 = 63;

/// Decode one cell of a text-protocol row using its column definition.
///
/// The text protocol sends every non-NULL cell as bytes, so the column type
/// decides how the text is parsed. Text that does not parse for its column
/// type (zero dates, out-of-range values) is kept as a string.
pub fn decode_cell(value: MySqlValue, column: &Column) -> Result<Value> {
    let bytes = match value {
        MySqlValue::NULL => return Ok(Value::Null),
        MySqlValue::Bytes(bytes) => bytes,
        other => return from_mysql_value(other),
    };

    let column_type = column.column_type();
    if column_type == ColumnType::MYSQL_TYPE_BIT {
        let bits = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        return Ok(Value::U64(bits));
    }
    if column.character_set() == BINARY_CHARSET && is_string_type(column_type) {
        return Ok(Value::Bytes(bytes));
    }

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => return Ok(Value::Bytes(e.into_bytes())),
    };
    let unsigned = column.flags().contains(ColumnFlags::UNSIGNED_FLAG);

    let parsed = match column_type {
        ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_INT24
        | ColumnType::MYSQL_TYPE_LONG
        | ColumnType::MYSQL_TYPE_LONGLONG
        | ColumnType::MYSQL_TYPE_YEAR => {
            if unsigned {
                text.parse().ok().map(Value::U64)
            } else {
                text.parse().ok().map(Value::I64)
            }
        }
        ColumnType::MYSQL_TYPE_FLOAT => text.parse().ok().map(Value::F32),
        ColumnType::MYSQL_TYPE_DOUBLE => text.parse().ok().map(Value::F64),
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
            text.parse::<Decimal>().ok().map(Value::Decimal)
        }
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
            NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .ok()
                .map(Value::Date)
        }
        ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2 => {
            NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(Value::DateTime)
        }
        ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
            NaiveTime::parse_from_str(&text, "%H:%M:%S%.f")
                .ok()
                .map(Value::Time)
        }
        ColumnType::MYSQL_TYPE_JSON => serde_json::from_str(&text).ok().map(Value::Json),
        _ => None,
    };

    Ok(parsed.unwrap_or(Value::String(text)))
}

fn is_string_type(column_type: ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::MYSQL_TYPE_VARCHAR
            | ColumnType::MYSQL_TYPE_VAR_STRING
            | ColumnType::MYSQL_TYPE_STRING
            | ColumnType::MYSQL_TYPE_TINY_BLOB
            | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
            | ColumnType::MYSQL_TYPE_LONG_BLOB
            | ColumnType::MYSQL_TYPE_BLOB
    )
}

/// Convert an already typed mysql_async Value to a rowmap Value
pub fn from_mysql_value(value: MySqlValue) -> Result<Value> {
    match value {
        MySqlValue::NULL => Ok(Value::Null),
        MySqlValue::Bytes(v) => match String::from_utf8(v) {
            Ok(s) => Ok(Value::String(s)),
            Err(e) => Ok(Value::Bytes(e.into_bytes())),
        },
        MySqlValue::Int(v) => Ok(Value::I64(v)),
        MySqlValue::UInt(v) => Ok(Value::U64(v)),
        MySqlValue::Float(v) => Ok(Value::F32(v)),
        MySqlValue::Double(v) => Ok(Value::F64(v)),
        MySqlValue::Date(year, month, day, hour, min, sec, micro) => {
            let date = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into()).ok_or_else(
                || Error::TypeConversion {
                    expected: "date",
                    actual: format!("{}-{}-{}", year, month, day),
                },
            )?;
            if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                return Ok(Value::Date(date));
            }
            let time = NaiveTime::from_hms_micro_opt(hour.into(), min.into(), sec.into(), micro)
                .ok_or_else(|| Error::TypeConversion {
                    expected: "time",
                    actual: format!("{}:{}:{}.{}", hour, min, sec, micro),
                })?;
            Ok(Value::DateTime(NaiveDateTime::new(date, time)))
        }
        MySqlValue::Time(is_neg, days, hours, mins, secs, micro) => {
            // NaiveTime covers 00:00:00 to 23:59:59 only
            if is_neg || days > 0 || hours >= 24 {
                return Err(Error::TypeConversion {
                    expected: "time (00:00:00 to 23:59:59)",
                    actual: format!(
                        "{}{}:{:02}:{:02}",
                        if is_neg { "-" } else { "" },
                        days * 24 + u32::from(hours),
                        mins,
                        secs
                    ),
                });
            }
            NaiveTime::from_hms_micro_opt(hours.into(), mins.into(), secs.into(), micro)
                .map(Value::Time)
                .ok_or_else(|| Error::TypeConversion {
                    expected: "time",
                    actual: format!("{}:{}:{}.{}", hours, mins, secs, micro),
                })
        }
    }
}
