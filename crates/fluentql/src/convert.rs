//! Conversions between host types and [`Value`].
//!
//! [`ToValue`] is what the builder accepts wherever a value goes into a
//! statement; [`FromValue`] is what `#[derive(Record)]` uses to write a
//! column back into a struct field.
//!
//! `Option<T>` is the nullable wrapper: `None` becomes `NULL` and a `NULL`
//! column decodes to `None`. `Vec<u8>` and `[u8]` are binary blobs; sequences
//! of every other scalar are lists, so the list impls are generated per
//! element type rather than over a generic `T`.

use crate::value::{DATE_FORMAT, Raw, TIMESTAMP_FORMAT, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Convert a host value into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Decode a [`Value`] read from a row.
///
/// The error is a human readable message; callers attach the column name.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, String>;
}

fn mismatch(target: &str, value: &Value) -> String {
    format!("cannot decode {} value as {}", value.kind(), target)
}

// ==================== ToValue ====================

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Raw {
    fn to_value(&self) -> Value {
        Value::Raw(self.as_str().to_string())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! int_to_value {
    ($($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        }
    )*};
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl ToValue for u64 {
    fn to_value(&self) -> Value {
        Value::UInt(*self)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::UInt(*self as u64)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        // Widen through the shortest decimal form so 0.1f32 stays 0.1.
        Value::Float(self.to_string().parse().unwrap_or(f64::from(*self)))
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl<const N: usize> ToValue for [u8; N] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for bytes::Bytes {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

macro_rules! list_to_value {
    (@one $t:ty) => {
        impl ToValue for [$t] {
            fn to_value(&self) -> Value {
                Value::List(self.iter().map(ToValue::to_value).collect())
            }
        }

        impl ToValue for Vec<$t> {
            fn to_value(&self) -> Value {
                self.as_slice().to_value()
            }
        }

        impl<const N: usize> ToValue for [$t; N] {
            fn to_value(&self) -> Value {
                self.as_slice().to_value()
            }
        }
    };
    ($($t:ty),* $(,)?) => {$(
        list_to_value!(@one $t);
        list_to_value!(@one Option<$t>);
    )*};
}

list_to_value!(
    Value,
    Raw,
    String,
    &str,
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    DateTime<Utc>,
    NaiveDateTime,
    NaiveDate,
    uuid::Uuid,
);
list_to_value!(@one Option<u8>);

#[cfg(feature = "rust_decimal")]
list_to_value!(rust_decimal::Decimal);

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.with_timezone(&Utc))
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl ToValue for uuid::Uuid {
    fn to_value(&self) -> Value {
        Value::Text(self.hyphenated().to_string())
    }
}

#[cfg(feature = "json")]
impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            other => Value::Text(other.to_string()),
        }
    }
}

#[cfg(feature = "rust_decimal")]
impl ToValue for rust_decimal::Decimal {
    fn to_value(&self) -> Value {
        // Display only ever yields digits, sign and a decimal point.
        Value::Raw(self.to_string())
    }
}

// ==================== FromValue ====================

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, String> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) | Value::Raw(s) => Ok(s),
            Value::Bytes(b) => String::from_utf8(b).map_err(|e| e.to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Timestamp(ts) => Ok(ts.format(TIMESTAMP_FORMAT).to_string()),
            Value::Date(d) => Ok(d.format(DATE_FORMAT).to_string()),
            other => Err(mismatch("String", &other)),
        }
    }
}

impl FromValue for Raw {
    fn from_value(value: Value) -> Result<Self, String> {
        String::from_value(value).map(Raw::new)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(v) => Ok(v != 0),
            Value::UInt(v) => Ok(v != 0),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "t" | "yes" => Ok(true),
                "0" | "false" | "f" | "no" => Ok(false),
                other => Err(format!("invalid boolean text '{other}'")),
            },
            other => Err(mismatch("bool", &other)),
        }
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self, String> {
                match value {
                    Value::Int(v) => <$t>::try_from(v).map_err(|e| e.to_string()),
                    Value::UInt(v) => <$t>::try_from(v).map_err(|e| e.to_string()),
                    Value::Bool(b) => Ok(if b { 1 } else { 0 }),
                    Value::Text(s) => s.trim().parse::<$t>().map_err(|e| e.to_string()),
                    other => Err(mismatch(stringify!($t), &other)),
                }
            }
        }
    )*};
}

int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            Value::UInt(v) => Ok(v as f64),
            Value::Text(s) => s.trim().parse::<f64>().map_err(|e| e.to_string()),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, String> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bytes(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            other => Err(mismatch("Vec<u8>", &other)),
        }
    }
}

impl FromValue for bytes::Bytes {
    fn from_value(value: Value) -> Result<Self, String> {
        Vec::<u8>::from_value(value).map(bytes::Bytes::from)
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            Value::Date(d) => Ok(d.and_time(chrono::NaiveTime::MIN).and_utc()),
            Value::Text(s) => parse_timestamp(&s),
            Value::Int(secs) => DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| format!("timestamp {secs} out of range")),
            other => Err(mismatch("DateTime<Utc>", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, String> {
        DateTime::<Utc>::from_value(value).map(|dt| dt.naive_utc())
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Date(d) => Ok(d),
            Value::Timestamp(ts) => Ok(ts.date_naive()),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .or_else(|_| parse_timestamp(&s).map(|ts| ts.date_naive()))
                .map_err(|_| format!("invalid date '{s}'")),
            other => Err(mismatch("NaiveDate", &other)),
        }
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) => uuid::Uuid::parse_str(s.trim()).map_err(|e| e.to_string()),
            Value::Bytes(b) => uuid::Uuid::from_slice(&b).map_err(|e| e.to_string()),
            other => Err(mismatch("Uuid", &other)),
        }
    }
}

#[cfg(feature = "json")]
impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Text(s) => serde_json::from_str(&s).map_err(|e| e.to_string()),
            Value::Bytes(b) => serde_json::from_slice(&b).map_err(|e| e.to_string()),
            other => serde_json::to_value(&other).map_err(|e| e.to_string()),
        }
    }
}

#[cfg(feature = "rust_decimal")]
impl FromValue for rust_decimal::Decimal {
    fn from_value(value: Value) -> Result<Self, String> {
        use std::str::FromStr;
        match value {
            Value::Text(s) | Value::Raw(s) => {
                rust_decimal::Decimal::from_str(s.trim()).map_err(|e| e.to_string())
            }
            Value::Int(v) => Ok(rust_decimal::Decimal::from(v)),
            Value::UInt(v) => Ok(rust_decimal::Decimal::from(v)),
            Value::Float(v) => rust_decimal::Decimal::try_from(v).map_err(|e| e.to_string()),
            other => Err(mismatch("Decimal", &other)),
        }
    }
}
