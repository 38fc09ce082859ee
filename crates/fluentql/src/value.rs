//! SQL values and their literal rendering.
//!
//! Statements built by this crate carry their values inline: every value is
//! rendered into SQL text by [`Value::to_sql_literal`] at compile time. The
//! rendering is total; anything that has no SQL literal form becomes `NULL`.
//!
//! # Escaping
//!
//! Text is wrapped in single quotes and every `'` is replaced by `\'`. This
//! targets the MySQL flavour of string literals. It is **not** a complete
//! injection defence: a trailing backslash in the input, or servers running
//! with `NO_BACKSLASH_ESCAPES`, change how the literal is read. Callers that
//! feed untrusted input should validate it first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{self, Write};

/// Timestamp layout used for `DATETIME` literals.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout used for `DATE` literals.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that can be written into a statement or read back from a row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL `NULL`.
    #[default]
    Null,
    /// Verbatim SQL text, emitted without escaping (`NOW()`, column refs, ...).
    Raw(String),
    /// Character data.
    Text(String),
    /// Binary data, rendered as `X'..'`.
    Bytes(Vec<u8>),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Point in time, always held in UTC.
    Timestamp(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Parenthesised list of values, used by `IN (...)`.
    List(Vec<Value>),
}

/// A marker for SQL text that must be inserted unescaped.
///
/// ```
/// use fluentql::{raw, Value};
///
/// assert_eq!(Value::from(raw("NOW()")).to_sql_literal(), "NOW()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<Raw> for Value {
    fn from(raw: Raw) -> Self {
        Value::Raw(raw.0)
    }
}

/// Shorthand for [`Raw::new`].
pub fn raw(sql: impl Into<String>) -> Raw {
    Raw::new(sql)
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in decode error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Raw(_) => "raw",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::List(_) => "list",
        }
    }

    /// Render this value as an SQL literal.
    pub fn to_sql_literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    fn write_literal(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Raw(sql) => out.push_str(sql),
            Value::Text(s) => push_quoted(out, s),
            Value::Bytes(bytes) => {
                out.reserve(bytes.len() * 2 + 3);
                out.push_str("X'");
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                out.push('\'');
            }
            Value::Float(f) => match format_float(*f) {
                Some(text) => out.push_str(&text),
                None => out.push_str("NULL"),
            },
            Value::Timestamp(ts) => {
                push_quoted(out, &ts.format(TIMESTAMP_FORMAT).to_string());
            }
            Value::Date(d) => push_quoted(out, &d.format(DATE_FORMAT).to_string()),
            Value::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Value::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::List(items) => {
                out.push('(');
                let mut first = true;
                for item in items {
                    let text = item.to_sql_literal();
                    // Elements that render to nothing are dropped, not padded with NULL.
                    if text.is_empty() {
                        continue;
                    }
                    if !first {
                        out.push(',');
                    }
                    out.push_str(&text);
                    first = false;
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

/// Quote `s` as a string literal, escaping single quotes with a backslash.
pub fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    push_quoted(&mut out, s);
    out
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("\\'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
}

/// Fixed-notation rendering with the shortest digits that round-trip.
///
/// `Display` for `f64` never switches to exponent form, so `1e21` renders as
/// `1000000000000000000000`. Non-finite values have no literal and yield `None`.
fn format_float(f: f64) -> Option<String> {
    f.is_finite().then(|| f.to_string())
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Raw(s) | Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Timestamp(ts) => ts.serialize(serializer),
            Value::Date(d) => d.serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
