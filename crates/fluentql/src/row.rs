//! Result rows and row value maps.

use crate::convert::{FromValue, ToValue};
use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use std::sync::Arc;

/// One result row: a shared column list plus the values in column order.
///
/// Rows from the same result set share their `columns` allocation, which lets
/// the scanner resolve the column-to-field plan once per result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row. Missing trailing values read as `NULL`.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Convenience constructor for a one-off row.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value at `idx`, or the value of the named column.
    pub fn get<I: RowIndex>(&self, idx: I) -> Option<&Value> {
        let pos = idx.position(self)?;
        self.values.get(pos).or(Some(&Value::Null))
    }

    /// Decode a column into `T`.
    pub fn try_get<T: FromValue, I: RowIndex + std::fmt::Display + Copy>(
        &self,
        idx: I,
    ) -> OrmResult<T> {
        let value = self
            .get(idx)
            .ok_or_else(|| OrmError::decode(idx.to_string(), "no such column"))?;
        T::from_value(value.clone()).map_err(|e| OrmError::decode(idx.to_string(), e))
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), self.values.get(i).unwrap_or(&Value::Null)))
    }

    /// Render this row as a JSON object keyed by column name.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(k, v)| {
                let json = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
                (k.to_string(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Column lookup by position or by name.
pub trait RowIndex {
    fn position(&self, row: &Row) -> Option<usize>;
}

impl RowIndex for usize {
    fn position(&self, row: &Row) -> Option<usize> {
        (*self < row.columns.len()).then_some(*self)
    }
}

impl RowIndex for &str {
    fn position(&self, row: &Row) -> Option<usize> {
        row.columns.iter().position(|c| c == self)
    }
}

/// Column name to value map for one row to be written.
///
/// Keys keep their insertion order; it fixes the column order of the
/// compiled `INSERT`/`UPDATE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowValues {
    entries: Vec<(String, Value)>,
}

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn set(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing the value in place if the column exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl ToValue) {
        let column = column.into();
        let value = value.to_value();
        match self.entries.iter_mut().find(|(k, _)| *k == column) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: ToValue> FromIterator<(K, V)> for RowValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RowValues::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl<K: Into<String>, V: ToValue> Extend<(K, V)> for RowValues {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
