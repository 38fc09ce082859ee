use super::{QueryBuilder, QueryKind};
use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use std::fmt::Write;

impl QueryBuilder<'_> {
    /// Compile the statement.
    ///
    /// Compilation never fails; a builder that cannot produce a runnable
    /// statement is reported by [`validate`](Self::validate) instead. Calling
    /// this repeatedly yields the same SQL until the builder is changed.
    pub fn to_sql(&self) -> String {
        match self.kind {
            QueryKind::Read => self.select_sql(),
            QueryKind::Create => self.insert_sql(),
            QueryKind::Update => self.update_sql(),
            QueryKind::Delete => self.delete_sql(),
            QueryKind::DefineTable => self.create_table_sql(),
            QueryKind::Custom => self.raw_sql.clone(),
        }
    }

    /// Check that the builder holds enough to run.
    pub fn validate(&self) -> OrmResult<()> {
        if self.kind == QueryKind::Custom {
            if self.raw_sql.trim().is_empty() {
                return Err(OrmError::config("custom statement is empty"));
            }
            return Ok(());
        }
        if self.tables.is_empty() {
            return Err(OrmError::config("no table given"));
        }
        if self.is_write() && self.rows.first().is_none_or(|row| row.is_empty()) {
            return Err(OrmError::config("no values to write: call bind(), fill() or set()"));
        }
        if self.kind == QueryKind::DefineTable && self.columns.is_empty() {
            return Err(OrmError::config("CREATE TABLE needs at least one field"));
        }
        Ok(())
    }

    fn where_tail(&self, out: &mut String) {
        if !self.wheres.is_empty() {
            out.push_str(" WHERE 1 ");
            out.push_str(&self.wheres.compile(true));
        }
    }

    fn select_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.tables.join(", "));

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        self.where_tail(&mut sql);

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
            if !self.having.is_empty() {
                sql.push_str(" HAVING ");
                sql.push_str(&self.having);
            }
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            let _ = write!(sql, " LIMIT {limit}");
        }
        if let Some(offset) = self.offset.filter(|n| *n > 0) {
            let _ = write!(sql, " OFFSET {offset}");
        }

        sql
    }

    /// Column order comes from the first row; other rows are read by key, a
    /// missing key rendering as `NULL`.
    fn insert_sql(&self) -> String {
        let table = self.tables.first().map(String::as_str).unwrap_or_default();
        let keys: Vec<&str> = self
            .rows
            .first()
            .map(|row| row.keys().collect())
            .unwrap_or_default();

        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let values: Vec<String> = keys
                    .iter()
                    .map(|k| row.get(k).unwrap_or(&Value::Null).to_sql_literal())
                    .collect();
                format!("({})", values.join(", "))
            })
            .collect();

        format!(
            "INSERT INTO {table}({}) VALUES{}",
            keys.join(", "),
            tuples.join(", ")
        )
    }

    fn update_sql(&self) -> String {
        let assignments: Vec<String> = self
            .rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|(k, v)| format!("{k}={}", v.to_sql_literal()))
                    .collect()
            })
            .unwrap_or_default();

        let mut sql = format!(
            "UPDATE {} SET {}",
            self.tables.join(", "),
            assignments.join(", ")
        );
        // The first predicate never carries its own connective.
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE 1 AND ");
            sql.push_str(&self.wheres.compile(false));
        }
        sql
    }

    fn delete_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.tables.join(", "));
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.compile(false));
        }
        sql
    }

    fn create_table_sql(&self) -> String {
        let defs: Vec<&str> = self
            .columns
            .iter()
            .chain(&self.constraints)
            .map(String::as_str)
            .collect();
        format!("CREATE TABLE {}({})", self.tables.join(", "), defs.join(", "))
    }

    /// `UPDATE`/`DELETE` that would touch every row.
    pub(crate) fn is_unrestricted(&self) -> bool {
        matches!(self.kind, QueryKind::Update | QueryKind::Delete) && self.wheres.is_empty()
    }
}
