use super::{QueryBuilder, QueryKind};
use crate::bind::Bindable;
use crate::clause::Connective;
use crate::convert::ToValue;
use crate::record::FieldFilter;
use crate::row::RowValues;

impl<'h> QueryBuilder<'h> {
    // ==================== Projection ====================

    /// Append projected columns (or column definitions for `CREATE TABLE`).
    pub fn columns(&mut self, columns: &[&str]) -> &mut Self {
        self.columns.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    /// Project `COUNT(*) count` instead of the current columns.
    pub fn count(&mut self) -> &mut Self {
        self.columns = vec![crate::funcs::count("*", Some("count"))];
        self
    }

    // ==================== Joins ====================

    fn push_join<F>(&mut self, keyword: &str, table: &str, on: &str, extra: Option<F>) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        let mut join = format!("{keyword} {table} ON {on}");
        if let Some(f) = extra {
            let mut sub = QueryBuilder::clause();
            f(&mut sub);
            if !sub.wheres.is_empty() {
                join.push(' ');
                join.push_str(&sub.wheres.compile(true));
            }
        }
        self.joins.push(join);
        self
    }

    /// `JOIN table ON on`.
    pub fn join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join::<fn(&mut QueryBuilder<'static>)>("JOIN", table, on, None)
    }

    /// `JOIN table ON on <extra predicates>`.
    ///
    /// Predicates added in `f` are appended after `on`, each with its
    /// connective: `JOIN b ON a.id = b.a_id AND b.active = true`.
    pub fn join_with<F>(&mut self, table: &str, on: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        self.push_join("JOIN", table, on, Some(f))
    }

    pub fn left_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join::<fn(&mut QueryBuilder<'static>)>("LEFT JOIN", table, on, None)
    }

    pub fn left_join_with<F>(&mut self, table: &str, on: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        self.push_join("LEFT JOIN", table, on, Some(f))
    }

    pub fn right_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join::<fn(&mut QueryBuilder<'static>)>("RIGHT JOIN", table, on, None)
    }

    pub fn right_join_with<F>(&mut self, table: &str, on: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        self.push_join("RIGHT JOIN", table, on, Some(f))
    }

    /// `JOIN table USING(columns)`.
    pub fn join_using(&mut self, table: &str, using: &str) -> &mut Self {
        self.joins.push(format!("JOIN {table} USING({using})"));
        self
    }

    // ==================== Connectives ====================

    /// Join the next predicate with `OR`.
    pub fn or(&mut self) -> &mut Self {
        self.wheres.set_pending(Connective::Or);
        self
    }

    /// Join the next predicate with `AND` (the default).
    pub fn and(&mut self) -> &mut Self {
        self.wheres.set_pending(Connective::And);
        self
    }

    /// Join the next predicate with `AND NOT`.
    pub fn and_not(&mut self) -> &mut Self {
        self.wheres.set_pending(Connective::AndNot);
        self
    }

    // ==================== Predicates ====================

    fn compare(&mut self, field: &str, op: &str, value: impl ToValue) -> &mut Self {
        let literal = value.to_value().to_sql_literal();
        self.wheres.push(format!("{field} {op} {literal}"));
        self
    }

    /// `field = value`.
    pub fn where_eq(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, "=", value)
    }

    /// `id = value`.
    pub fn find(&mut self, id: impl ToValue) -> &mut Self {
        self.compare("id", "=", id)
    }

    /// `field != value`.
    pub fn where_not(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, "!=", value)
    }

    pub fn where_gt(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, ">", value)
    }

    pub fn where_gte(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, ">=", value)
    }

    pub fn where_lt(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, "<", value)
    }

    pub fn where_lte(&mut self, field: &str, value: impl ToValue) -> &mut Self {
        self.compare(field, "<=", value)
    }

    /// `field LIKE pattern`. The pattern is quoted but `%`/`_` are passed as is.
    pub fn where_like(&mut self, field: &str, pattern: impl ToValue) -> &mut Self {
        self.compare(field, "LIKE", pattern)
    }

    pub fn where_null(&mut self, field: &str) -> &mut Self {
        self.wheres.push(format!("{field} IS NULL"));
        self
    }

    pub fn where_not_null(&mut self, field: &str) -> &mut Self {
        self.wheres.push(format!("{field} IS NOT NULL"));
        self
    }

    /// `field BETWEEN low AND high`.
    pub fn where_between(
        &mut self,
        field: &str,
        low: impl ToValue,
        high: impl ToValue,
    ) -> &mut Self {
        let low = low.to_value().to_sql_literal();
        let high = high.to_value().to_sql_literal();
        self.wheres.push(format!("{field} BETWEEN {low} AND {high}"));
        self
    }

    /// `field IN (v1,v2,...)`.
    ///
    /// An empty list matches nothing and renders as `1=0`; a scalar is
    /// wrapped as a one-element list.
    pub fn where_in(&mut self, field: &str, values: impl ToValue) -> &mut Self {
        let literal = values.to_value().to_sql_literal();
        let predicate = if literal == "()" {
            "1=0".to_string()
        } else if literal.starts_with('(') {
            format!("{field} IN {literal}")
        } else {
            format!("{field} IN ({literal})")
        };
        self.wheres.push(predicate);
        self
    }

    /// `field IN (<SELECT built by f>)`.
    pub fn where_in_query<F>(&mut self, field: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        let mut sub = QueryBuilder::clause();
        f(&mut sub);
        self.wheres.push(format!("{field} IN ({})", sub.to_sql()));
        self
    }

    /// `field & with = value`.
    pub fn bitwise_and(&mut self, field: &str, with: i64, value: i64) -> &mut Self {
        self.wheres.push(format!("{field} & {with} = {value}"));
        self
    }

    /// `field | with = value`.
    pub fn bitwise_or(&mut self, field: &str, with: i64, value: i64) -> &mut Self {
        self.wheres.push(format!("{field} | {with} = {value}"));
        self
    }

    /// Append a predicate verbatim.
    pub fn where_raw(&mut self, sql: &str) -> &mut Self {
        self.wheres.push(sql);
        self
    }

    /// Parenthesised group of predicates built by `f`.
    ///
    /// The group takes this builder's pending connective; inside the
    /// parentheses the first predicate has none. An empty group adds nothing
    /// but still consumes the pending connective.
    pub fn where_group<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        let mut sub = QueryBuilder::clause();
        f(&mut sub);
        if sub.wheres.is_empty() {
            self.wheres.set_pending(Connective::And);
        } else {
            self.wheres.push(format!("({})", sub.wheres.compile(false)));
        }
        self
    }

    // ==================== Grouping & ordering ====================

    pub fn group_by(&mut self, clause: &str) -> &mut Self {
        self.group_by.push(clause.to_string());
        self
    }

    /// `HAVING` predicates built by `f`. Only rendered with a `GROUP BY`.
    pub fn having<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryBuilder<'static>),
    {
        let mut sub = QueryBuilder::clause();
        f(&mut sub);
        self.having = sub.wheres.compile(false);
        self
    }

    pub fn order_by(&mut self, clause: &str) -> &mut Self {
        self.order_by.push(clause.to_string());
        self
    }

    pub fn order_by_asc(&mut self, column: &str) -> &mut Self {
        self.order_by.push(format!("{column} ASC"));
        self
    }

    pub fn order_by_desc(&mut self, column: &str) -> &mut Self {
        self.order_by.push(format!("{column} DESC"));
        self
    }

    // ==================== Pagination ====================

    /// `LIMIT n`. Zero means no limit.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// `OFFSET n`. Zero is omitted.
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Page `index` (0-based) of `size` rows.
    pub fn page(&mut self, index: u64, size: u64) -> &mut Self {
        self.limit = Some(size);
        self.offset = Some(index.saturating_mul(size));
        self
    }

    // ==================== Row values ====================

    /// Replace the rows to write.
    pub fn fill(&mut self, rows: Vec<RowValues>) -> &mut Self {
        self.rows = rows;
        self
    }

    /// Set one column on the first row to write, creating the row if needed.
    pub fn set(&mut self, column: &str, value: impl ToValue) -> &mut Self {
        if self.rows.is_empty() {
            self.rows.push(RowValues::new());
        }
        self.rows[0].insert(column, value);
        self
    }

    fn bind_filtered<B: Bindable + ?Sized>(&mut self, value: &B, filter: FieldFilter) -> &mut Self {
        match value.bind_rows(&filter) {
            Ok(rows) => self.rows = rows,
            Err(err) => {
                self.rows.clear();
                self.fail(err);
            }
        }
        self
    }

    /// Row values from a record or a slice of records.
    ///
    /// Identity and skipped fields are left out. Failures are stored; see
    /// [`error`](Self::error).
    pub fn bind<B: Bindable + ?Sized>(&mut self, value: &B) -> &mut Self {
        self.bind_filtered(value, FieldFilter::All)
    }

    /// Like [`bind`](Self::bind), keeping only the named columns.
    pub fn bind_only<B: Bindable + ?Sized>(&mut self, value: &B, keys: &[&str]) -> &mut Self {
        self.bind_filtered(value, FieldFilter::only(keys))
    }

    /// Like [`bind`](Self::bind), dropping the named columns.
    pub fn bind_exclude<B: Bindable + ?Sized>(&mut self, value: &B, keys: &[&str]) -> &mut Self {
        self.bind_filtered(value, FieldFilter::exclude(keys))
    }

    pub(crate) fn is_write(&self) -> bool {
        matches!(self.kind, QueryKind::Create | QueryKind::Update)
    }
}
