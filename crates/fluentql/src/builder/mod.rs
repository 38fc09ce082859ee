//! Fluent statement builder.
//!
//! A [`QueryBuilder`] is created for one statement kind, configured through
//! chained `&mut self` calls, compiled with [`QueryBuilder::to_sql`] and run
//! with one of the async terminal methods.
//!
//! ```rust
//! use fluentql::QueryBuilder;
//!
//! let mut qb = QueryBuilder::read("users");
//! qb.where_eq("name", "hello").or().where_eq("type", "3");
//! assert_eq!(
//!     qb.to_sql(),
//!     "SELECT * FROM users WHERE 1 AND name = 'hello' OR type = '3'"
//! );
//! ```
//!
//! ## Design
//!
//! - Values are rendered inline as SQL literals; no placeholders are used.
//! - Predicates carry their own connective. `or()` / `and_not()` affect the
//!   next predicate only.
//! - Errors do not interrupt the chain. The first one is stored and returned
//!   by every terminal method; [`QueryBuilder::error`] exposes it.

mod clauses;
mod compile;
mod exec;
mod table;

pub use table::ForeignKeyAction;

use crate::client::{Executor, Handle};
use crate::clause::ClauseList;
use crate::config::ExecConfig;
use crate::error::OrmError;
use crate::monitor::QueryHook;
use crate::row::RowValues;
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// Statement kind, fixed when the builder is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Read,
    Create,
    Update,
    Delete,
    DefineTable,
    Custom,
}

/// Results of the last terminal call.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ResultState {
    pub last_insert_id: Option<u64>,
    pub rows_affected: u64,
    pub scanned: usize,
    pub error: Option<OrmError>,
}

/// Builder for a single SQL statement.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'h> {
    kind: QueryKind,
    tables: Vec<String>,
    columns: Vec<String>,
    joins: Vec<String>,
    wheres: ClauseList,
    group_by: Vec<String>,
    having: String,
    order_by: Vec<String>,
    constraints: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    rows: Vec<RowValues>,
    raw_sql: String,
    handle: Handle<'h>,
    config: ExecConfig,
    state: ResultState,
}

impl<'h> QueryBuilder<'h> {
    /// Empty builder of the given kind.
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            tables: Vec::new(),
            columns: Vec::new(),
            joins: Vec::new(),
            wheres: ClauseList::new(),
            group_by: Vec::new(),
            having: String::new(),
            order_by: Vec::new(),
            constraints: Vec::new(),
            limit: None,
            offset: None,
            rows: Vec::new(),
            raw_sql: String::new(),
            handle: Handle::None,
            config: ExecConfig::default(),
            state: ResultState::default(),
        }
    }

    fn with_table(kind: QueryKind, table: &str) -> Self {
        let mut qb = Self::new(kind);
        qb.table(table);
        qb
    }

    /// `SELECT` builder.
    pub fn read(table: &str) -> Self {
        Self::with_table(QueryKind::Read, table)
    }

    /// `INSERT` builder.
    pub fn create(table: &str) -> Self {
        Self::with_table(QueryKind::Create, table)
    }

    /// `UPDATE` builder.
    pub fn update(table: &str) -> Self {
        Self::with_table(QueryKind::Update, table)
    }

    /// `DELETE` builder.
    pub fn delete(table: &str) -> Self {
        Self::with_table(QueryKind::Delete, table)
    }

    /// `CREATE TABLE` builder.
    pub fn define_table(table: &str) -> Self {
        Self::with_table(QueryKind::DefineTable, table)
    }

    /// Builder that runs `sql` verbatim.
    pub fn custom(sql: impl Into<String>) -> Self {
        let mut qb = Self::new(QueryKind::Custom);
        qb.raw_sql = sql.into();
        qb
    }

    /// Append a table (or `table alias`) to the statement.
    pub fn table(&mut self, table: &str) -> &mut Self {
        self.tables.push(table.to_string());
        self
    }

    // ==================== Execution settings ====================

    /// Run against a pooled connection. Clears any transaction handle.
    pub fn use_db(&mut self, db: &'h dyn Executor) -> &mut Self {
        self.handle = Handle::Pool(db);
        self
    }

    /// Run inside a transaction. Clears any pool handle.
    pub fn use_tx(&mut self, tx: &'h dyn Executor) -> &mut Self {
        self.handle = Handle::Tx(tx);
        self
    }

    pub(crate) fn use_handle(&mut self, handle: Handle<'h>) -> &mut Self {
        self.handle = handle;
        self
    }

    /// Replace the execution settings.
    pub fn config(&mut self, config: ExecConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Add a hook for this builder only.
    pub fn hook<H: QueryHook + 'static>(&mut self, hook: H) -> &mut Self {
        self.config.hooks.push(Arc::new(hook));
        self
    }

    /// Tag statements from this builder in hook contexts and logs.
    pub fn tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.config.tag = Some(tag.into());
        self
    }

    // ==================== Accessors ====================

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn handle(&self) -> Handle<'h> {
        self.handle
    }

    /// Rows waiting to be written.
    pub fn rows(&self) -> &[RowValues] {
        &self.rows
    }

    /// The first error recorded by this builder.
    pub fn error(&self) -> Option<&OrmError> {
        self.state.error.as_ref()
    }

    /// Key generated by the last `INSERT`.
    pub fn last_insert_id(&self) -> Option<u64> {
        self.state.last_insert_id
    }

    /// Rows changed by the last mutating statement.
    pub fn rows_affected(&self) -> u64 {
        self.state.rows_affected
    }

    /// Records produced by the last scan.
    pub fn scanned(&self) -> usize {
        self.state.scanned
    }

    /// Record `err` unless an earlier error is already stored, and hand back
    /// the stored one.
    pub(crate) fn fail(&mut self, err: OrmError) -> OrmError {
        self.state.error.get_or_insert(err).clone()
    }
}

impl QueryBuilder<'static> {
    /// Detached builder for nested clauses (groups, joins, `HAVING`,
    /// sub-selects).
    pub fn clause() -> Self {
        Self::new(QueryKind::Read)
    }
}
