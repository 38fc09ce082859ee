//! The execution seam.
//!
//! The builder never talks to a database directly. It hands compiled SQL to
//! an [`Executor`], which a caller implements for their pool or transaction
//! type. Values are already inlined into the SQL, so an executor only ever
//! receives a complete statement.

use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use async_trait::async_trait;

/// Result of a mutating statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Key generated by the last `INSERT`, if the server reported one.
    pub last_insert_id: Option<u64>,
    pub rows_affected: u64,
}

impl ExecOutcome {
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            last_insert_id: None,
            rows_affected,
        }
    }

    pub fn inserted(last_insert_id: u64, rows_affected: u64) -> Self {
        Self {
            last_insert_id: Some(last_insert_id),
            rows_affected,
        }
    }
}

/// Something that can run SQL text: a pooled connection or a transaction.
///
/// Cancellation and timeouts are the executor's business; the builder has no
/// timeout of its own.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a statement and return all of its rows.
    async fn query(&self, sql: &str) -> OrmResult<Vec<Row>>;

    /// Run a statement and return its first row, if any.
    async fn query_opt(&self, sql: &str) -> OrmResult<Option<Row>> {
        Ok(self.query(sql).await?.into_iter().next())
    }

    /// Run a statement that does not return rows.
    async fn execute(&self, sql: &str) -> OrmResult<ExecOutcome>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for &E {
    async fn query(&self, sql: &str) -> OrmResult<Vec<Row>> {
        (**self).query(sql).await
    }

    async fn query_opt(&self, sql: &str) -> OrmResult<Option<Row>> {
        (**self).query_opt(sql).await
    }

    async fn execute(&self, sql: &str) -> OrmResult<ExecOutcome> {
        (**self).execute(sql).await
    }
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    async fn query(&self, sql: &str) -> OrmResult<Vec<Row>> {
        (**self).query(sql).await
    }

    async fn query_opt(&self, sql: &str) -> OrmResult<Option<Row>> {
        (**self).query_opt(sql).await
    }

    async fn execute(&self, sql: &str) -> OrmResult<ExecOutcome> {
        (**self).execute(sql).await
    }
}

/// Which execution handle a builder runs against.
///
/// Pool and transaction handles behave the same; the distinction is kept so
/// hooks and logs can tell them apart. Setting one replaces the other.
#[derive(Clone, Copy, Default)]
pub enum Handle<'h> {
    #[default]
    None,
    Pool(&'h dyn Executor),
    Tx(&'h dyn Executor),
}

impl<'h> Handle<'h> {
    pub fn is_none(&self) -> bool {
        matches!(self, Handle::None)
    }

    /// Short label used in hook context fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Handle::None => "none",
            Handle::Pool(_) => "pool",
            Handle::Tx(_) => "tx",
        }
    }

    /// The executor behind this handle.
    pub fn executor(&self) -> OrmResult<&'h dyn Executor> {
        match *self {
            Handle::Pool(exec) | Handle::Tx(exec) => Ok(exec),
            Handle::None => Err(OrmError::config(
                "no execution handle: call use_db() or use_tx() before running",
            )),
        }
    }
}

impl std::fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Handle::None => "Handle::None",
            Handle::Pool(_) => "Handle::Pool(..)",
            Handle::Tx(_) => "Handle::Tx(..)",
        })
    }
}
