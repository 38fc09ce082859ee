use super::QueryBuilder;
use crate::client::{ExecOutcome, Executor};
use crate::error::{OrmError, OrmResult};
use crate::monitor::{CompositeHook, HookAction, QueryContext, QueryHook, QueryResult, QueryType};
use crate::record::Record;
use crate::row::Row;
use crate::scan;
use std::time::Instant;

/// A statement that passed validation and the `before_query` hooks.
struct Prepared<'h> {
    exec: &'h dyn Executor,
    ctx: QueryContext,
    hook: CompositeHook,
}

impl Prepared<'_> {
    fn finish(&self, started: Instant, result: &QueryResult) {
        self.hook.after_query(&self.ctx, started.elapsed(), result);
    }
}

impl<'h> QueryBuilder<'h> {
    fn prepare(&mut self) -> OrmResult<Prepared<'h>> {
        if let Some(err) = &self.state.error {
            return Err(err.clone());
        }
        if let Err(err) = self.validate() {
            return Err(self.fail(err));
        }
        let exec = match self.handle.executor() {
            Ok(exec) => exec,
            Err(err) => return Err(self.fail(err)),
        };

        let sql = self.to_sql();
        let mut ctx = QueryContext::new(&sql).with_field("handle", self.handle.kind());
        if let Some(tag) = &self.config.tag {
            ctx = ctx.with_tag(tag.clone());
        }

        #[cfg(feature = "tracing")]
        if self.is_unrestricted() {
            tracing::warn!(
                target: "fluentql.sql",
                sql = %sql,
                "statement has no WHERE predicates and applies to every row"
            );
        }

        let hook = self.config.composite_hook();
        match hook.before_query(&ctx) {
            HookAction::Continue => {}
            HookAction::ModifySql(sql) => {
                ctx.query_type = QueryType::from_sql(&sql);
                ctx.exec_sql = sql;
            }
            HookAction::Abort(reason) => return Err(self.fail(OrmError::Aborted(reason))),
        }

        Ok(Prepared { exec, ctx, hook })
    }

    async fn fetch_all(&mut self) -> OrmResult<Vec<Row>> {
        let prepared = self.prepare()?;
        let started = Instant::now();
        let result = prepared.exec.query(&prepared.ctx.exec_sql).await;
        match result {
            Ok(rows) => {
                prepared.finish(started, &QueryResult::Rows(rows.len()));
                Ok(rows)
            }
            Err(err) => {
                prepared.finish(started, &QueryResult::error(err.to_string()));
                Err(self.fail(err))
            }
        }
    }

    async fn fetch_opt(&mut self) -> OrmResult<Option<Row>> {
        let prepared = self.prepare()?;
        let started = Instant::now();
        let result = prepared.exec.query_opt(&prepared.ctx.exec_sql).await;
        match result {
            Ok(row) => {
                let count = usize::from(row.is_some());
                prepared.finish(started, &QueryResult::Rows(count));
                Ok(row)
            }
            Err(err) => {
                prepared.finish(started, &QueryResult::error(err.to_string()));
                Err(self.fail(err))
            }
        }
    }

    /// Execute a statement that returns no rows.
    ///
    /// Stores the generated key and affected row count, see
    /// [`last_insert_id`](Self::last_insert_id) and
    /// [`rows_affected`](Self::rows_affected).
    pub async fn run(&mut self) -> OrmResult<ExecOutcome> {
        let prepared = self.prepare()?;
        let started = Instant::now();
        let result = prepared.exec.execute(&prepared.ctx.exec_sql).await;
        match result {
            Ok(outcome) => {
                prepared.finish(started, &QueryResult::Affected(outcome.rows_affected));
                self.state.last_insert_id = outcome.last_insert_id;
                self.state.rows_affected = outcome.rows_affected;
                Ok(outcome)
            }
            Err(err) => {
                prepared.finish(started, &QueryResult::error(err.to_string()));
                Err(self.fail(err))
            }
        }
    }

    /// [`run`](Self::run), then write the generated key into `target`'s
    /// identity field.
    ///
    /// Types without an identity field are left untouched.
    pub async fn run_assign<T: Record>(&mut self, target: &mut T) -> OrmResult<ExecOutcome> {
        let outcome = self.run().await?;
        if let Some(id) = outcome.last_insert_id {
            target.set_identity(id);
        }
        Ok(outcome)
    }

    /// Run the query and return the raw rows.
    pub async fn scan_rows(&mut self) -> OrmResult<Vec<Row>> {
        self.state.scanned = 0;
        let rows = self.fetch_all().await?;
        self.state.scanned = rows.len();
        Ok(rows)
    }

    /// Run the query and decode every row into `T`.
    ///
    /// The first decode failure is stored and stops decoding.
    pub async fn scan<T: Record + Default + 'static>(&mut self) -> OrmResult<Vec<T>> {
        self.state.scanned = 0;
        let rows = self.fetch_all().await?;
        match scan::scan_rows::<T>(&rows) {
            Ok(items) => {
                self.state.scanned = items.len();
                Ok(items)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Run the query and decode the first row, if any.
    pub async fn scan_one<T: Record + Default + 'static>(&mut self) -> OrmResult<Option<T>> {
        self.state.scanned = 0;
        let Some(row) = self.fetch_opt().await? else {
            return Ok(None);
        };
        match scan::scan_row::<T>(&row) {
            Ok(item) => {
                self.state.scanned = 1;
                Ok(Some(item))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// `LIMIT 1` plus [`scan_one`](Self::scan_one); no row is
    /// [`OrmError::NotFound`].
    pub async fn first<T: Record + Default + 'static>(&mut self) -> OrmResult<T> {
        self.limit(1);
        match self.scan_one::<T>().await? {
            Some(item) => Ok(item),
            None => {
                let table = self.tables.join(", ");
                Err(self.fail(OrmError::not_found(format!("no row found in {table}"))))
            }
        }
    }

    /// Walk the result set one page at a time.
    ///
    /// Page `n` is fetched with `LIMIT size OFFSET n * size` and handed to
    /// `f`. Stops after the first empty page, or on the first error from the
    /// executor or from `f`. Returns the number of records seen.
    pub async fn chunk<T, F>(&mut self, size: u64, mut f: F) -> OrmResult<usize>
    where
        T: Record + Default + 'static,
        F: FnMut(Vec<T>) -> OrmResult<()>,
    {
        if size == 0 {
            return Err(self.fail(OrmError::config("chunk size must be greater than zero")));
        }
        let mut total = 0usize;
        let mut index = 0u64;
        loop {
            self.page(index, size);
            let items = self.scan::<T>().await?;
            if items.is_empty() {
                break;
            }
            total += items.len();
            if let Err(err) = f(items) {
                return Err(self.fail(err));
            }
            index += 1;
        }
        self.state.scanned = total;
        Ok(total)
    }

    /// [`chunk`](Self::chunk) with the page size from the builder's
    /// [`ExecConfig`](crate::ExecConfig).
    pub async fn chunk_default<T, F>(&mut self, f: F) -> OrmResult<usize>
    where
        T: Record + Default + 'static,
        F: FnMut(Vec<T>) -> OrmResult<()>,
    {
        let size = self.config.chunk_size;
        self.chunk(size, f).await
    }
}
