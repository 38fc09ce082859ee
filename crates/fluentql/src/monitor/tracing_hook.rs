use super::truncate_sql_bytes;
use super::types::{HookAction, QueryContext, QueryHook, QueryResult};
use std::time::Duration;
use tracing::Level;

/// Emits every statement as a `tracing` event with target `fluentql.sql`.
///
/// The statement is logged before it runs; the outcome and duration are
/// logged after it returns.
///
/// Enable via the crate feature: `fluentql = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingSqlHook {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingSqlHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl TracingSqlHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl QueryHook for TracingSqlHook {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        let sql = self.truncate_sql(&ctx.exec_sql);
        let tag = ctx.tag.as_deref().unwrap_or("-");
        let fields = tracing::field::debug(&ctx.fields);
        emit_at_level!(
            self.level,
            target: "fluentql.sql",
            query_type = ?ctx.query_type,
            tag,
            sql = %sql,
            fields = fields,
        );
        HookAction::Continue
    }

    fn after_query(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult) {
        let tag = ctx.tag.as_deref().unwrap_or("-");
        match result {
            QueryResult::Error(e) => tracing::warn!(
                target: "fluentql.sql",
                query_type = ?ctx.query_type,
                tag,
                ?duration,
                error = %e,
                "statement failed"
            ),
            ok => emit_at_level!(
                self.level,
                target: "fluentql.sql",
                query_type = ?ctx.query_type,
                tag,
                ?duration,
                result = %ok,
                "statement finished"
            ),
        }
    }
}
