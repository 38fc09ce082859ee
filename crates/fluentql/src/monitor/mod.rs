//! Hooks around statement execution.
//!
//! A [`QueryHook`] sees every statement a builder runs: it can rewrite or
//! veto it before execution and observe the outcome afterwards. Hooks are
//! injected through [`ExecConfig`](crate::ExecConfig), never switched on
//! globally.
//!
//! # Example
//!
//! ```rust,ignore
//! use fluentql::monitor::{HookAction, QueryContext, QueryHook, StatsHook};
//! use fluentql::ExecConfig;
//! use std::sync::Arc;
//!
//! struct NoDrop;
//!
//! impl QueryHook for NoDrop {
//!     fn before_query(&self, ctx: &QueryContext) -> HookAction {
//!         if ctx.exec_sql.to_ascii_uppercase().starts_with("DROP") {
//!             return HookAction::Abort("DROP is not allowed".into());
//!         }
//!         HookAction::Continue
//!     }
//! }
//!
//! let stats = Arc::new(StatsHook::new());
//! let config = ExecConfig::new().with_hook(NoDrop).with_hook_arc(stats.clone());
//! ```

mod hooks;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;


pub use hooks::{CompositeHook, QueryStats, StatsHook};
pub use types::{HookAction, QueryContext, QueryHook, QueryResult, QueryType};

#[cfg(feature = "tracing")]
pub use tracing_hook::TracingSqlHook;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
