//! SQL expression helpers for projections.
//!
//! ```rust
//! use fluentql::{funcs, QueryBuilder};
//!
//! let mut qb = QueryBuilder::read("orders");
//! let spent = funcs::sum("total", Some("spent"));
//! qb.columns(&["user_id", spent.as_str()])
//!     .group_by("user_id");
//! assert_eq!(
//!     qb.to_sql(),
//!     "SELECT user_id, SUM(total) spent FROM orders GROUP BY user_id"
//! );
//! ```

use crate::builder::QueryBuilder;

fn aliased(expr: String, alias: Option<&str>) -> String {
    match alias {
        Some(alias) if !alias.is_empty() => format!("{expr} {alias}"),
        _ => expr,
    }
}

/// `COUNT(expr) [alias]`.
pub fn count(expr: &str, alias: Option<&str>) -> String {
    aliased(format!("COUNT({expr})"), alias)
}

/// `COUNT(DISTINCT expr) [alias]`.
pub fn count_distinct(expr: &str, alias: Option<&str>) -> String {
    aliased(format!("COUNT(DISTINCT {expr})"), alias)
}

/// `SUM(expr) [alias]`.
pub fn sum(expr: &str, alias: Option<&str>) -> String {
    aliased(format!("SUM({expr})"), alias)
}

/// `(<SELECT built by f>) alias`, for use as a derived table or column.
pub fn subquery<F>(f: F, alias: &str) -> String
where
    F: FnOnce(&mut QueryBuilder<'static>),
{
    let mut sub = QueryBuilder::clause();
    f(&mut sub);
    aliased(format!("({})", sub.to_sql()), Some(alias))
}
