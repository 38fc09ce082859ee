//! # fluentql
//!
//! A fluent SQL statement builder with inline value serialization and
//! struct mapping.
//!
//! ## Features
//!
//! - **Fluent builder**: `SELECT` / `INSERT` / `UPDATE` / `DELETE` /
//!   `CREATE TABLE` assembled from chained calls
//! - **Inline literals**: values are rendered as escaped SQL literals, no
//!   placeholders (see [`value`] for the escaping rules and their limits)
//! - **Struct mapping**: `#[derive(Record)]` binds structs to rows for writes
//!   and scans rows back into structs for reads
//! - **Pagination**: `page()` and `chunk()` walk large result sets one page at
//!   a time
//! - **Pluggable execution**: bring your own pool or transaction by
//!   implementing [`Executor`]
//! - **Hooks**: inspect, rewrite or veto statements; `tracing` output via
//!   [`monitor::TracingSqlHook`]
//!
//! ## Example
//!
//! ```ignore
//! use fluentql::{QueryBuilder, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct User {
//!     id: u64,
//!     name: String,
//!     #[orm(column = "type")]
//!     kind: String,
//! }
//!
//! // SELECT * FROM users WHERE 1 AND name = 'hello' OR type = '3'
//! let users: Vec<User> = QueryBuilder::read("users")
//!     .use_db(&pool)
//!     .where_eq("name", "hello")
//!     .or()
//!     .where_eq("type", "3")
//!     .scan()
//!     .await?;
//!
//! // INSERT INTO users(name, type) VALUES('ann', 'admin')
//! let mut ann = User { name: "ann".into(), kind: "admin".into(), ..Default::default() };
//! QueryBuilder::create("users")
//!     .use_db(&pool)
//!     .bind(&ann)
//!     .run_assign(&mut ann)
//!     .await?;
//! ```

// Lets `#[derive(Record)]` output, which names `fluentql`, resolve inside
// this crate's own tests.
extern crate self as fluentql;

pub mod bind;
pub mod builder;
pub mod clause;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod funcs;
pub mod monitor;
pub mod prelude;
pub mod record;
pub mod row;
pub mod scan;
pub mod session;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use bind::Bindable;
pub use builder::{ForeignKeyAction, QueryBuilder, QueryKind};
pub use clause::{ClauseList, Connective, Predicate};
pub use client::{ExecOutcome, Executor, Handle};
pub use config::ExecConfig;
pub use convert::{FromValue, ToValue};
pub use error::{OrmError, OrmResult};
pub use monitor::{
    CompositeHook, HookAction, QueryContext, QueryHook, QueryResult, QueryStats, QueryType,
    StatsHook,
};
pub use record::{FieldDef, FieldFilter, FieldMapping, Record};
pub use row::{Row, RowValues};
pub use session::Session;
pub use value::{Raw, Value, raw};

#[cfg(feature = "tracing")]
pub use monitor::TracingSqlHook;

#[cfg(feature = "derive")]
pub use fluentql_derive::Record;
