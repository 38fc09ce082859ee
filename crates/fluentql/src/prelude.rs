//! Convenient imports for typical `fluentql` usage.
//!
//! ```ignore
//! use fluentql::prelude::*;
//! ```

pub use crate::{
    ExecConfig, ExecOutcome, Executor, FromValue, OrmError, OrmResult, QueryBuilder, Record, Row,
    RowValues, Session, ToValue, Value, funcs, raw,
};
