//! In-crate executor double for unit tests.

use crate::client::{ExecOutcome, Executor};
use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use crate::value::Value;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every statement and serves queued row pages in order.
///
/// Once the queue is empty, queries return no rows.
#[derive(Default)]
pub struct MockExecutor {
    pub statements: Mutex<Vec<String>>,
    pages: Mutex<VecDeque<Vec<Row>>>,
    outcome: Mutex<ExecOutcome>,
    failure: Mutex<Option<String>>,
    healthy_calls: Mutex<usize>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, rows: Vec<Row>) -> Self {
        self.pages.lock().unwrap().push_back(rows);
        self
    }

    pub fn with_outcome(self, outcome: ExecOutcome) -> Self {
        *self.outcome.lock().unwrap() = outcome;
        self
    }

    pub fn failing(self, message: &str) -> Self {
        self.failing_after(0, message)
    }

    /// Serve `calls` statements normally, then fail every one after.
    pub fn failing_after(self, calls: usize, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        *self.healthy_calls.lock().unwrap() = calls;
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) -> OrmResult<()> {
        let calls = {
            let mut statements = self.statements.lock().unwrap();
            statements.push(sql.to_string());
            statements.len()
        };
        match self.failure.lock().unwrap().as_ref() {
            Some(msg) if calls > *self.healthy_calls.lock().unwrap() => {
                Err(OrmError::execution(msg))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn query(&self, sql: &str) -> OrmResult<Vec<Row>> {
        self.record(sql)?;
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn execute(&self, sql: &str) -> OrmResult<ExecOutcome> {
        self.record(sql)?;
        Ok(*self.outcome.lock().unwrap())
    }
}

/// Rows sharing one column list, as a driver would return them.
pub fn rows(columns: &[&str], values: Vec<Vec<Value>>) -> Vec<Row> {
    let columns: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
    values
        .into_iter()
        .map(|v| Row::new(Arc::clone(&columns), v))
        .collect()
}
