use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The kind of statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// CREATE / ALTER / DROP
    Ddl,
    /// Anything else
    Other,
}

impl QueryType {
    /// Detect the statement kind from its leading keyword.
    ///
    /// Leading whitespace, `--` line comments and `/* */` block comments are
    /// skipped; a leading `(` is looked through so `(SELECT ...) UNION ...`
    /// counts as a select.
    pub fn from_sql(sql: &str) -> Self {
        let head = strip_sql_prefix(sql);
        let keyword: String = head
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match keyword.as_str() {
            "SELECT" | "WITH" | "SHOW" => QueryType::Select,
            "INSERT" | "REPLACE" => QueryType::Insert,
            "UPDATE" => QueryType::Update,
            "DELETE" => QueryType::Delete,
            "CREATE" | "ALTER" | "DROP" | "TRUNCATE" => QueryType::Ddl,
            _ => QueryType::Other,
        }
    }
}

fn strip_sql_prefix(sql: &str) -> &str {
    let mut rest = sql;
    loop {
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = trimmed.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else if let Some(after) = trimmed.strip_prefix('(') {
            rest = after;
        } else {
            return trimmed;
        }
    }
}

/// What a hook sees about the statement about to run.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// SQL as compiled by the builder.
    pub sql: String,
    /// SQL handed to the executor, after any hook rewrites.
    pub exec_sql: String,
    /// Detected statement kind.
    pub query_type: QueryType,
    /// Optional query name/tag for identification.
    pub tag: Option<String>,
    /// Optional structured fields for observability (low-cardinality).
    pub fields: BTreeMap<String, String>,
}

impl QueryContext {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            exec_sql: sql.to_string(),
            query_type: QueryType::from_sql(sql),
            tag: None,
            fields: BTreeMap::new(),
        }
    }

    /// Add a tag to identify this query.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a structured field (low-cardinality).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Maximum length for error messages in `QueryResult::Error`.
const MAX_ERROR_LEN: usize = 512;

/// Outcome of a statement, as reported to hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Query returned rows.
    Rows(usize),
    /// Statement affected rows.
    Affected(u64),
    /// Statement failed (message truncated to 512 bytes).
    Error(String),
}

impl QueryResult {
    pub fn error(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.len() <= MAX_ERROR_LEN {
            return Self::Error(msg);
        }
        Self::Error(format!("{}...", super::truncate_sql_bytes(&msg, MAX_ERROR_LEN)))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Rows(n) => write!(f, "{n} rows"),
            QueryResult::Affected(n) => write!(f, "{n} affected"),
            QueryResult::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Action to take after a hook has inspected a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum HookAction {
    /// Run the statement as is.
    Continue,
    /// Run this SQL instead.
    ModifySql(String),
    /// Do not run the statement; the builder records `OrmError::Aborted`.
    Abort(String),
}

/// Callbacks around statement execution.
///
/// Hooks are injected per builder (or per [`Session`](crate::Session)) via
/// [`ExecConfig`](crate::ExecConfig); there is no global switch.
pub trait QueryHook: Send + Sync {
    /// Called before the statement reaches the executor.
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        let _ = ctx;
        HookAction::Continue
    }

    /// Called once the executor returned, successfully or not.
    fn after_query(&self, _ctx: &QueryContext, _duration: Duration, _result: &QueryResult) {}
}
