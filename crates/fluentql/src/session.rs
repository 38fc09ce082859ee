use crate::builder::QueryBuilder;
use crate::client::{Executor, Handle};
use crate::config::ExecConfig;

/// An execution handle paired with shared settings.
///
/// Every builder handed out by a session runs against the same handle and
/// carries a copy of the session's [`ExecConfig`].
///
/// ```rust,ignore
/// let session = Session::pool(&pool).with_config(ExecConfig::new().with_tracing());
/// let users: Vec<User> = session.read("users").where_eq("active", true).scan().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Session<'h> {
    handle: Handle<'h>,
    config: ExecConfig,
}

impl<'h> Session<'h> {
    /// Session over a pooled connection.
    pub fn pool(db: &'h dyn Executor) -> Self {
        Self {
            handle: Handle::Pool(db),
            config: ExecConfig::default(),
        }
    }

    /// Session inside a transaction.
    pub fn tx(tx: &'h dyn Executor) -> Self {
        Self {
            handle: Handle::Tx(tx),
            config: ExecConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn handle(&self) -> Handle<'h> {
        self.handle
    }

    fn attach(&self, mut qb: QueryBuilder<'h>) -> QueryBuilder<'h> {
        qb.use_handle(self.handle).config(self.config.clone());
        qb
    }

    pub fn read(&self, table: &str) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::read(table))
    }

    pub fn create(&self, table: &str) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::create(table))
    }

    pub fn update(&self, table: &str) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::update(table))
    }

    pub fn delete(&self, table: &str) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::delete(table))
    }

    pub fn define_table(&self, table: &str) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::define_table(table))
    }

    pub fn custom(&self, sql: impl Into<String>) -> QueryBuilder<'h> {
        self.attach(QueryBuilder::custom(sql))
    }
}
