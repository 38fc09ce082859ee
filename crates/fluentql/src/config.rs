use crate::monitor::{CompositeHook, QueryHook};
use std::sync::Arc;

/// Default page size for [`ExecConfig::chunk_size`].
pub const DEFAULT_CHUNK_SIZE: u64 = 500;

/// Execution settings shared by builders.
///
/// Holds the injected hooks, an optional tag that identifies statements in
/// hook contexts and logs, and the default page size for
/// [`QueryBuilder::chunk_default`](crate::QueryBuilder::chunk_default).
#[derive(Clone)]
pub struct ExecConfig {
    pub hooks: Vec<Arc<dyn QueryHook>>,
    pub tag: Option<String>,
    pub chunk_size: u64,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            hooks: Vec::new(),
            tag: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook<H: QueryHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn with_hook_arc(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = size;
        self
    }

    /// Attach a [`TracingSqlHook`](crate::monitor::TracingSqlHook) with
    /// default settings.
    #[cfg(feature = "tracing")]
    pub fn with_tracing(self) -> Self {
        self.with_hook(crate::monitor::TracingSqlHook::new())
    }

    /// All hooks folded into one, in registration order.
    pub(crate) fn composite_hook(&self) -> CompositeHook {
        self.hooks
            .iter()
            .fold(CompositeHook::new(), |acc, h| acc.add_arc(Arc::clone(h)))
    }
}

impl std::fmt::Debug for ExecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecConfig")
            .field("hooks", &self.hooks.len())
            .field("tag", &self.tag)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}
