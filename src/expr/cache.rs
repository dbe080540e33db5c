use std::collections::HashMap;
use std::sync::Arc;

use super::{compile, CompiledExpr};
use crate::error::ExprError;

/// Memoizes [`compile`] by exact source text.
///
/// Failed compilations are cached as well, so a broken curve is only parsed
/// once per document. Entries stay until [`ExprCache::retain`] or
/// [`ExprCache::clear`] drops them.
#[derive(Debug, Default)]
pub struct ExprCache {
    entries: HashMap<String, Result<Arc<CompiledExpr>, ExprError>>,
}

impl ExprCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `source`, compiling on first use.
    ///
    /// # Errors
    ///
    /// Returns the (cached) compile error for invalid expressions.
    pub fn get_or_compile(&mut self, source: &str) -> Result<Arc<CompiledExpr>, ExprError> {
        if let Some(entry) = self.entries.get(source) {
            return entry.clone();
        }
        let entry = compile(source).map(Arc::new);
        self.entries.insert(source.to_string(), entry.clone());
        entry
    }

    /// Number of distinct sources seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps only the entries whose source satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|source, _| keep(source));
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
