//! Per-run cache of top-level explicit models.
//!
//! A generation run builds the explicit model of each model at most once and
//! hands out shared [`Arc`] handles afterwards. The cache lives for a single
//! run and is dropped with it, so changes to the input models are always
//! reflected in the next run.

use std::collections::HashMap;
use std::sync::Arc;

use super::ExplicitModel;

/// Cache of top-level explicit models keyed by model id.
///
/// Entries are write-once: a second insert for the same id keeps the first
/// value, so every lookup after the first build returns the identical object.
#[derive(Debug)]
pub struct ExplicitCache {
    enabled: bool,
    cache: HashMap<String, Arc<ExplicitModel>>,
    hits: usize,
    misses: usize,
}

impl Default for ExplicitCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExplicitCache {
    /// Create an empty cache.
    ///
    /// A disabled cache never stores anything and always misses.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, id: &str) -> Option<Arc<ExplicitModel>> {
        if let Some(model) = self.cache.get(id) {
            self.hits += 1;
            tracing::debug!("Explicit model cache hit for '{}'", id);
            Some(Arc::clone(model))
        } else {
            self.misses += 1;
            tracing::debug!("Explicit model cache miss for '{}'", id);
            None
        }
    }

    /// Store a built model and return the cached handle for its id.
    pub fn insert(&mut self, model: Arc<ExplicitModel>) -> Arc<ExplicitModel> {
        if !self.enabled {
            return model;
        }
        Arc::clone(self.cache.entry(model.id.clone()).or_insert(model))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hits and misses so far.
    #[must_use]
    pub const fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Hit rate as a percentage
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
