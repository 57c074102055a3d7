//! Render engines.
//!
//! A [`RenderEngine`] turns explicit models plus a [`Template`] into text. The
//! generator resolves each template's `engine` identifier through an
//! [`EngineRegistry`]; the built-in registry knows the [`TeraEngine`] under the
//! name `tera`, and callers may register their own engines next to it.
//!
//! Engines are synchronous. The generator runs every render on the blocking
//! thread pool and enforces the time budget itself, so an engine only has to
//! report evaluation failures through [`GeneratorError::Evaluation`].
//!
//! # Template context
//!
//! Tera templates see the camelCase serialization of the explicit model(s):
//!
//! - one-mode templates: `model` (and the short alias `m`)
//! - all-mode templates: `models` (and the short alias `m`)
//!
//! ```text
//! pub struct {{ model.names.pascal }} {
//! {%- for field in model.fields.list %}
//!     pub {{ field.names.snake }}: String,
//! {%- endfor %}
//! }
//! ```

mod filters;
mod tera_engine;

pub use filters::create_variant_filter;
pub use tera_engine::TeraEngine;

use std::collections::HashMap;
use std::sync::Arc;
use strsim::levenshtein;

use crate::core::GeneratorError;
use crate::explicit::ExplicitModel;
use crate::models::Template;

/// Maximum Levenshtein distance, as a percentage of the requested name, for
/// an engine name to be suggested.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// A template engine able to render explicit models.
pub trait RenderEngine: Send + Sync {
    /// Identifier templates use to select this engine.
    fn name(&self) -> &str;

    /// Render a one-mode template for a single model.
    fn render_one(&self, model: &ExplicitModel, template: &Template)
    -> Result<String, GeneratorError>;

    /// Render an all-mode template for the whole model set.
    fn render_all(
        &self,
        models: &[Arc<ExplicitModel>],
        template: &Template,
    ) -> Result<String, GeneratorError>;
}

/// What a single render call receives.
#[derive(Debug, Clone)]
pub enum RenderInput {
    One(Arc<ExplicitModel>),
    All(Vec<Arc<ExplicitModel>>),
}

impl RenderInput {
    pub fn render(
        &self,
        engine: &dyn RenderEngine,
        template: &Template,
    ) -> Result<String, GeneratorError> {
        match self {
            RenderInput::One(model) => engine.render_one(model, template),
            RenderInput::All(models) => engine.render_all(models, template),
        }
    }
}

/// Engines known to a generator, keyed by name.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn RenderEngine>>,
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry").field("engines", &self.names()).finish()
    }
}

impl EngineRegistry {
    /// Create a registry without any engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in engines.
    #[must_use]
    pub fn with_defaults(autoescape: bool) -> Self {
        let mut registry = Self::new();
        registry.register(TeraEngine::new(autoescape));
        registry
    }

    /// Register an engine under its own name.
    ///
    /// Returns the engine previously registered under that name, if any.
    pub fn register(&mut self, engine: impl RenderEngine + 'static) -> Option<Arc<dyn RenderEngine>> {
        let name = engine.name().to_string();
        tracing::debug!("Registering render engine '{}'", name);
        self.engines.insert(name, Arc::new(engine))
    }

    /// Look up an engine by name.
    ///
    /// Unknown names fail with [`GeneratorError::UnknownEngine`], carrying the
    /// closest registered name when one is similar enough.
    pub fn get(&self, name: &str) -> Result<Arc<dyn RenderEngine>, GeneratorError> {
        self.engines.get(name).cloned().ok_or_else(|| GeneratorError::UnknownEngine {
            engine: name.to_string(),
            suggestion: self.find_similar(name),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Registered engine names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn find_similar(&self, target: &str) -> Option<String> {
        let max_distance = (target.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
        self.names()
            .into_iter()
            .map(|name| (name, levenshtein(target, name)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by_key(|(_, distance)| *distance)
            .map(|(name, _)| name.to_string())
    }
}
