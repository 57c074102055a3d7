//! Generation orchestrator.
//!
//! [`Generator::run`] turns templates and models into an ordered list of
//! generated files:
//!
//! - a one-mode template renders every selected model, in model order, and
//!   substitutes the model's name variants into its path
//! - an all-mode template renders the whole model set once, with its path
//!   used verbatim
//!
//! Results follow template order, then model order within one-mode templates.
//! Each run owns a fresh [`ExplicitCache`], so runs share no state and may
//! execute concurrently.
//!
//! # Failure
//!
//! The first failing template/model pair aborts the run and no partial output
//! is returned. Every render executes on tokio's blocking pool under the
//! configured time budget; a render that exceeds it fails the run with
//! [`GeneratorError::Timeout`]. The render thread itself cannot be
//! interrupted and finishes in the background.

use std::sync::Arc;
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::core::GeneratorError;
use crate::explicit::{ExplicitCache, explicit_all_models, explicit_model};
use crate::models::{GenerationRequest, GeneratorResult, Model, Template, TemplateInput};
use crate::names::NameVariants;
use crate::templating::{EngineRegistry, RenderEngine, RenderInput};

/// Substitute the name variants of `name` into a path template.
///
/// Without a name, or with an empty one, the path is returned unchanged.
/// Placeholders that are not variant keys are kept as written.
///
/// ```rust
/// use modelgen::generator::path;
///
/// assert_eq!(path("/x/{kebab}/y", Some("User Profile")), "/x/user-profile/y");
/// assert_eq!(path("/x/y", None), "/x/y");
/// ```
#[must_use]
pub fn path(raw: &str, name: Option<&str>) -> String {
    match name.filter(|name| !name.is_empty()) {
        Some(name) => NameVariants::new(name).substitute(raw),
        None => raw.to_string(),
    }
}

/// Runs templates over models through the registered render engines.
#[derive(Debug, Clone)]
pub struct Generator {
    engines: EngineRegistry,
    config: GeneratorConfig,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    /// Create a generator with the built-in engines.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            engines: EngineRegistry::with_defaults(config.autoescape),
            config,
        }
    }

    /// Create a generator with a custom engine registry.
    #[must_use]
    pub const fn with_engines(config: GeneratorConfig, engines: EngineRegistry) -> Self {
        Self {
            engines,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[must_use]
    pub const fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    pub fn engines_mut(&mut self) -> &mut EngineRegistry {
        &mut self.engines
    }

    /// Same as the free [`path`] function.
    #[must_use]
    pub fn path(&self, raw: &str, name: Option<&str>) -> String {
        path(raw, name)
    }

    /// Run a parsed request, honoring its `ids` restriction.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratorResult>, GeneratorError> {
        self.run(&request.templates, &request.models, request.ids.as_deref()).await
    }

    /// Render every template, in order.
    ///
    /// `for_ids` restricts one-mode templates to the listed model ids; all-mode
    /// templates always receive every model.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::UnknownEngine`] when a template names an unregistered engine
    /// - [`GeneratorError::Timeout`] when a render exceeds `timeout_ms`
    /// - [`GeneratorError::Evaluation`] when a template fails, with its path attached
    /// - [`GeneratorError::Internal`] when a render task dies unexpectedly
    pub async fn run(
        &self,
        templates: &[Template],
        models: &[Model],
        for_ids: Option<&[String]>,
    ) -> Result<Vec<GeneratorResult>, GeneratorError> {
        let mut cache = ExplicitCache::new(self.config.cache_enabled);
        let mut results = Vec::new();

        for template in templates {
            match template.input {
                TemplateInput::One => {
                    // Looked up on the first selected model only
                    let mut resolved: Option<Arc<dyn RenderEngine>> = None;

                    for model in models {
                        if for_ids.is_some_and(|ids| !ids.iter().any(|id| id == &model.id)) {
                            continue;
                        }

                        let engine = match resolved.take() {
                            Some(engine) => engine,
                            None => self.engines.get(&template.engine)?,
                        };
                        let explicit = explicit_model(models, model, &mut cache, 0);
                        let path = path(&template.path, Some(&model.name));
                        tracing::debug!("Generating {} for model '{}'", path, model.id);

                        let content = self
                            .render(Arc::clone(&engine), RenderInput::One(explicit), template)
                            .await?;
                        results.push(GeneratorResult {
                            path,
                            content,
                        });
                        resolved = Some(engine);
                    }
                }
                TemplateInput::All => {
                    let engine = self.engines.get(&template.engine)?;
                    let explicit = explicit_all_models(models, &mut cache);
                    tracing::debug!("Generating {} for {} model(s)", template.path, explicit.len());

                    let content = self
                        .render(Arc::clone(&engine), RenderInput::All(explicit), template)
                        .await?;
                    results.push(GeneratorResult {
                        path: path(&template.path, None),
                        content,
                    });
                }
            }
        }

        let (hits, misses) = cache.stats();
        tracing::debug!(
            "Explicit model cache: {} hits, {} misses ({:.1}% hit rate)",
            hits,
            misses,
            cache.hit_rate()
        );
        tracing::info!(
            "Generated {} file(s) from {} template(s) and {} model(s)",
            results.len(),
            templates.len(),
            models.len()
        );

        Ok(results)
    }

    /// Pretty JSON of the explicit model with `id`, or of every model.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidRequest`] when no model has `id`.
    pub fn dump(&self, models: &[Model], id: Option<&str>) -> Result<String, GeneratorError> {
        let mut cache = ExplicitCache::new(self.config.cache_enabled);

        let json = match id {
            Some(id) => {
                let model = models.iter().find(|model| model.id == id).ok_or_else(|| {
                    GeneratorError::InvalidRequest {
                        reason: format!("No model with id '{id}'"),
                    }
                })?;
                serde_json::to_string_pretty(&*explicit_model(models, model, &mut cache, 0))
            }
            None => serde_json::to_string_pretty(&explicit_all_models(models, &mut cache)),
        };

        json.map_err(GeneratorError::internal)
    }

    async fn render(
        &self,
        engine: Arc<dyn RenderEngine>,
        input: RenderInput,
        template: &Template,
    ) -> Result<String, GeneratorError> {
        let timeout_ms = self.config.timeout_ms;
        let owned = template.clone();
        let task = tokio::task::spawn_blocking(move || input.render(engine.as_ref(), &owned));

        match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
            Ok(Ok(rendered)) => rendered.map_err(|e| e.with_file(&template.path)),
            Ok(Err(join_error)) => {
                Err(GeneratorError::internal(format!("Render task failed: {join_error}")))
            }
            Err(_) => {
                tracing::debug!("Rendering {} exceeded {}ms", template.path, timeout_ms);
                Err(GeneratorError::Timeout {
                    timeout_ms,
                })
            }
        }
    }
}
