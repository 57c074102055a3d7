//! Tera-backed render engine.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tera::{Context as TeraContext, Tera};

use super::RenderEngine;
use super::filters;
use crate::core::GeneratorError;
use crate::explicit::ExplicitModel;
use crate::models::Template;

/// Name Tera gives to templates rendered with `render_str`.
const ONE_OFF_TEMPLATE_NAME: &str = "__tera_one_off";

/// Position marker of Tera parse errors, e.g. ` --> 3:14`.
static POSITION_MARKER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"-->\s*(\d+):(\d+)"));

/// Render engine using [Tera](https://keats.github.io/tera/) syntax.
///
/// A fresh [`Tera`] instance is created for every render, so renders share no
/// state and the engine can be used from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct TeraEngine {
    autoescape: bool,
}

impl TeraEngine {
    pub const NAME: &'static str = "tera";

    /// Create an engine. With `autoescape`, interpolated values are HTML-escaped.
    #[must_use]
    pub const fn new(autoescape: bool) -> Self {
        Self {
            autoescape,
        }
    }

    fn render(&self, template: &Template, context: &TeraContext) -> Result<String, GeneratorError> {
        tracing::debug!("Rendering '{}' with tera", template.path);

        let mut tera = Tera::default();
        if self.autoescape {
            tera.autoescape_on(vec![ONE_OFF_TEMPLATE_NAME]);
        }
        tera.register_filter("variant", filters::create_variant_filter());

        tera.render_str(&template.content, context).map_err(|e| Self::evaluation_error(&e))
    }

    fn evaluation_error(error: &tera::Error) -> GeneratorError {
        let (line, column) = Self::extract_position_from_tera_error(error).unzip();
        GeneratorError::Evaluation {
            message: Self::format_tera_error(error),
            line,
            column,
            file: None,
        }
    }

    /// Extract `line:column` from a Tera error.
    ///
    /// Tera reports parse positions as ` --> line:column` somewhere in the
    /// error chain. Errors raised while rendering carry no position.
    fn extract_position_from_tera_error(error: &tera::Error) -> Option<(usize, usize)> {
        use std::error::Error;

        let re = POSITION_MARKER.as_ref().ok()?;
        let mut current: Option<&dyn Error> = Some(error);
        while let Some(err) = current {
            if let Some(caps) = re.captures(&err.to_string()) {
                let line = caps.get(1)?.as_str().parse::<usize>().ok()?;
                let column = caps.get(2)?.as_str().parse::<usize>().ok()?;
                return Some((line, column));
            }
            current = err.source();
        }
        None
    }

    /// Format a Tera error, walking its whole source chain.
    ///
    /// Internal template names like '__tera_one_off' are removed since they
    /// mean nothing to template authors.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }

        let messages: Vec<String> = all_messages
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|cleaned| {
                !cleaned.is_empty()
                    && cleaned != "Template rendering failed"
                    && cleaned != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join("\n  -> ")
        }
    }
}

impl RenderEngine for TeraEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render_one(
        &self,
        model: &ExplicitModel,
        template: &Template,
    ) -> Result<String, GeneratorError> {
        let value = serde_json::to_value(model).map_err(GeneratorError::internal)?;
        let mut context = TeraContext::new();
        context.insert("model", &value);
        context.insert("m", &value);
        self.render(template, &context)
    }

    fn render_all(
        &self,
        models: &[Arc<ExplicitModel>],
        template: &Template,
    ) -> Result<String, GeneratorError> {
        let value = serde_json::to_value(models).map_err(GeneratorError::internal)?;
        let mut context = TeraContext::new();
        context.insert("models", &value);
        context.insert("m", &value);
        self.render(template, &context)
    }
}
