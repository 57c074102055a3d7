//! Raw input data for generation runs.
//!
//! These types describe what a caller hands to the generator: abstract
//! [`Model`]s (typed fields plus per-action access levels), [`Template`]s, and
//! the [`GenerationRequest`] bundling both. They are deserialized from JSON or
//! YAML and are never mutated by the generator; all derived data lives in the
//! [`explicit`](crate::explicit) view types.

mod access;
mod field;

pub use access::{Access, Accesses, KNOWN_ACTIONS};
pub use field::{Field, FieldSubtype, FieldType};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::core::GeneratorError;

/// An entity definition with fields and per-action access levels.
///
/// Entity fields reference other models by [`Model::id`]; self references and
/// cycles are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Opaque unique identifier
    pub id: String,
    /// Human name, used for name variants and path substitution
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub accesses: Accesses,
}

impl Model {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: Vec::new(),
            accesses: Accesses::new(),
        }
    }
}

/// Whether a template renders once per model or once for the whole model set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateInput {
    One,
    All,
}

/// A text template and the file path it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Output path, may contain `{variant}` placeholders for one-mode templates
    pub path: String,
    /// Identifier of the render engine, resolved against the engine registry
    pub engine: String,
    pub input: TemplateInput,
    #[serde(default)]
    pub content: String,
}

impl Template {
    pub fn new(
        path: impl Into<String>,
        engine: impl Into<String>,
        input: TemplateInput,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            engine: engine.into(),
            input,
            content: content.into(),
        }
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorResult {
    pub path: String,
    pub content: String,
}

/// Transport-agnostic generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub templates: Vec<Template>,
    pub models: Vec<Model>,
    /// Restricts one-mode generation to these model ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

/// Serialization format of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
}

impl RequestFormat {
    /// Pick the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => RequestFormat::Yaml,
            _ => RequestFormat::Json,
        }
    }
}

impl GenerationRequest {
    /// Parse a request document.
    pub fn parse(content: &str, format: RequestFormat) -> Result<Self, GeneratorError> {
        let parsed = match format {
            RequestFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            RequestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| GeneratorError::InvalidRequest {
            reason,
        })
    }

    /// Read and parse a request document, choosing the format from the extension.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read generation request from {}", path.display()))?;

        let request = Self::parse(&content, RequestFormat::from_path(path))
            .with_context(|| format!("Failed to parse generation request {}", path.display()))?;

        tracing::debug!(
            "Loaded request with {} template(s) and {} model(s)",
            request.templates.len(),
            request.models.len()
        );
        Ok(request)
    }
}
