//! Shared helpers for integration tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use modelgen::models::{Access, FieldSubtype, GenerationRequest, Model, TemplateInput};
use modelgen::test_utils::{FieldBuilder, ModelBuilder, template};

/// A temporary project directory holding requests, config and output.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Config file passed to every command; it does not exist until written
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Write a request as YAML for `.yaml`/`.yml` names and as JSON otherwise
    pub fn write_request(&self, name: &str, request: &GenerationRequest) -> Result<PathBuf> {
        let content = if name.ends_with(".yaml") || name.ends_with(".yml") {
            serde_yaml::to_string(request)?
        } else {
            serde_json::to_string_pretty(request)?
        };
        self.write_file(name, &content)
    }

    /// The modelgen binary, isolated from the user's config and environment
    pub fn modelgen_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("modelgen").unwrap();
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("MODELGEN_TIMEOUT_MS")
            .env_remove("MODELGEN_CACHE")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}

/// Users write posts; posts have a location and belong to a parent post.
pub fn blog_models() -> Vec<Model> {
    vec![
        ModelBuilder::new("u1", "User profile")
            .field(FieldBuilder::string("id").primary())
            .field(FieldBuilder::string("email").unique().label().searchable())
            .field(FieldBuilder::string("password hash").hidden())
            .access("create", Access::Admin)
            .access("update", Access::Owner)
            .build(),
        ModelBuilder::new("p1", "Blog post")
            .field(FieldBuilder::string("title").label().searchable())
            .field(FieldBuilder::entity("author", "u1").ownership())
            .field(FieldBuilder::entity("parent", "p1").nullable())
            .field(FieldBuilder::number("latitude", FieldSubtype::Latitude).searchable())
            .field(FieldBuilder::number("longitude", FieldSubtype::Longitude).searchable())
            .access("remove", Access::Owner)
            .build(),
    ]
}

/// Per-model struct files followed by a module index.
pub fn blog_request() -> GenerationRequest {
    GenerationRequest {
        templates: vec![
            template(
                "src/models/{snake}.rs",
                TemplateInput::One,
                "pub struct {{ model.names.pascal }} {\n\
                 {%- for field in model.fields.list %}\n    pub {{ field.names.snake }}: String,\n{%- endfor %}\n}\n",
            ),
            template(
                "src/models/mod.rs",
                TemplateInput::All,
                "{% for model in models %}pub mod {{ model.names.snake }};\n{% endfor %}",
            ),
        ],
        models: blog_models(),
        ids: None,
    }
}
