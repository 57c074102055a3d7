//! Run a generation request.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::GeneratorConfig;
use crate::generator::Generator;
use crate::models::{GenerationRequest, GeneratorResult};

/// Render every template of a request.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Request file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    pub(super) input: PathBuf,

    /// Write generated files below this directory instead of printing JSON
    #[arg(short, long)]
    pub(super) output: Option<PathBuf>,

    /// Only generate one-mode templates for these model ids (repeatable)
    #[arg(long = "id", value_name = "MODEL_ID")]
    pub(super) ids: Vec<String>,
}

impl GenerateCommand {
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let request = GenerationRequest::load(&self.input).await?;
        let ids = if self.ids.is_empty() {
            request.ids.clone()
        } else {
            Some(self.ids)
        };

        let generator = Generator::new(config);
        let results = generator
            .run(&request.templates, &request.models, ids.as_deref())
            .await
            .with_context(|| format!("Generation failed for {}", self.input.display()))?;

        match self.output {
            Some(output_dir) => {
                write_results(&output_dir, &results).await?;
                println!(
                    "{} Generated {} file(s) in {}",
                    "✓".green(),
                    results.len(),
                    output_dir.display()
                );
            }
            None => {
                let json =
                    serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
                println!("{json}");
            }
        }

        Ok(())
    }
}

/// Write results below `output_dir`, creating parent directories.
///
/// Every path is validated before the first file is written.
async fn write_results(output_dir: &Path, results: &[GeneratorResult]) -> Result<()> {
    let targets = results
        .iter()
        .map(|result| resolve_output_path(output_dir, &result.path))
        .collect::<Result<Vec<_>>>()?;

    for (target, result) in targets.iter().zip(results) {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(target, &result.content)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tracing::debug!("Wrote {}", target.display());
    }

    Ok(())
}

/// Resolve a generated path below `output_dir`.
///
/// Generated paths must be relative and must not climb out of the output
/// directory through `..` components.
pub(super) fn resolve_output_path(output_dir: &Path, generated: &str) -> Result<PathBuf> {
    let path = Path::new(generated);

    if generated.is_empty() {
        bail!("Generated path is empty");
    }

    if path.is_absolute() {
        bail!(
            "Absolute paths are not allowed for generated files. \
             Path '{}' must be relative to the output directory.",
            generated
        );
    }

    let mut depth: i32 = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    bail!(
                        "Generated path '{}' escapes the output directory.",
                        generated
                    );
                }
            }
            Component::CurDir => {}
            _ => {
                bail!("Invalid path component in '{}'. Only relative paths are allowed.", generated);
            }
        }
    }

    Ok(output_dir.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_relative_paths() {
        let out = Path::new("out");
        assert_eq!(resolve_output_path(out, "src/user.rs").unwrap(), out.join("src/user.rs"));
        assert_eq!(resolve_output_path(out, "./a/../b.rs").unwrap(), out.join("./a/../b.rs"));
    }

    #[test]
    fn test_reject_escaping_paths() {
        let out = Path::new("out");
        assert!(resolve_output_path(out, "../secret.rs").is_err());
        assert!(resolve_output_path(out, "a/../../b.rs").is_err());
        assert!(resolve_output_path(out, "").is_err());

        #[cfg(unix)]
        assert!(resolve_output_path(out, "/etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_write_results_creates_directories() {
        let temp = TempDir::new().unwrap();
        let results = vec![
            GeneratorResult {
                path: "src/models/user.rs".into(),
                content: "pub struct User;".into(),
            },
            GeneratorResult {
                path: "index.rs".into(),
                content: "mod models;".into(),
            },
        ];

        write_results(temp.path(), &results).await.unwrap();

        let user = std::fs::read_to_string(temp.path().join("src/models/user.rs")).unwrap();
        assert_eq!(user, "pub struct User;");
        assert!(temp.path().join("index.rs").exists());
    }

    #[tokio::test]
    async fn test_write_results_validates_before_writing() {
        let temp = TempDir::new().unwrap();
        let results = vec![
            GeneratorResult {
                path: "ok.rs".into(),
                content: String::new(),
            },
            GeneratorResult {
                path: "../escape.rs".into(),
                content: String::new(),
            },
        ];

        assert!(write_results(temp.path(), &results).await.is_err());
        assert!(!temp.path().join("ok.rs").exists());
    }
}
