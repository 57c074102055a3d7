//! Print explicit models.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::generator::Generator;
use crate::models::GenerationRequest;

/// Print the explicit model of one model, or of all models, as JSON.
#[derive(Args, Debug)]
pub struct DumpCommand {
    /// Request file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    input: PathBuf,

    /// Only dump the model with this id
    #[arg(long, value_name = "MODEL_ID")]
    id: Option<String>,
}

impl DumpCommand {
    pub async fn execute(self, config: GeneratorConfig) -> Result<()> {
        let request = GenerationRequest::load(&self.input).await?;
        let json = Generator::new(config)
            .dump(&request.models, self.id.as_deref())
            .with_context(|| format!("Failed to dump models of {}", self.input.display()))?;
        println!("{json}");
        Ok(())
    }
}
