//! Command-line interface for modelgen.
//!
//! # Commands
//!
//! - `generate` - Render a generation request to stdout or into a directory
//! - `path` - Show how a path template expands for a model name
//! - `dump` - Print the explicit model(s) templates receive, for debugging
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config` / `-c` - Configuration file (default `~/.modelgen/config.toml`)
//!
//! Logs are written to stderr so stdout stays machine-readable. When
//! `RUST_LOG` is set it takes precedence over the flags.
//!
//! # Examples
//!
//! ```bash
//! # Print generated files as JSON
//! modelgen generate --input request.json
//!
//! # Write them below ./out, only for two models
//! modelgen generate --input request.yaml --output out --id a1 --id b2
//!
//! # Inspect what a template sees
//! modelgen dump --input request.json --id a1
//! ```

mod dump;
mod generate;
mod path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

/// Main CLI structure for modelgen.
#[derive(Parser, Debug)]
#[command(
    name = "modelgen",
    about = "Generate source files from data models and templates",
    version,
    long_about = "modelgen renders templates over abstract data models. Each model is expanded \
                  into an explicit model (name variants, field groups, access descriptors and \
                  resolved references) before being handed to the template engine."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render templates over models
    Generate(generate::GenerateCommand),

    /// Expand a path template for a model name
    Path(path::PathCommand),

    /// Print explicit models as JSON
    Dump(dump::DumpCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Installs the log subscriber, loads the configuration when the command
    /// needs one, and dispatches.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Generate(cmd) => {
                let config = GeneratorConfig::load_with_optional(self.config).await?;
                cmd.execute(config).await
            }
            Commands::Path(cmd) => cmd.execute(),
            Commands::Dump(cmd) => {
                let config = GeneratorConfig::load_with_optional(self.config).await?;
                cmd.execute(config).await
            }
        }
    }

    /// Log filter directive selected by the verbosity flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level())
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
