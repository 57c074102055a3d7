//! Expand a path template.

use anyhow::Result;
use clap::Args;

use crate::generator;

/// Print a path template with a model name's variants substituted.
#[derive(Args, Debug)]
pub struct PathCommand {
    /// Path template, e.g. `src/{kebab}.rs`
    raw: String,

    /// Model name to substitute; without it the path is printed unchanged
    #[arg(short, long)]
    name: Option<String>,
}

impl PathCommand {
    pub fn execute(self) -> Result<()> {
        println!("{}", generator::path(&self.raw, self.name.as_deref()));
        Ok(())
    }
}
