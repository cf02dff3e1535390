use clap::Parser;
use std::path::PathBuf;
use anyhow::Result;
use tracing::info;

use crate::core::{Engine, PipelineOptions, ValueType};

#[derive(Parser)]
#[command(name = "tuplemine")]
#[command(about = "Aggregates call-site argument values from extracted method-call chunks")]
#[command(version)]
pub struct Cli {
    /// Directory containing the parsed chunk files
    #[arg(long)]
    pub input: PathBuf,

    /// Directory where tuples.json is written (created if missing)
    #[arg(long)]
    pub output: PathBuf,

    /// Primitive type to export (only string is supported)
    #[arg(long = "type", default_value = "string")]
    pub value_type: String,

    /// Drop tuples whose signature belongs to tests, assertions or filtered packages
    #[arg(long)]
    pub filter: bool,

    /// Include generic type arguments in signatures
    #[arg(long)]
    pub use_generics: bool,

    /// Fill each entry's token list from its signature
    #[arg(long)]
    pub tokenize: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            value_type: ValueType::from(self.value_type.as_str()),
            filter_signatures: self.filter,
            use_generics: self.use_generics,
            tokenize: self.tokenize,
        }
    }

    pub fn execute(self, engine: Engine) -> Result<()> {
        let options = self.pipeline_options();
        let summary = engine.run(&self.input, &self.output, &options)?;

        info!(
            "Done: {} signatures from {} files",
            summary.signatures, summary.walk.files_seen
        );
        Ok(())
    }
}
