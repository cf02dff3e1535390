use std::path::Path;
use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use super::{
    keep_tuple, Aggregator, ChunkWalker, FilterLists, OutputSummary, PipelineOptions,
    TokenWeighter, TupleProcessor, TupleWriter, WalkStats,
};

/// Outcome of one preprocessing run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub walk: WalkStats,
    pub tuples_aggregated: usize,
    pub signatures: usize,
    pub output: OutputSummary,
}

/// Main orchestration engine: chunk directory in, `tuples.json` out
pub struct Engine {
    lists: FilterLists,
    writer: TupleWriter,
}

impl Engine {
    /// Create an engine, reading the filter lists named in the configuration
    pub fn new(config: Config) -> Result<Self> {
        let lists = FilterLists::from_config(&config.filters)
            .context("Failed to load filter lists")?;
        Ok(Self::with_filter_lists(config, lists))
    }

    pub fn with_filter_lists(config: Config, lists: FilterLists) -> Self {
        debug!("Loaded configuration: {:?}", config);
        let writer = TupleWriter::new(&config.output);
        Self { lists, writer }
    }

    pub fn run(&self, input: &Path, output: &Path, options: &PipelineOptions) -> Result<RunSummary> {
        info!("Input: {}", input.display());
        info!("Output: {}", output.display());
        info!(
            "Value type: {}, signature filtering: {}, generics: {}",
            options.value_type, options.filter_signatures, options.use_generics
        );

        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory {}", output.display()))?;

        let walker = ChunkWalker::new(input)
            .with_context(|| format!("Cannot read chunks from {}", input.display()))?;
        let processor = TupleProcessor::new(options, &self.lists);
        let mut aggregator = Aggregator::new();
        let mut tuples_aggregated = 0;

        info!("Processing tuples -- START");
        let walk = walker.walk(&mut aggregator, keep_tuple, |aggregator, tuple| {
            if processor.process(aggregator, tuple)? {
                tuples_aggregated += 1;
            }
            Ok(())
        });
        info!("Processing tuples -- DONE");

        info!(
            "{} files read ({} failed), {} tuples kept, {} aggregated into {} signatures",
            walk.files_seen,
            walk.files_failed,
            walk.tuples_kept,
            tuples_aggregated,
            aggregator.len()
        );

        if options.tokenize {
            TokenWeighter::new().apply(&mut aggregator);
        }

        let signatures = aggregator.len();
        let output = self.writer
            .write(&aggregator, output)
            .with_context(|| format!("Failed to write {}", self.writer.output_path(output).display()))?;

        info!("Wrote {} ({} bytes, sha256 {})", output.path.display(), output.bytes, output.sha256);

        Ok(RunSummary {
            walk,
            tuples_aggregated,
            signatures,
            output,
        })
    }
}
