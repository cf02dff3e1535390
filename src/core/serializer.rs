use std::path::{Path, PathBuf};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::OutputConfig;
use crate::error::Result;
use super::aggregator::Aggregator;

/// What was written by a successful serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

/// Writes the aggregation result as a single JSON document
pub struct TupleWriter {
    file_name: String,
    pretty: bool,
}

impl TupleWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            file_name: config.file_name.clone(),
            pretty: config.pretty,
        }
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.file_name)
    }

    /// Create `output_dir` if needed and overwrite the output file inside it
    pub fn write(&self, aggregator: &Aggregator, output_dir: &Path) -> Result<OutputSummary> {
        std::fs::create_dir_all(output_dir)?;

        let content = if self.pretty {
            serde_json::to_vec_pretty(aggregator)?
        } else {
            serde_json::to_vec(aggregator)?
        };

        let path = self.output_path(output_dir);
        std::fs::write(&path, &content)?;

        Ok(OutputSummary {
            path,
            bytes: content.len(),
            sha256: calculate_hash(&content),
        })
    }
}

impl Default for TupleWriter {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}

fn calculate_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
