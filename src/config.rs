use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PreprocessError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Static filter list locations
    pub filters: FilterConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Log file settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Newline-delimited values that are never counted
    pub words_file: PathBuf,

    /// Newline-delimited package prefixes dropped when filtering is on
    pub packages_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File written inside the output directory
    pub file_name: String,

    /// Indent the output document
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,

    pub file_name: String,

    /// never, hourly or daily
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    Daily,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            words_file: PathBuf::from("words_to_filter.txt"),
            packages_file: PathBuf::from("packages_to_filter.txt"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "tuples.json".to_string(),
            pretty: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: "preprocess.log".to_string(),
            rotation: LogRotation::Never,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| PreprocessError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                let candidates = [
                    "Tuplemine.toml",
                    "tuplemine.toml",
                    ".tuplemine.toml",
                ];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}
