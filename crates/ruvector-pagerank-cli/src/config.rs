//! Configuration for the `ruvector-pagerank` binary.
//!
//! Read from a TOML file given with `--config`; every section and key is
//! optional.
//!
//! ```toml
//! [engine]
//! max_iterations = 5000
//!
//! [logging]
//! filter = "ruvector_pagerank_bridge=debug"
//!
//! [output]
//! pretty = true
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ruvector_pagerank_bridge::engine::{PowerIterationEngine, DEFAULT_MAX_ITERATIONS};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference engine settings
    pub engine: EngineConfig,
    /// Log filter
    pub logging: LoggingConfig,
    /// Output rendering
    pub output: OutputConfig,
}

/// Reference engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iteration cap for both methods
    pub max_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber` env-filter directive; no subscriber when unset
    pub filter: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load config from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.engine.max_iterations == 0 {
            bail!("engine.max_iterations must be > 0");
        }
        if let Some(filter) = &self.logging.filter {
            if filter.trim().is_empty() {
                bail!("logging.filter must not be empty");
            }
        }
        Ok(())
    }

    /// Reference engine configured from `[engine]`.
    pub fn engine(&self) -> PowerIterationEngine {
        PowerIterationEngine::new().with_max_iterations(self.engine.max_iterations)
    }
}
