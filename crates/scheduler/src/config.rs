//! Configuration system for the scheduling simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline report precision and output choices.
//! 2. **Structures:** Hierarchical config for general (tracing) and report settings.
//! 3. **Enums:** Report output format.
//!
//! Configuration is supplied as a JSON file or taken from `Config::default()`. The
//! quantum length is deliberately absent: it always comes from the command line.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Decimal places printed for averages.
    pub const PRECISION: usize = 2;

    /// Upper bound on report precision; more digits than this carry no information
    /// for averages of integer tick counts.
    pub const MAX_PRECISION: usize = 9;
}

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReportFormat {
    /// Two `Average ...: X.XX` lines on stdout.
    #[default]
    Text,
    /// A single JSON document with averages and per-process outcomes.
    #[serde(alias = "JSON", alias = "json")]
    Json,
}

/// Root configuration structure.
///
/// Every section is optional in the JSON source; missing sections and fields
/// fall back to their defaults.
///
/// # Example
///
/// ```
/// use rrsim_core::config::{Config, ReportFormat};
///
/// let json = r#"{
///     "general": { "trace_ticks": true },
///     "report": { "format": "Json", "per_process": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_ticks);
/// assert_eq!(config.report.format, ReportFormat::Json);
/// assert_eq!(config.report.precision, 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document.
    ///
    /// # Returns
    ///
    /// The configuration, or [`SimError::Config`] if the document is malformed
    /// or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_json(&text)
    }

    /// Checks value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.report.precision > defaults::MAX_PRECISION {
            return Err(SimError::Config(format!(
                "report.precision must be at most {}, got {}",
                defaults::MAX_PRECISION,
                self.report.precision
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Print every tick's scheduling events to stderr.
    #[serde(default)]
    pub trace_ticks: bool,
}

/// Report output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Text or JSON output
    #[serde(default)]
    pub format: ReportFormat,

    /// Append one line per process after the averages (text format only).
    #[serde(default)]
    pub per_process: bool,

    /// Decimal places for averages in text output
    #[serde(default = "ReportConfig::default_precision")]
    pub precision: usize,
}

impl ReportConfig {
    /// Returns the default number of decimal places.
    fn default_precision() -> usize {
        defaults::PRECISION
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            per_process: false,
            precision: defaults::PRECISION,
        }
    }
}
