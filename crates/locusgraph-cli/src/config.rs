//! CLI configuration: defaults, optional JSON file, then flag overrides.

use anyhow::{Context, Result};
use locusgraph_core::LocusScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the log level (`error` .. `trace`).
pub const LOG_ENV: &str = "LOCUSGRAPH_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub scheme: LocusScheme,
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Highlight selected and chained rows in table output.
    pub color: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scheme: LocusScheme::AllGenes,
            format: OutputFormat::Json,
            pretty: true,
            color: true,
        }
    }
}

/// Flag values that, when present, win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ViewOverrides {
    pub scheme: Option<String>,
    pub format: Option<OutputFormat>,
    pub compact: bool,
    pub no_color: bool,
}

impl ViewConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn apply(mut self, overrides: &ViewOverrides) -> Self {
        if let Some(scheme) = &overrides.scheme {
            self.scheme = LocusScheme::parse_lenient(scheme);
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if overrides.compact {
            self.pretty = false;
        }
        if overrides.no_color {
            self.color = false;
        }
        self
    }
}
