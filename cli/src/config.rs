//! Optional `qtree.toml` settings.

use std::path::Path;

use anyhow::Context;
use qtree::Tolerance;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub color: ColorConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

impl Config {
    /// Load configuration from `path`, or use defaults if it doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = Self::parse(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?;
            debug!(?config, "loaded config");
            Ok(config)
        } else {
            info!("No {} found, using default config", path.display());
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Settings for the color similarity used by `match`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorConfig {
    /// Largest per channel difference still counted as similar.
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

impl ColorConfig {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance(self.tolerance)
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> u8 {
    Tolerance::default().0
}

/// Defaults for queries that take a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Level used when a command doesn't give one.
    #[serde(default)]
    pub default_level: i32,
}
