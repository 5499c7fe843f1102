//! Configuration file handling.
//!
//! Settings come from an optional `config.toml` in the platform config
//! directory (or `--config <path>`). Every key has a default, so a missing
//! file is the same as an empty one.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Where the transaction and category snapshots live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub transactions: Option<PathBuf>,

    #[serde(default)]
    pub categories: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many categories the top-categories breakdown keeps.
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// An expense above this multiple of the mean expense is irregular.
    #[serde(default = "default_irregular_factor")]
    pub irregular_factor: Decimal,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_categories: default_top_categories(),
            irregular_factor: default_irregular_factor(),
        }
    }
}

fn default_top_categories() -> usize {
    5
}

fn default_irregular_factor() -> Decimal {
    Decimal::new(15, 1)
}

impl Config {
    /// Load from an explicit path (must exist) or from the default location
    /// (may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.analysis.top_categories == 0 {
            anyhow::bail!("analysis.top_categories must be at least 1");
        }
        Ok(config)
    }

    pub fn transactions_path(&self) -> Result<PathBuf> {
        match &self.data.transactions {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("transactions.json")),
        }
    }

    pub fn categories_path(&self) -> Result<PathBuf> {
        match &self.data.categories {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("categories.json")),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "budgetlens", "budgetlens")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
