use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Proxima configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProximaConfig {
    /// RNG seed for the row shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataToml,

    /// Regressor settings for `cv`.
    #[serde(default)]
    pub knn: KnnToml,

    /// Grid search settings.
    #[serde(default)]
    pub tune: TuneToml,

    /// Search-strategy timing settings.
    #[serde(default)]
    pub timing: TimingToml,
}

fn default_seed() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub header: bool,
    #[serde(default)]
    pub target_column: Option<usize>,
    #[serde(default = "default_true")]
    pub shuffle: bool,
}

impl Default for DataToml {
    fn default() -> Self {
        Self {
            path: None,
            header: true,
            target_column: None,
            shuffle: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnnToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_distance")]
    pub distance: String,
    #[serde(default = "default_weighting")]
    pub weighting: String,
    #[serde(default = "default_check")]
    pub check: String,
    /// Skip training rows equal to the query. Unset follows the check.
    #[serde(default)]
    pub exclude_identical: Option<bool>,
}

impl Default for KnnToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            distance: default_distance(),
            weighting: default_weighting(),
            check: default_check(),
            exclude_identical: None,
        }
    }
}

fn default_k() -> usize {
    1
}
fn default_distance() -> String {
    "l2".to_string()
}
fn default_weighting() -> String {
    "uniform".to_string()
}
fn default_check() -> String {
    "regular".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuneToml {
    #[serde(default = "default_max_k")]
    pub max_k: usize,
    #[serde(default = "default_folds")]
    pub folds: usize,
}

impl Default for TuneToml {
    fn default() -> Self {
        Self {
            max_k: default_max_k(),
            folds: default_folds(),
        }
    }
}

fn default_max_k() -> usize {
    20
}
fn default_folds() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingToml {
    /// Fold counts to time; 0 means leave-one-out.
    #[serde(default = "default_fold_counts")]
    pub fold_counts: Vec<usize>,
}

impl Default for TimingToml {
    fn default() -> Self {
        Self {
            fold_counts: default_fold_counts(),
        }
    }
}

fn default_fold_counts() -> Vec<usize> {
    vec![0, 50, 10, 3]
}

/// Reads and parses the TOML file at `path`.
pub fn load(path: &Path) -> Result<ProximaConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
