//! Dataset loading shared by all commands.

use std::path::Path;

use anyhow::{Context, Result};
use proxima_io::read_dataset;
use proxima_knn::Dataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::ProximaConfig;
use crate::convert;

/// Reads the configured dataset, or `override_path` if given, and applies the
/// seeded shuffle when `[data].shuffle` is set.
pub fn load_dataset(config: &ProximaConfig, override_path: Option<&Path>) -> Result<Dataset> {
    let path = override_path
        .or(config.data.path.as_deref())
        .ok_or_else(|| anyhow::anyhow!("no dataset path: set [data].path in config or use --data"))?;
    let options = convert::build_read_options(&config.data);

    info!(path = %path.display(), "reading dataset");
    let dataset = read_dataset(path, &options)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;

    if config.data.shuffle {
        let mut rng = StdRng::seed_from_u64(config.seed);
        info!(seed = config.seed, "shuffling rows");
        return Ok(dataset.shuffled(&mut rng));
    }
    Ok(dataset)
}

/// Resolves a fold count where 0 stands for leave-one-out.
pub fn resolve_folds(folds: usize, n: usize) -> usize {
    if folds == 0 { n } else { folds }
}
