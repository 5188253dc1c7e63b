//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use proxima_io::ReadOptions;
use proxima_knn::{DistanceCheck, KnnConfig, LpDistance, Weighting};

use crate::config::{DataToml, KnnToml};

/// Parses a distance name into the corresponding Lp variant.
pub fn parse_distance(s: &str) -> Result<LpDistance> {
    match s.to_lowercase().as_str() {
        "l1" | "1" | "manhattan" => Ok(LpDistance::L1),
        "l2" | "2" | "euclidean" => Ok(LpDistance::L2),
        "l3" | "3" => Ok(LpDistance::L3),
        "linf" | "infinity" | "inf" | "chebyshev" => Ok(LpDistance::Infinity),
        other => bail!("unknown distance: {other:?}"),
    }
}

/// Parses a weighting scheme name.
pub fn parse_weighting(s: &str) -> Result<Weighting> {
    match s.to_lowercase().as_str() {
        "uniform" => Ok(Weighting::Uniform),
        "weighted" => Ok(Weighting::Weighted),
        other => bail!("unknown weighting: {other:?}"),
    }
}

/// Parses a neighbor-search strategy name.
pub fn parse_check(s: &str) -> Result<DistanceCheck> {
    match s.to_lowercase().as_str() {
        "regular" => Ok(DistanceCheck::Regular),
        "efficient" => Ok(DistanceCheck::Efficient),
        other => bail!("unknown distance check: {other:?}"),
    }
}

/// Builds a validated [`KnnConfig`] from the TOML knn configuration.
pub fn build_knn_config(knn: &KnnToml) -> Result<KnnConfig> {
    let mut cfg = KnnConfig::new(knn.k)
        .with_distance(parse_distance(&knn.distance)?)
        .with_weighting(parse_weighting(&knn.weighting)?)
        .with_check(parse_check(&knn.check)?);
    if let Some(exclude) = knn.exclude_identical {
        cfg = cfg.with_exclude_identical(exclude);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds [`ReadOptions`] from the TOML data configuration.
pub fn build_read_options(data: &DataToml) -> ReadOptions {
    ReadOptions::default()
        .with_header(data.header)
        .with_target_column(data.target_column)
}
