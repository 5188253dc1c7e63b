//! Cv command: cross-validate one configured regressor.

use anyhow::{Context, Result};
use proxima_knn::{KnnRegressor, standardize};
use tracing::{info, info_span};

use crate::cli::CvArgs;
use crate::config;
use crate::convert;
use crate::load::{load_dataset, resolve_folds};

/// Run cross-validation for the `[knn]` configuration.
pub fn run(args: CvArgs) -> Result<()> {
    let _cmd = info_span!("cv").entered();
    let config = config::load(&args.config)?;

    let mut dataset = load_dataset(&config, args.data.as_deref())?;
    if args.standardize {
        info!("standardizing features");
        dataset = standardize(&dataset);
    }

    let knn_cfg = convert::build_knn_config(&config.knn)?;
    let folds = resolve_folds(args.folds.unwrap_or(config.tune.folds), dataset.len());
    info!(%knn_cfg, folds, "cross-validating");

    let regressor = KnnRegressor::new(knn_cfg);
    let cv = regressor
        .cross_validate(&dataset, folds)
        .with_context(|| format!("cross-validation failed for {knn_cfg}"))?;

    println!("{knn_cfg}");
    println!("{:>5} {:>7} {:>6} {:>12} {:>10}", "fold", "train", "test", "mae", "ms");
    for fold in cv.folds() {
        println!(
            "{:>5} {:>7} {:>6} {:>12.6} {:>10.3}",
            fold.fold(),
            fold.n_train(),
            fold.n_validation(),
            fold.mae(),
            fold.elapsed().as_secs_f64() * 1e3
        );
    }
    println!(
        "error {:.6} over {} folds ({:.3} ms total)",
        cv.error(),
        cv.n_folds(),
        cv.total_elapsed().as_secs_f64() * 1e3
    );

    Ok(())
}
