//! Timing command: regular vs efficient neighbor search.

use anyhow::{Context, Result};
use proxima_knn::{DistanceCheck, SearchSpace, compare_checks, grid_search, standardize};
use tracing::{info, info_span, warn};

use crate::cli::TimingArgs;
use crate::config;
use crate::convert;
use crate::load::{load_dataset, resolve_folds};

/// Time both search strategies on standardized data across the configured
/// fold counts.
pub fn run(args: TimingArgs) -> Result<()> {
    let _cmd = info_span!("timing").entered();
    let config = config::load(&args.config)?;
    let dataset = load_dataset(&config, args.data.as_deref())?;
    let scaled = standardize(&dataset);

    let base = if args.no_tune {
        convert::build_knn_config(&config.knn)?
    } else {
        let folds = resolve_folds(config.tune.folds, scaled.len());
        let space = SearchSpace::default().with_max_k(config.tune.max_k);
        info!(grid = space.len(), folds, "tuning on standardized features");
        let outcome = grid_search(&scaled, &space, folds, DistanceCheck::Regular)
            .context("grid search on standardized data failed")?;
        *outcome.best().config()
    };
    info!(%base, "timing configuration");

    let n = scaled.len();
    let fold_counts: Vec<usize> = config
        .timing
        .fold_counts
        .iter()
        .copied()
        .filter(|&f| {
            let keep = f == 0 || (2..=n).contains(&f);
            if !keep {
                warn!(folds = f, instances = n, "skipping fold count");
            }
            keep
        })
        .collect();

    let timings =
        compare_checks(&scaled, &base, &fold_counts).context("timing comparison failed")?;

    println!("{base}");
    println!(
        "{:>6} {:>10} {:>12} {:>12} {:>12}",
        "folds", "check", "error", "total ms", "avg ms"
    );
    for t in &timings {
        let cv = t.result();
        println!(
            "{:>6} {:>10} {:>12.6} {:>12.3} {:>12.3}",
            t.folds(),
            t.check().to_string(),
            cv.error(),
            cv.total_elapsed().as_secs_f64() * 1e3,
            cv.average_elapsed().as_secs_f64() * 1e3
        );
    }

    Ok(())
}
