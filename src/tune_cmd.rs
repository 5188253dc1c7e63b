//! Tune command: grid search on raw and standardized features.

use anyhow::{Context, Result};
use proxima_knn::{SearchOutcome, SearchSpace, Trial, grid_search, standardize};
use serde::Serialize;
use tracing::{info, info_span};

use crate::cli::TuneArgs;
use crate::config;
use crate::convert;
use crate::load::{load_dataset, resolve_folds};

#[derive(Debug, Serialize)]
struct TuneReport {
    instances: usize,
    features: usize,
    folds: usize,
    check: String,
    raw: SearchReport,
    standardized: SearchReport,
}

#[derive(Debug, Serialize)]
struct SearchReport {
    best: TrialReport,
    trials: Vec<TrialReport>,
}

#[derive(Debug, Serialize)]
struct TrialReport {
    k: usize,
    distance: String,
    weighting: String,
    error: f64,
}

impl From<&Trial> for TrialReport {
    fn from(trial: &Trial) -> Self {
        let cfg = trial.config();
        Self {
            k: cfg.k(),
            distance: cfg.distance().to_string(),
            weighting: cfg.weighting().to_string(),
            error: trial.error(),
        }
    }
}

impl From<&SearchOutcome> for SearchReport {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            best: outcome.best().into(),
            trials: outcome.trials().iter().map(TrialReport::from).collect(),
        }
    }
}

/// Run the grid search and write the JSON report.
pub fn run(args: TuneArgs) -> Result<()> {
    let _cmd = info_span!("tune").entered();
    let config = config::load(&args.config)?;
    let dataset = load_dataset(&config, args.data.as_deref())?;

    let check = convert::parse_check(&config.knn.check)?;
    let folds = resolve_folds(config.tune.folds, dataset.len());
    let space = SearchSpace::default().with_max_k(config.tune.max_k);

    info!(grid = space.len(), folds, "searching raw features");
    let raw = grid_search(&dataset, &space, folds, check).context("grid search on raw data failed")?;

    info!(grid = space.len(), folds, "searching standardized features");
    let scaled = standardize(&dataset);
    let std = grid_search(&scaled, &space, folds, check)
        .context("grid search on standardized data failed")?;

    info!(best = %raw.best().config(), error = raw.best().error(), "raw best");
    info!(best = %std.best().config(), error = std.best().error(), "standardized best");

    let report = TuneReport {
        instances: dataset.len(),
        features: dataset.n_features(),
        folds,
        check: check.to_string(),
        raw: (&raw).into(),
        standardized: (&std).into(),
    };
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
