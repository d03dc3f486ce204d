use std::{env, fs, path::PathBuf, time::Instant};

use anyhow::{Context, bail};
use libsystolic::{
    Pattern,
    snapshot::SnapshotSave,
    verify::{Verifier, VerifyConfig},
};
use log::{error, info};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use report::Tally;
use serde::{Deserialize, Serialize};

mod report;
mod scenarios;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,

    /// Generation count, stall cadence and convergence handling for every scenario.
    pub verify: VerifyConfig,

    /// The number of uniform-random grids to run.
    pub random_scenarios: usize,

    /// Probability of a cell starting alive in the uniform-random grids.
    pub random_density: f64,

    /// The number of grids where every row gets its own density.
    pub weighted_scenarios: usize,

    /// Run the empty/full/checkerboard/lone-cell/frame grids.
    pub edge_cases: bool,

    /// Enumerate every possible grid when the array has at most this many cells.
    pub exhaustive_max_cells: usize,

    pub patterns: Vec<Pattern>,

    /// Fixed seed for the random generators. Picked at random and logged when absent.
    pub seed: Option<u64>,

    /// Write every scenario's observed generations under `snapshots/`.
    pub save_snapshots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 10,
            verify: VerifyConfig::default(),
            random_scenarios: 5,
            random_density: 0.5,
            weighted_scenarios: 5,
            edge_cases: true,
            exhaustive_max_cells: 12,
            patterns: Pattern::all(),
            seed: None,
            save_snapshots: false,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);

    let run_id = args
        .next()
        .and_then(|run_id| (&run_id != "-").then_some(run_id))
        .unwrap_or_else(|| chrono::Local::now().format("%Y%m%d").to_string());

    let config = if let Some(config_path) = args.next() {
        let config_serialized = fs::read(&config_path)
            .with_context(|| format!("Couldn't read config {config_path}"))?;
        serde_json::from_slice::<Config>(&config_serialized).context("Couldn't deserialize config")?
    } else {
        Config::default()
    };

    let scenarios = scenarios::build(&config)?;
    info!(
        "Run {run_id}: {} scenarios on a {}x{} array, up to {} generations each",
        scenarios.len(),
        config.rows,
        config.columns,
        config.verify.generations
    );

    let verifier = Verifier::new(config.verify);
    let started = Instant::now();

    // One engine per scenario, so they share nothing.
    let results = scenarios
        .par_iter()
        .map(|scenario| verifier.run(scenario))
        .collect::<Vec<_>>();

    let elapsed = started.elapsed();
    let mut tally = Tally::default();

    for result in &results {
        report::print_result(result, config.verify.generations, &mut tally);

        if !config.save_snapshots {
            continue;
        }

        if let Ok(outcome) = result {
            let path = PathBuf::from("snapshots").join(format!("{run_id}_{}.json", outcome.name));

            if let Err(e) = SnapshotSave::from_outcome(outcome).save(&path) {
                error!("Couldn't save snapshot {}: {e:?}", path.display());
            }
        }
    }

    report::print_summary(&tally, elapsed);

    if tally.failed > 0 {
        bail!("{} of {} scenarios failed", tally.failed, tally.total());
    }

    Ok(())
}
