use libsystolic::{
    GridTopology,
    stimulus::{self, MAX_EXHAUSTIVE_CELLS},
    verify::Scenario,
};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::Config;

/// Builds every scenario the config asks for, in a stable order.
pub fn build(config: &Config) -> anyhow::Result<Vec<Scenario>> {
    let Config { rows, columns, .. } = *config;
    GridTopology::new(rows, columns)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Stimulus seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scenarios = Vec::new();

    if config.edge_cases {
        scenarios.extend(
            stimulus::edge_cases(rows, columns)
                .into_iter()
                .map(|(name, grid)| Scenario::new(format!("edge_{name}"), grid)),
        );
    }

    let cells = rows * columns;
    if cells <= config.exhaustive_max_cells.min(MAX_EXHAUSTIVE_CELLS) {
        let exhaustive = stimulus::exhaustive(rows, columns)?
            .enumerate()
            .map(|(n, grid)| Scenario::new(format!("exhaustive_{n}"), grid));
        scenarios.extend(exhaustive);
    } else if config.exhaustive_max_cells > 0 {
        info!("Skipping exhaustive enumeration, {cells} cells is above the limit");
    }

    for pattern in &config.patterns {
        match pattern.centered(rows, columns) {
            Ok(grid) => scenarios.push(Scenario::new(format!("pattern_{pattern}"), grid)),
            Err(e) => warn!("Skipping pattern: {e}"),
        }
    }

    for i in 0..config.weighted_scenarios {
        let grid = stimulus::weighted_rows(rows, columns, &mut rng);
        scenarios.push(Scenario::new(format!("weighted_{i}"), grid));
    }

    for i in 0..config.random_scenarios {
        let grid = stimulus::random(rows, columns, config.random_density, &mut rng);
        scenarios.push(Scenario::new(format!("random_{i}"), grid));
    }

    Ok(scenarios)
}
