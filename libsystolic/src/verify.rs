//! Drives an engine through load → evolve → unload cycles and checks every unloaded generation
//! against the reference oracle.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cell::CellState,
    engine::{DEFAULT_PARALLEL_THRESHOLD, SystolicEngine},
    error::{ConfigError, Mismatch},
    grid::Grid,
    oracle::ReferenceOracle,
    rule::Rule,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub initial: Grid,
}

impl Scenario {
    pub fn new<S>(name: S, initial: Grid) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            initial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Maximum number of generations to evolve and check.
    pub generations: usize,

    /// Stop once a generation equals the one before it.
    pub stop_on_convergence: bool,

    /// Idle cycles before the first load.
    pub reset_cycles: usize,

    /// Insert a stall cycle after every evolve pulse and after every unload.
    pub stall_cycles: bool,

    pub parallel_tick_threshold: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            stop_on_convergence: true,
            reset_cycles: 5,
            stall_cycles: true,
            parallel_tick_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mismatch(#[from] Box<Mismatch>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    pub initial: Grid,

    /// Unloaded grids, one per generation run.
    pub history: Vec<Grid>,

    /// First generation that equaled its predecessor.
    pub converged_at: Option<usize>,

    pub cycles: u64,
}

impl Outcome {
    pub fn generations_run(&self) -> usize {
        self.history.len()
    }

    pub fn final_grid(&self) -> &Grid {
        self.history.last().unwrap_or(&self.initial)
    }

    pub fn final_alive(&self) -> usize {
        self.final_grid().count_cells(CellState::Alive)
    }
}

pub struct Verifier {
    pub config: VerifyConfig,
    pub oracle: ReferenceOracle,

    /// Rule loaded into the engine under test. Normally the oracle's rule.
    pub engine_rule: Rule,
}

impl Verifier {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            config,
            oracle: ReferenceOracle::default(),
            engine_rule: Rule::default(),
        }
    }

    /// Replaces the oracle and configures the engine with the same rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.oracle = ReferenceOracle::new(rule.clone());
        self.engine_rule = rule;
        self
    }

    pub fn with_engine_rule(mut self, rule: Rule) -> Self {
        self.engine_rule = rule;
        self
    }

    pub fn run(&self, scenario: &Scenario) -> Result<Outcome, VerifyError> {
        let Scenario { name, initial } = scenario;

        let mut engine = SystolicEngine::new(initial.rows, initial.columns)?
            .with_rule(self.engine_rule.clone())
            .with_parallel_threshold(self.config.parallel_tick_threshold);

        engine.reset(self.config.reset_cycles);
        engine.load_grid(initial)?;

        let mut expected = initial.clone();
        let mut history = Vec::with_capacity(self.config.generations);
        let mut converged_at = None;

        for generation in 1..=self.config.generations {
            engine.advance_one_generation();
            if self.config.stall_cycles {
                engine.hold();
            }

            let observed = engine.unload_grid();
            if self.config.stall_cycles {
                engine.hold();
            }

            let next_expected = self.oracle.next(&expected);

            if observed != next_expected {
                warn!("{name}: generation {generation} diverged from the oracle");

                return Err(Box::new(Mismatch {
                    scenario: name.clone(),
                    generation,
                    initial: initial.clone(),
                    expected: next_expected,
                    observed,
                })
                .into());
            }

            let converged = next_expected == expected;
            history.push(observed);
            expected = next_expected;

            if converged {
                converged_at.get_or_insert(generation);

                if self.config.stop_on_convergence {
                    debug!("{name}: converged at generation {generation}");
                    break;
                }
            }
        }

        Ok(Outcome {
            name: name.clone(),
            initial: initial.clone(),
            history,
            converged_at,
            cycles: engine.cycle_count(),
        })
    }
}
