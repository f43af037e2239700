//! Scenario runner for batches of seeded simulations
//!
//! Validates the parameters once, then runs many independent simulations
//! in parallel. Each run draws from its own generator seeded from the base
//! seed and the run index, so a batch is reproducible whatever the thread
//! scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::SimulationParameters;
use crate::projection::{SimulationEngine, SimulationResult};

/// Pre-validated runner for batch simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(SimulationParameters::default())?;
/// let results = runner.run_batch(1000, 42);
/// let summary = BatchSummary::from_results(&results);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: SimulationEngine,
}

impl ScenarioRunner {
    pub fn new(params: SimulationParameters) -> Result<Self> {
        Ok(Self {
            engine: SimulationEngine::new(params)?,
        })
    }

    /// Seed of run `index` within a batch seeded with `base_seed`
    pub fn run_seed(base_seed: u64, index: u64) -> u64 {
        splitmix64(base_seed ^ index.rotate_left(32))
    }

    /// Run a single simulation
    pub fn run(&self, seed: u64) -> SimulationResult {
        self.engine.run_seeded(seed)
    }

    /// Run `runs` simulations in parallel; results come back in run order
    pub fn run_batch(&self, runs: usize, base_seed: u64) -> Vec<SimulationResult> {
        log::info!("Running batch of {} simulations (seed {})", runs, base_seed);

        let results: Vec<SimulationResult> = (0..runs as u64)
            .into_par_iter()
            .map(|i| self.engine.run_seeded(Self::run_seed(base_seed, i)))
            .collect();

        log::info!("Batch of {} simulations complete", results.len());
        results
    }

    /// Run several parameter sets with the same seed, one result per set
    pub fn run_scenarios(
        scenarios: &[SimulationParameters],
        seed: u64,
    ) -> Result<Vec<SimulationResult>> {
        let engines = scenarios
            .iter()
            .cloned()
            .map(SimulationEngine::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(engines.par_iter().map(|e| e.run_seeded(seed)).collect())
    }

    pub fn params(&self) -> &SimulationParameters {
        self.engine.params()
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Distribution of closing balances over a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub holding: Percentiles,
    pub subsidiary: Percentiles,
    /// Share of runs ending with negative holding capital
    pub holding_shortfall_rate: f64,
}

/// Mean and percentiles of a closing balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub mean: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl Percentiles {
    fn from_values(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                p10: 0.0,
                p50: 0.0,
                p90: 0.0,
            };
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            mean,
            p10: percentile(&values, 0.10),
            p50: percentile(&values, 0.50),
            p90: percentile(&values, 0.90),
        }
    }
}

/// Linear interpolation between closest ranks; `sorted` must be ascending
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * weight
}

impl BatchSummary {
    pub fn from_results(results: &[SimulationResult]) -> Self {
        let finals: Vec<_> = results.iter().map(|r| r.summary()).collect();
        let holding: Vec<f64> = finals.iter().map(|s| s.final_holding_capital).collect();
        let subsidiary: Vec<f64> = finals.iter().map(|s| s.final_subsidiary_capital).collect();

        let shortfalls = holding.iter().filter(|&&c| c < 0.0).count();
        let holding_shortfall_rate = if results.is_empty() {
            0.0
        } else {
            shortfalls as f64 / results.len() as f64
        };

        Self {
            runs: results.len(),
            holding: Percentiles::from_values(holding),
            subsidiary: Percentiles::from_values(subsidiary),
            holding_shortfall_rate,
        }
    }
}
