//! Simulation engine: month loop, running balances and results

mod state;
mod engine;
mod results;

pub use state::{CapitalState, MonthFlows};
pub use engine::{run_simulation, SimulationEngine};
pub use results::{ChartSeries, MonthlyResult, Series, SimulationResult, SimulationSummary};
