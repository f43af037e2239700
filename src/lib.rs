//! Holding Sim - month-by-month cash flow projection for a holding and its subsidiary
//!
//! This library provides:
//! - Progressive corporate tax (IS) and flat-rate dividend withholding
//! - Shareholder dividends paid on profit or on investment
//! - Holding to subsidiary transfer policies
//! - Stochastic monthly revenues and charges with growth and volatility
//! - The monthly simulation loop, batch runs and CSV export

pub mod error;
pub mod money;
pub mod tax;
pub mod shareholders;
pub mod reversal;
pub mod generator;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{Result, SimulationError};
pub use params::SimulationParameters;
pub use tax::{TaxBracket, TaxParameters};
pub use shareholders::{RemunerationMode, Shareholder};
pub use reversal::{ReversalPolicy, ReversalTier};
pub use projection::{run_simulation, MonthlyResult, SimulationEngine, SimulationResult};
pub use scenario::{BatchSummary, ScenarioRunner};
