//! Month-by-month holding/subsidiary simulation

use crate::error::Result;
use crate::generator::{generate_value, RandUniform, UniformSource};
use crate::money::round_currency;
use crate::params::SimulationParameters;
use crate::reversal::compute_reversal;
use crate::shareholders::compute_shareholder_dividends;
use super::results::{MonthlyResult, SimulationResult};
use super::state::{CapitalState, MonthFlows};

/// Simulation engine bound to one validated parameter set
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    params: SimulationParameters,
}

impl SimulationEngine {
    /// Validate the parameters and build an engine
    ///
    /// Fails before any month is simulated, so a run never returns partial
    /// results.
    pub fn new(params: SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run with draws seeded from the OS
    pub fn run(&self) -> SimulationResult {
        let mut source = RandUniform::from_entropy();
        self.run_with(&mut source)
    }

    /// Reproducible run
    pub fn run_seeded(&self, seed: u64) -> SimulationResult {
        let mut source = RandUniform::seeded(seed);
        self.run_with(&mut source)
    }

    /// Run with a caller-supplied source of uniform draws
    pub fn run_with<S: UniformSource + ?Sized>(&self, source: &mut S) -> SimulationResult {
        let months = self.params.months();
        let mut state = CapitalState::initial(&self.params);
        let mut result = SimulationResult::with_capacity(months as usize);

        log::info!(
            "Simulating {} months (holding capital {:.2}, subsidiary capital {:.2}, policy {})",
            months,
            state.holding_capital,
            state.subsidiary_capital,
            self.params.reversal_policy.tag(),
        );

        for _month in 1..=months {
            state.advance_month();
            let row = self.simulate_month(&mut state, source);
            result.add_month(row);
        }

        if let Some(last) = result.last() {
            log::info!(
                "Simulation done: holding capital {:.2}, subsidiary capital {:.2}",
                last.holding_capital,
                last.subsidiary_capital,
            );
        }

        result
    }

    /// Simulate one month and update the balances
    fn simulate_month<S: UniformSource + ?Sized>(
        &self,
        state: &mut CapitalState,
        source: &mut S,
    ) -> MonthlyResult {
        let p = &self.params;
        let month = state.month;

        // Draw order: holding revenue, holding charges, subsidiary revenue, subsidiary charges
        let revenue_base = if p.use_capital_based_revenue {
            state.holding_capital * p.capital_revenue_rate
        } else {
            p.base_monthly_revenue_holding
        };
        let revenue_holding = self.draw(revenue_base, month, source);
        let charges_holding = self.draw(p.base_monthly_charges_holding, month, source);
        let revenue_subsidiary = self.draw(p.base_monthly_revenue_subsidiary, month, source);
        let charges_subsidiary = self.draw(p.base_monthly_charges_subsidiary, month, source);

        let result_holding = revenue_holding - charges_holding;
        let result_subsidiary = revenue_subsidiary - charges_subsidiary;

        // Losses are neither taxed nor carried forward
        let profit_holding = result_holding.max(0.0);
        let is_amount = p.tax_params.corporate_tax(profit_holding);
        let profit_net = profit_holding - is_amount;

        let dividend_on_profit = if profit_net > 0.0 {
            round_currency(profit_net * p.dividend_on_profit_ratio)
        } else {
            0.0
        };

        // Shareholders share what is left after the dividend on profit
        let shareholders_dividends =
            compute_shareholder_dividends(&p.shareholders, profit_net - dividend_on_profit);

        // Transfer is based on capital at the start of the month
        let holding_to_subsidiary =
            compute_reversal(&p.reversal_policy, state.holding_capital, profit_net);

        state.apply(&MonthFlows {
            result_holding,
            result_subsidiary,
            tax: is_amount,
            dividend_on_profit,
            shareholders_dividends,
            transfer: holding_to_subsidiary,
        });

        log::debug!(
            "month {}: result holding {:.2}, tax {:.2}, transfer {:.2}, holding {:.2}, subsidiary {:.2}",
            month,
            result_holding,
            is_amount,
            holding_to_subsidiary,
            state.holding_capital,
            state.subsidiary_capital,
        );

        MonthlyResult {
            month,
            revenue_holding,
            charges_holding,
            result_holding,
            revenue_subsidiary,
            charges_subsidiary,
            result_subsidiary,
            profit_holding,
            is_amount,
            profit_net,
            dividend_on_profit,
            shareholders_dividends,
            holding_to_subsidiary,
            subsidiary_capital: state.subsidiary_capital,
            holding_capital: state.holding_capital,
        }
    }

    fn draw<S: UniformSource + ?Sized>(&self, base_value: f64, month: u32, source: &mut S) -> f64 {
        generate_value(
            base_value,
            self.params.volatility,
            self.params.monthly_growth_rate,
            month,
            source,
        )
    }
}

/// Validate `params` and run them once with entropy-seeded draws
pub fn run_simulation(params: SimulationParameters) -> Result<Vec<MonthlyResult>> {
    let engine = SimulationEngine::new(params)?;
    Ok(engine.run().into_months())
}
