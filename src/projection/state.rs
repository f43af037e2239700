//! Running capital balances for one simulation run

use crate::money::round_currency;
use crate::params::SimulationParameters;

/// Capital of both entities between two months
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalState {
    /// Current projection month (0 before the first month)
    pub month: u32,

    pub holding_capital: f64,

    pub subsidiary_capital: f64,
}

/// Flows of one month that move the balances
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthFlows {
    pub result_holding: f64,
    pub result_subsidiary: f64,
    pub tax: f64,
    pub dividend_on_profit: f64,
    pub shareholders_dividends: f64,
    pub transfer: f64,
}

impl CapitalState {
    /// Balances before month 1; shareholder money is injected once, here
    pub fn initial(params: &SimulationParameters) -> Self {
        Self {
            month: 0,
            holding_capital: params.starting_holding_capital(),
            subsidiary_capital: params.initial_subsidiary_capital,
        }
    }

    /// Move to the next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Apply a month's flows; both balances are rounded to cents
    pub fn apply(&mut self, flows: &MonthFlows) {
        self.subsidiary_capital =
            round_currency(self.subsidiary_capital + flows.result_subsidiary + flows.transfer);
        self.holding_capital = round_currency(
            self.holding_capital + flows.result_holding
                - flows.tax
                - flows.dividend_on_profit
                - flows.shareholders_dividends
                - flows.transfer,
        );
    }
}
