//! Shareholder roster data

use serde::{Deserialize, Serialize};

/// How a shareholder is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemunerationMode {
    /// Rate applied to the shareholder's pro-rata slice of the month's net profit
    OnProfit,
    /// Annual rate on the amount invested, paid monthly whatever the profit
    OnInvestment,
}

impl Default for RemunerationMode {
    fn default() -> Self {
        RemunerationMode::OnProfit
    }
}

/// A shareholder of the holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shareholder {
    pub name: String,

    /// Capital brought into the holding at simulation start
    pub investment: f64,

    /// Dividend rate (0.05 for 5%); annual under `OnInvestment`
    pub dividend_rate: f64,

    #[serde(default)]
    pub remuneration_mode: RemunerationMode,
}

impl Shareholder {
    pub fn new(
        name: impl Into<String>,
        investment: f64,
        dividend_rate: f64,
        remuneration_mode: RemunerationMode,
    ) -> Self {
        Self {
            name: name.into(),
            investment,
            dividend_rate,
            remuneration_mode,
        }
    }

    /// A roster entry counts once it has a name and some capital
    pub fn is_active(&self) -> bool {
        !self.name.trim().is_empty() && self.investment > 0.0
    }

    /// Unrounded monthly dividend for this shareholder
    ///
    /// `total_investment` is the investment summed over the whole roster.
    /// Under `OnProfit` a zero total yields 0 rather than dividing by zero.
    pub fn monthly_dividend(&self, profit_net: f64, total_investment: f64) -> f64 {
        match self.remuneration_mode {
            RemunerationMode::OnProfit => {
                if total_investment > 0.0 {
                    let investment_ratio = self.investment / total_investment;
                    profit_net * investment_ratio * self.dividend_rate
                } else {
                    0.0
                }
            }
            RemunerationMode::OnInvestment => self.investment * (self.dividend_rate / 12.0),
        }
    }
}

/// Sum of investments across a roster
pub fn total_investment(shareholders: &[Shareholder]) -> f64 {
    shareholders.iter().map(|s| s.investment).sum()
}
