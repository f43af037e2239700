//! Corporate tax and dividend withholding

mod brackets;
mod dividends;

pub use brackets::{compute_tax, default_is_brackets, is_sorted, TaxBracket};
pub use dividends::{compute_net_received, compute_withholding};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Default income tax rate on dividends (12.8%)
pub const DEFAULT_DIVIDEND_IR_RATE: f64 = 0.128;

/// Default social contributions rate on dividends (17.2%)
pub const DEFAULT_DIVIDEND_SOCIAL_RATE: f64 = 0.172;

/// Configurable tax parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxParameters {
    /// Corporate tax (IS) brackets, in any order
    pub is_brackets: Vec<TaxBracket>,

    /// Income tax rate withheld on dividends
    pub dividend_ir_rate: f64,

    /// Social contributions rate withheld on dividends
    pub dividend_social_rate: f64,
}

impl Default for TaxParameters {
    fn default() -> Self {
        Self {
            is_brackets: default_is_brackets(),
            dividend_ir_rate: DEFAULT_DIVIDEND_IR_RATE,
            dividend_social_rate: DEFAULT_DIVIDEND_SOCIAL_RATE,
        }
    }
}

impl TaxParameters {
    /// Corporate tax on a month's profit
    pub fn corporate_tax(&self, profit: f64) -> f64 {
        compute_tax(profit, &self.is_brackets)
    }

    /// Withholding on a gross dividend at the configured rates
    pub fn withholding(&self, gross_dividend: f64) -> f64 {
        compute_withholding(gross_dividend, self.dividend_ir_rate, self.dividend_social_rate)
    }

    /// Check the schedule and rates before a run
    pub fn validate(&self) -> Result<()> {
        if self.is_brackets.is_empty() {
            return Err(SimulationError::invalid(
                "taxParams.isBrackets",
                "tax schedule has no brackets",
            ));
        }

        for (i, bracket) in self.is_brackets.iter().enumerate() {
            if !bracket.threshold.is_finite() {
                return Err(SimulationError::invalid(
                    "taxParams.isBrackets",
                    format!("bracket {} has a non-finite threshold", i),
                ));
            }
            check_fraction("taxParams.isBrackets.rate", bracket.rate)?;
        }

        if !is_sorted(&self.is_brackets) {
            log::warn!("tax brackets are not in ascending order; they will be sorted");
        }

        check_fraction("taxParams.dividendIrRate", self.dividend_ir_rate)?;
        check_fraction("taxParams.dividendSocialRate", self.dividend_social_rate)?;
        Ok(())
    }
}

/// A rate must be finite and lie in [0, 1]
pub(crate) fn check_fraction(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::invalid(
            field,
            format!("expected a rate between 0 and 1, got {}", value),
        ));
    }
    Ok(())
}
