//! Simulation parameters and their JSON form

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::reversal::ReversalPolicy;
use crate::shareholders::{total_investment, RemunerationMode, Shareholder};
use crate::tax::{check_fraction, TaxParameters};

/// Everything one simulation run needs
///
/// Field names in JSON are camelCase; any field left out takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    /// Base monthly revenue of the holding
    pub base_monthly_revenue_holding: f64,

    /// Base monthly revenue of the subsidiary
    pub base_monthly_revenue_subsidiary: f64,

    /// Base monthly charges of the holding
    pub base_monthly_charges_holding: f64,

    /// Base monthly charges of the subsidiary
    pub base_monthly_charges_subsidiary: f64,

    /// Standard deviation of monthly figures, as a fraction of the expected value
    pub volatility: f64,

    /// Monthly growth rate applied to every base value
    pub monthly_growth_rate: f64,

    pub initial_subsidiary_capital: f64,

    /// Holding capital before shareholder investments are added
    pub initial_holding_capital: f64,

    pub reversal_policy: ReversalPolicy,

    /// Number of months to simulate; negative values are rejected
    pub duration_months: i32,

    pub tax_params: TaxParameters,

    pub shareholders: Vec<Shareholder>,

    /// Share of net profit taken as a dividend on profit
    pub dividend_on_profit_ratio: f64,

    /// Derive holding revenue from its current capital instead of a base value
    pub use_capital_based_revenue: bool,

    /// Monthly revenue rate on holding capital when capital-based revenue is on
    pub capital_revenue_rate: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            base_monthly_revenue_holding: 10_000.0,
            base_monthly_revenue_subsidiary: 5000.0,
            base_monthly_charges_holding: 3000.0,
            base_monthly_charges_subsidiary: 2000.0,
            volatility: 0.1,
            monthly_growth_rate: 0.02,
            initial_subsidiary_capital: 0.0,
            initial_holding_capital: 0.0,
            reversal_policy: ReversalPolicy::None,
            duration_months: 12,
            tax_params: TaxParameters::default(),
            shareholders: vec![Shareholder::new(
                "Actionnaire 1",
                50_000.0,
                0.05,
                RemunerationMode::OnProfit,
            )],
            dividend_on_profit_ratio: 0.05,
            use_capital_based_revenue: false,
            capital_revenue_rate: 0.01,
        }
    }
}

impl SimulationParameters {
    /// Parse parameters from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Months to simulate; 0 when the duration is negative
    pub fn months(&self) -> u32 {
        self.duration_months.max(0) as u32
    }

    /// Capital the holding starts month 1 with: its own plus every investment
    pub fn starting_holding_capital(&self) -> f64 {
        self.initial_holding_capital + total_investment(&self.shareholders)
    }

    /// Drop what a form leaves half-filled
    ///
    /// Shareholders without a name or without investment are removed, as
    /// are tiers with a non-positive threshold or amount.
    pub fn sanitized(mut self) -> Self {
        self.shareholders.retain(Shareholder::is_active);
        self.reversal_policy = self.reversal_policy.without_empty_tiers();
        self
    }

    /// Reject configurations a run cannot start from
    pub fn validate(&self) -> Result<()> {
        if self.duration_months < 0 {
            return Err(SimulationError::invalid(
                "durationMonths",
                format!("duration cannot be negative, got {}", self.duration_months),
            ));
        }

        check_finite("baseMonthlyRevenueHolding", self.base_monthly_revenue_holding)?;
        check_finite("baseMonthlyRevenueSubsidiary", self.base_monthly_revenue_subsidiary)?;
        check_finite("baseMonthlyChargesHolding", self.base_monthly_charges_holding)?;
        check_finite("baseMonthlyChargesSubsidiary", self.base_monthly_charges_subsidiary)?;
        check_finite("initialSubsidiaryCapital", self.initial_subsidiary_capital)?;
        check_finite("initialHoldingCapital", self.initial_holding_capital)?;
        check_finite("capitalRevenueRate", self.capital_revenue_rate)?;

        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(SimulationError::invalid(
                "volatility",
                format!("expected a non-negative standard deviation, got {}", self.volatility),
            ));
        }
        if !self.monthly_growth_rate.is_finite() || self.monthly_growth_rate <= -1.0 {
            return Err(SimulationError::invalid(
                "monthlyGrowthRate",
                format!("expected a rate above -1, got {}", self.monthly_growth_rate),
            ));
        }
        check_fraction("dividendOnProfitRatio", self.dividend_on_profit_ratio)?;

        self.validate_shareholders()?;
        self.tax_params.validate()?;
        self.reversal_policy.validate()?;
        Ok(())
    }

    fn validate_shareholders(&self) -> Result<()> {
        for shareholder in &self.shareholders {
            if !shareholder.investment.is_finite() || shareholder.investment < 0.0 {
                return Err(SimulationError::invalid(
                    "shareholders.investment",
                    format!("{}: investment cannot be negative", shareholder.name),
                ));
            }
            if !shareholder.dividend_rate.is_finite() || shareholder.dividend_rate < 0.0 {
                return Err(SimulationError::invalid(
                    "shareholders.dividendRate",
                    format!("{}: dividend rate cannot be negative", shareholder.name),
                ));
            }
            if shareholder.investment > 0.0 && shareholder.name.trim().is_empty() {
                return Err(SimulationError::invalid(
                    "shareholders.name",
                    "a shareholder with an investment needs a name",
                ));
            }
        }

        let has_profit_share = self
            .shareholders
            .iter()
            .any(|s| s.remuneration_mode == RemunerationMode::OnProfit);
        if has_profit_share && total_investment(&self.shareholders) <= 0.0 {
            log::warn!("shareholders paid on profit but total investment is zero; they receive nothing");
        }
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimulationError::invalid(field, "value must be finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reversal::ReversalTier;

    #[test]
    fn test_defaults_are_valid() {
        let params = SimulationParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.months(), 12);
        assert_eq!(params.starting_holding_capital(), 50_000.0);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let params = SimulationParameters {
            duration_months: -3,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidInput { field, .. }) if field == "durationMonths"
        ));
        assert_eq!(params.months(), 0);
    }

    #[test]
    fn test_non_finite_rates_rejected() {
        let params = SimulationParameters {
            volatility: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParameters {
            monthly_growth_rate: f64::INFINITY,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParameters {
            dividend_on_profit_ratio: 1.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_investment_rejected() {
        let params = SimulationParameters {
            shareholders: vec![Shareholder::new("A", -10.0, 0.05, RemunerationMode::OnProfit)],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_sanitized_drops_inactive_entries() {
        let params = SimulationParameters {
            shareholders: vec![
                Shareholder::new("A", 1000.0, 0.05, RemunerationMode::OnProfit),
                Shareholder::new("", 1000.0, 0.05, RemunerationMode::OnProfit),
                Shareholder::new("C", 0.0, 0.05, RemunerationMode::OnInvestment),
            ],
            reversal_policy: ReversalPolicy::Tiered {
                tiers: vec![ReversalTier::new(10_000.0, 2000.0), ReversalTier::new(0.0, 500.0)],
            },
            ..Default::default()
        }
        .sanitized();

        assert_eq!(params.shareholders.len(), 1);
        assert_eq!(params.shareholders[0].name, "A");
        assert_eq!(
            params.reversal_policy,
            ReversalPolicy::Tiered {
                tiers: vec![ReversalTier::new(10_000.0, 2000.0)]
            }
        );
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let params = SimulationParameters::from_json_str(
            r#"{
                "durationMonths": 24,
                "volatility": 0,
                "reversalPolicy": {"type": "pct_of_holding", "percentage": 0.1},
                "shareholders": []
            }"#,
        )
        .unwrap();

        assert_eq!(params.duration_months, 24);
        assert_eq!(params.volatility, 0.0);
        assert_eq!(params.base_monthly_revenue_holding, 10_000.0);
        assert_eq!(params.reversal_policy, ReversalPolicy::PercentOfHolding { percentage: 0.1 });
        assert!(params.shareholders.is_empty());
    }

    #[test]
    fn test_unknown_policy_in_json_is_a_config_error() {
        let err = SimulationParameters::from_json_str(r#"{"reversalPolicy": {"type": "half"}}"#)
            .unwrap_err();
        match err {
            SimulationError::Config(message) => assert!(message.contains("half")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let params = SimulationParameters {
            reversal_policy: ReversalPolicy::Conditional {
                threshold: 100_000.0,
                amount: 5000.0,
            },
            use_capital_based_revenue: true,
            ..Default::default()
        };
        let json = params.to_json_string_pretty().unwrap();
        assert!(json.contains("\"baseMonthlyRevenueHolding\""));
        assert!(json.contains("\"type\": \"conditional\""));
        assert_eq!(SimulationParameters::from_json_str(&json).unwrap(), params);
    }
}
