//! Holding to subsidiary transfer ("reversal") policies
//!
//! Each month the holding may move funds to the subsidiary. How much is
//! decided by one of four policies; adding a policy means adding a variant
//! here and a match arm in [`compute_reversal`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::money::round_currency;
use crate::tax::check_fraction;

/// Tier of a tiered policy: once net profit reaches `profit_threshold`,
/// transfer `amount`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversalTier {
    pub profit_threshold: f64,
    pub amount: f64,
}

impl ReversalTier {
    pub fn new(profit_threshold: f64, amount: f64) -> Self {
        Self {
            profit_threshold,
            amount,
        }
    }
}

/// Policy governing the monthly holding -> subsidiary transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReversalPolicyConfig", into = "ReversalPolicyConfig")]
pub enum ReversalPolicy {
    /// No transfer
    None,
    /// Fixed share of the holding's current capital
    PercentOfHolding { percentage: f64 },
    /// Fixed amount once holding capital reaches a threshold
    Conditional { threshold: f64, amount: f64 },
    /// Amount of the highest tier reached by the month's net profit
    Tiered { tiers: Vec<ReversalTier> },
}

impl Default for ReversalPolicy {
    fn default() -> Self {
        ReversalPolicy::None
    }
}

impl ReversalPolicy {
    /// Configuration tag of the policy
    pub fn tag(&self) -> &'static str {
        match self {
            ReversalPolicy::None => "none",
            ReversalPolicy::PercentOfHolding { .. } => "pct_of_holding",
            ReversalPolicy::Conditional { .. } => "conditional",
            ReversalPolicy::Tiered { .. } => "tiered",
        }
    }

    /// Check the policy's parameters before a run
    pub fn validate(&self) -> Result<()> {
        match self {
            ReversalPolicy::None => Ok(()),
            ReversalPolicy::PercentOfHolding { percentage } => {
                check_fraction("reversalPolicy.percentage", *percentage)
            }
            ReversalPolicy::Conditional { threshold, amount } => {
                if !threshold.is_finite() {
                    return Err(SimulationError::invalid(
                        "reversalPolicy.threshold",
                        "threshold must be finite",
                    ));
                }
                check_amount("reversalPolicy.amount", *amount)
            }
            ReversalPolicy::Tiered { tiers } => {
                for tier in tiers {
                    if !tier.profit_threshold.is_finite() {
                        return Err(SimulationError::invalid(
                            "reversalPolicy.tiers.profitThreshold",
                            "threshold must be finite",
                        ));
                    }
                    check_amount("reversalPolicy.tiers.amount", tier.amount)?;
                }
                Ok(())
            }
        }
    }

    /// Drop tiers that could never be meant (non-positive threshold or amount)
    pub fn without_empty_tiers(self) -> Self {
        match self {
            ReversalPolicy::Tiered { tiers } => ReversalPolicy::Tiered {
                tiers: tiers
                    .into_iter()
                    .filter(|t| t.profit_threshold > 0.0 && t.amount > 0.0)
                    .collect(),
            },
            other => other,
        }
    }
}

fn check_amount(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(SimulationError::invalid(
            field,
            format!("expected a non-negative amount, got {}", amount),
        ));
    }
    Ok(())
}

/// Amount the holding transfers to the subsidiary this month
///
/// `holding_capital` is the capital at the start of the month; `profit_net`
/// is the holding's profit after corporate tax.
pub fn compute_reversal(policy: &ReversalPolicy, holding_capital: f64, profit_net: f64) -> f64 {
    match policy {
        ReversalPolicy::None => 0.0,
        ReversalPolicy::PercentOfHolding { percentage } => {
            round_currency(holding_capital * percentage)
        }
        ReversalPolicy::Conditional { threshold, amount } => {
            if holding_capital >= *threshold {
                *amount
            } else {
                0.0
            }
        }
        ReversalPolicy::Tiered { tiers } => {
            let mut sorted = tiers.clone();
            sorted.sort_by(|a, b| b.profit_threshold.total_cmp(&a.profit_threshold));
            sorted
                .iter()
                .find(|tier| profit_net >= tier.profit_threshold)
                .map(|tier| tier.amount)
                .unwrap_or(0.0)
        }
    }
}

/// Flat, tagged form of a policy as it appears in parameter files
///
/// `{"type": "conditional", "threshold": 100000, "amount": 5000}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReversalPolicyConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<ReversalTier>>,
}

fn required(value: Option<f64>, field: &str) -> Result<f64> {
    value.ok_or_else(|| SimulationError::invalid(field, "missing for this policy type"))
}

impl TryFrom<ReversalPolicyConfig> for ReversalPolicy {
    type Error = SimulationError;

    fn try_from(config: ReversalPolicyConfig) -> Result<Self> {
        match config.kind.as_str() {
            "none" => Ok(ReversalPolicy::None),
            "pct_of_holding" => Ok(ReversalPolicy::PercentOfHolding {
                percentage: required(config.percentage, "reversalPolicy.percentage")?,
            }),
            "conditional" => Ok(ReversalPolicy::Conditional {
                threshold: required(config.threshold, "reversalPolicy.threshold")?,
                amount: required(config.amount, "reversalPolicy.amount")?,
            }),
            "tiered" => Ok(ReversalPolicy::Tiered {
                tiers: config.tiers.unwrap_or_default(),
            }),
            other => Err(SimulationError::UnknownReversalPolicy(other.to_string())),
        }
    }
}

impl From<ReversalPolicy> for ReversalPolicyConfig {
    fn from(policy: ReversalPolicy) -> Self {
        let kind = policy.tag().to_string();
        match policy {
            ReversalPolicy::None => Self {
                kind,
                ..Default::default()
            },
            ReversalPolicy::PercentOfHolding { percentage } => Self {
                kind,
                percentage: Some(percentage),
                ..Default::default()
            },
            ReversalPolicy::Conditional { threshold, amount } => Self {
                kind,
                threshold: Some(threshold),
                amount: Some(amount),
                ..Default::default()
            },
            ReversalPolicy::Tiered { tiers } => Self {
                kind,
                tiers: Some(tiers),
                ..Default::default()
            },
        }
    }
}
