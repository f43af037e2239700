//! Dividends paid by the holding to its shareholders

use serde::{Deserialize, Serialize};

use super::data::{total_investment, RemunerationMode, Shareholder};
use crate::money::round_currency;
use crate::tax::{compute_net_received, TaxParameters};

/// Total dividends paid to the roster for one month
///
/// `profit_net` is the net profit left once the dividend on profit has been
/// taken. Only the rounded aggregate is returned.
pub fn compute_shareholder_dividends(shareholders: &[Shareholder], profit_net: f64) -> f64 {
    if shareholders.is_empty() {
        return 0.0;
    }

    let total = total_investment(shareholders);
    let dividends: f64 = shareholders
        .iter()
        .map(|s| s.monthly_dividend(profit_net, total))
        .sum();

    round_currency(dividends)
}

/// What one shareholder is paid in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareholderPayout {
    pub name: String,
    pub mode: RemunerationMode,
    /// Gross dividend before withholding
    pub gross: f64,
    /// Flat-rate withholding (income + social)
    pub withholding: f64,
    /// Amount received
    pub net: f64,
}

/// Per-shareholder breakdown of a month's dividends, with withholding
pub fn shareholder_payouts(
    shareholders: &[Shareholder],
    profit_net: f64,
    tax: &TaxParameters,
) -> Vec<ShareholderPayout> {
    let total = total_investment(shareholders);

    shareholders
        .iter()
        .map(|s| {
            let gross = round_currency(s.monthly_dividend(profit_net, total));
            let withholding = tax.withholding(gross);
            ShareholderPayout {
                name: s.name.clone(),
                mode: s.remuneration_mode,
                gross,
                withholding,
                net: compute_net_received(gross, withholding),
            }
        })
        .collect()
}
