//! Flat-rate withholding on dividends (PFU)

use crate::money::round_currency;

/// Withholding on a gross dividend: income rate plus social rate
///
/// A non-positive dividend carries no withholding.
pub fn compute_withholding(gross_dividend: f64, income_rate: f64, social_rate: f64) -> f64 {
    if gross_dividend <= 0.0 {
        return 0.0;
    }
    round_currency(gross_dividend * (income_rate + social_rate))
}

/// Amount actually received once the withholding is deducted
pub fn compute_net_received(gross_dividend: f64, withholding: f64) -> f64 {
    round_currency(gross_dividend - withholding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withholding_zero_for_non_positive_dividend() {
        assert_eq!(compute_withholding(0.0, 0.128, 0.172), 0.0);
        assert_eq!(compute_withholding(-1000.0, 0.128, 0.172), 0.0);
    }

    #[test]
    fn test_withholding_combined_rate() {
        assert_eq!(compute_withholding(10_000.0, 0.128, 0.172), 3000.0);
    }

    #[test]
    fn test_withholding_rounded() {
        // 1000.333 * 0.30 = 300.0999
        assert_eq!(compute_withholding(1000.333, 0.128, 0.172), 300.1);
    }

    #[test]
    fn test_net_received() {
        assert_eq!(compute_net_received(10_000.0, 3000.0), 7000.0);
        assert_eq!(compute_net_received(5000.0, 1500.0), 3500.0);
    }

    #[test]
    fn test_net_received_rounded() {
        assert_eq!(compute_net_received(1000.333, 300.1), 700.23);
    }
}
