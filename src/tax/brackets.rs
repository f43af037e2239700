//! Progressive corporate tax (IS) bracket table

use serde::{Deserialize, Serialize};

use crate::money::round_currency;

/// One bracket of a progressive tax schedule
///
/// `threshold` is the lower bound of the bracket; the bracket extends up to
/// the next bracket's threshold, or without limit for the last one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (currency)
    pub threshold: f64,
    /// Rate applied inside the bracket (0.15 for 15%)
    pub rate: f64,
}

impl TaxBracket {
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }
}

/// Default corporate tax brackets (indicative rates)
pub fn default_is_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(0.0, 0.15),
        TaxBracket::new(42_500.0, 0.25),
        TaxBracket::new(500_000.0, 0.28),
        TaxBracket::new(5_000_000.0, 0.31),
    ]
}

/// Whether the brackets are already in ascending threshold order
pub fn is_sorted(brackets: &[TaxBracket]) -> bool {
    brackets.windows(2).all(|w| w[0].threshold <= w[1].threshold)
}

/// Compute progressive tax on a profit
///
/// Brackets are sorted by threshold first; the caller's order is not
/// trusted. Each bracket whose threshold lies below the profit taxes the
/// slice of profit between its threshold and the next one (all remaining
/// profit for the last bracket). Non-positive profit pays no tax.
pub fn compute_tax(profit: f64, brackets: &[TaxBracket]) -> f64 {
    if profit <= 0.0 {
        return 0.0;
    }

    let mut sorted = brackets.to_vec();
    sorted.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

    let mut tax = 0.0;
    for (i, bracket) in sorted.iter().enumerate() {
        if profit <= bracket.threshold {
            break;
        }

        let taxable = match sorted.get(i + 1) {
            Some(next) => (profit - bracket.threshold).min(next.threshold - bracket.threshold),
            None => profit - bracket.threshold,
        };

        tax += taxable * bracket.rate;
    }

    round_currency(tax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn progressive() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, 0.15),
            TaxBracket::new(42_500.0, 0.25),
            TaxBracket::new(500_000.0, 0.28),
        ]
    }

    #[test]
    fn test_no_tax_on_zero_or_loss() {
        let brackets = vec![TaxBracket::new(0.0, 0.15)];
        assert_eq!(compute_tax(0.0, &brackets), 0.0);
        assert_eq!(compute_tax(-1000.0, &brackets), 0.0);
        assert_eq!(compute_tax(-0.01, &progressive()), 0.0);
    }

    #[test]
    fn test_single_flat_bracket() {
        let brackets = vec![TaxBracket::new(0.0, 0.15)];
        assert_eq!(compute_tax(10_000.0, &brackets), 1500.0);
        assert_eq!(compute_tax(50_000.0, &brackets), 7500.0);
        assert_eq!(compute_tax(5000.0, &brackets), 750.0);
    }

    #[test]
    fn test_progressive_first_bracket_only() {
        assert_eq!(compute_tax(30_000.0, &progressive()), 4500.0);
    }

    #[test]
    fn test_progressive_spans_two_brackets() {
        // 42500 * 0.15 + 17500 * 0.25
        assert_abs_diff_eq!(compute_tax(60_000.0, &progressive()), 10_750.0, epsilon = 0.01);
    }

    #[test]
    fn test_progressive_reaches_last_bracket() {
        // 42500 * 0.15 + 457500 * 0.25 + 100000 * 0.28
        let expected = 6375.0 + 114_375.0 + 28_000.0;
        assert_abs_diff_eq!(compute_tax(600_000.0, &progressive()), expected, epsilon = 0.01);
    }

    #[test]
    fn test_profit_on_threshold_stays_in_lower_bracket() {
        assert_abs_diff_eq!(compute_tax(42_500.0, &progressive()), 6375.0, epsilon = 0.01);
    }

    #[test]
    fn test_bracket_order_does_not_matter() {
        let mut reversed = progressive();
        reversed.reverse();
        let shuffled = vec![
            TaxBracket::new(42_500.0, 0.25),
            TaxBracket::new(500_000.0, 0.28),
            TaxBracket::new(0.0, 0.15),
        ];

        for profit in [1000.0, 42_500.0, 60_000.0, 750_000.0] {
            let expected = compute_tax(profit, &progressive());
            assert_eq!(compute_tax(profit, &reversed), expected);
            assert_eq!(compute_tax(profit, &shuffled), expected);
        }
    }

    #[test]
    fn test_missing_zero_bracket_leaves_low_profit_untaxed() {
        let brackets = vec![TaxBracket::new(10_000.0, 0.20)];
        assert_eq!(compute_tax(8000.0, &brackets), 0.0);
        assert_eq!(compute_tax(15_000.0, &brackets), 1000.0);
    }

    #[test]
    fn test_result_rounded_to_cents() {
        let brackets = vec![TaxBracket::new(0.0, 0.15)];
        // 1000.333 * 0.15 = 150.04995
        assert_eq!(compute_tax(1000.333, &brackets), 150.05);
    }

    #[test]
    fn test_empty_schedule_taxes_nothing() {
        assert_eq!(compute_tax(10_000.0, &[]), 0.0);
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&progressive()));
        assert!(is_sorted(&default_is_brackets()));
        let mut reversed = progressive();
        reversed.reverse();
        assert!(!is_sorted(&reversed));
    }
}
