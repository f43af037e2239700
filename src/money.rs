//! Currency rounding shared by every calculator

/// Round a currency amount to two decimals, half up
///
/// Midpoints go towards positive infinity (`0.005 -> 0.01`,
/// `-0.005 -> 0.00`), the same rounding every amount in a projection goes
/// through. Intermediate values are rounded as soon as they are produced
/// and the rounded figure is what later steps consume.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_below_midpoint() {
        assert_eq!(round_currency(123.454), 123.45);
    }

    #[test]
    fn test_round_above_midpoint() {
        assert_eq!(round_currency(123.456), 123.46);
    }

    #[test]
    fn test_round_preserves_clean_values() {
        assert_eq!(round_currency(4250.0), 4250.0);
        assert_eq!(round_currency(0.0), 0.0);
    }

    #[test]
    fn test_round_negative_values() {
        assert_eq!(round_currency(-10.004), -10.0);
        assert_eq!(round_currency(-10.006), -10.01);
    }
}
