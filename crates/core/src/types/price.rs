//! Price display helpers.
//!
//! Amounts are carried as [`rust_decimal::Decimal`] so cart totals keep full
//! precision; rounding to two decimal places happens only at the display
//! boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as Brazilian reais, e.g. `R$ 59.90`.
///
/// Rounds midpoints away from zero, matching `toFixed(2)` in the web client
/// this storefront replaces.
#[must_use]
pub fn display_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("R$ {rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_brl_pads_to_two_places() {
        assert_eq!(display_brl(Decimal::new(25, 0)), "R$ 25.00");
        assert_eq!(display_brl(Decimal::new(599, 1)), "R$ 59.90");
    }

    #[test]
    fn test_display_brl_rounds_long_fractions() {
        assert_eq!(display_brl(Decimal::new(12345, 3)), "R$ 12.35");
        assert_eq!(display_brl(Decimal::ZERO), "R$ 0.00");
    }
}
