use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CURRENCY_DECIMAL_PRECISION;

/// Rounds a currency amount to cents, halves away from zero.
///
/// Every cash, cost basis and valuation figure goes through this after a
/// mutation so stored amounts never carry sub-cent precision.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec!(99.999)), dec!(100.00));
        assert_eq!(round_currency(dec!(10.005)), dec!(10.01));
        assert_eq!(round_currency(dec!(10.004)), dec!(10.00));
        assert_eq!(round_currency(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn test_round_currency_keeps_whole_cents() {
        assert_eq!(round_currency(dec!(1234.5)), dec!(1234.5));
        assert_eq!(round_currency(dec!(0)), Decimal::ZERO);
    }
}
