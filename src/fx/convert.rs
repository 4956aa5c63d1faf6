//! Currency conversion with fixed two-stage rounding.
//!
//! The stored rate is a binary float; it is first pinned to a 6-digit
//! decimal, then the product is cash-rounded to the configured minor-unit
//! increment. Both stages use a round-half-to-even tie-break. The order
//! matters: float-to-decimal conversion is lossy, so tests pin the result
//! bit-for-bit.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::cache::RateCache;
use super::error::FxError;

/// Round `value` to the nearest multiple of `increment`, ties to even.
pub fn round_cash(value: Decimal, increment: Decimal) -> Decimal {
    (value / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) * increment
}

pub struct Converter {
    cache: RateCache,
    base: String,
    increment: Decimal,
}

impl Converter {
    pub fn new(cache: RateCache, base: impl Into<String>, increment: Decimal) -> Self {
        Self {
            cache,
            base: base.into(),
            increment,
        }
    }

    /// Currency all balances are stored in; reads without a `currency`
    /// parameter report amounts in this code.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Convert `amount` from the base currency into `code`.
    pub async fn convert(&self, amount: Decimal, code: &str) -> Result<Decimal, FxError> {
        let rate = self.cache.rate(code).await?;
        let rate6 = Decimal::from_f64(rate)
            .ok_or(FxError::BadRate(rate))?
            .round_dp_with_strategy(6, RoundingStrategy::MidpointNearestEven);
        Ok(round_cash(amount * rate6, self.increment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::rates::test_support::StaticRates;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    fn converter(pairs: &[(&str, f64)]) -> Converter {
        let cache = RateCache::new(
            Arc::new(StaticRates::new(pairs)),
            Duration::from_secs(60),
        );
        Converter::new(cache, "RUB", dec!(0.10))
    }

    #[test]
    fn cash_rounding_ties_to_even() {
        // 2.25 / 0.10 = 22.5 -> 22 (even), 2.35 / 0.10 = 23.5 -> 24
        assert_eq!(round_cash(dec!(2.25), dec!(0.10)), dec!(2.20));
        assert_eq!(round_cash(dec!(2.35), dec!(0.10)), dec!(2.40));
        assert_eq!(round_cash(dec!(2.31), dec!(0.10)), dec!(2.30));
        assert_eq!(round_cash(dec!(2.36), dec!(0.10)), dec!(2.40));
        assert_eq!(round_cash(dec!(0), dec!(0.10)), dec!(0.00));
    }

    #[test]
    fn cash_rounding_other_increments() {
        assert_eq!(round_cash(dec!(2.37), dec!(0.05)), dec!(2.35));
        assert_eq!(round_cash(dec!(2.50), dec!(1.00)), dec!(2.00));
        assert_eq!(round_cash(dec!(3.50), dec!(1.00)), dec!(4.00));
    }

    #[tokio::test]
    async fn convert_pins_rate_to_six_digits_first() {
        // 0.0123456789 pins to 0.012346 before multiplying
        let conv = converter(&[("USD", 0.0123456789)]);
        let got = conv.convert(dec!(1000), "USD").await.unwrap();
        assert_eq!(got, dec!(12.30)); // 1000 * 0.012346 = 12.346 -> 12.30
    }

    #[tokio::test]
    async fn convert_is_deterministic() {
        let conv = converter(&[("EUR", 0.0121)]);
        let a = conv.convert(dec!(847.13), "EUR").await.unwrap();
        let b = conv.convert(dec!(847.13), "EUR").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a, dec!(10.30)); // 847.13 * 0.0121 = 10.250273 -> 10.30
    }

    #[tokio::test]
    async fn convert_unknown_currency() {
        let conv = converter(&[("USD", 0.013)]);
        assert!(matches!(
            conv.convert(dec!(10), "ZZZ").await,
            Err(FxError::UnknownCurrency(code)) if code == "ZZZ"
        ));
    }
}
