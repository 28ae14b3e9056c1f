//! Directed exchange rates between two currencies.

use coinage_common::{Currency, CurrencyPair, Money};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FxError, FxResult};

lazy_static! {
    /// `SRC/DST rate`, e.g. `BGN/EUR 0.511280836`.
    static ref RATE_LITERAL_REGEX: Regex = Regex::new(
        r"^(?P<source>[A-Z]{3})/(?P<target>[A-Z]{3})\s+(?P<rate>[0-9]*\.?[0-9]+)$"
    )
    .expect("Invalid regex pattern");
}

/// Which way a rate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source to target: multiply by the rate.
    Forward,
    /// Target to source: divide by the rate.
    Reverse,
}

/// A conversion ratio from a source to a target currency.
///
/// One unit of the source currency buys `rate` units of the target currency.
/// The rate is never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExchangeRate {
    source: Currency,
    target: Currency,
    rate: Decimal,
}

impl ExchangeRate {
    /// Create a new exchange rate.
    pub fn new(source: Currency, target: Currency, rate: Decimal) -> FxResult<Self> {
        Ok(Self {
            source,
            target,
            rate: checked_rate(rate)?,
        })
    }

    /// Create a rate between two currency codes from the default precision
    /// table.
    pub fn from_codes(source: &str, target: &str, rate: Decimal) -> FxResult<Self> {
        let rate = checked_rate(rate)?;
        Ok(Self {
            source: Currency::new(source)?,
            target: Currency::new(target)?,
            rate,
        })
    }

    /// Parse a rate literal such as `"BGN/EUR 0.511280836"`.
    pub fn parse(literal: &str) -> FxResult<Self> {
        let captures = RATE_LITERAL_REGEX.captures(literal).ok_or_else(|| {
            FxError::InvalidArgument(format!(
                "Can't create currency pair from ISO string {literal}, format of string is invalid"
            ))
        })?;

        let digits = &captures["rate"];
        let normalized = if digits.starts_with('.') {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        // Exact parsing keeps digits past the 28th from silently rounding away.
        let rate = Decimal::from_str_exact(&normalized).map_err(|_| {
            FxError::InvalidArgument(format!("Conversion rate {digits} is out of range"))
        })?;

        Self::from_codes(&captures["source"], &captures["target"], rate)
    }

    /// Get the currency converted from.
    pub fn source(&self) -> &Currency {
        &self.source
    }

    /// Get the currency converted to.
    pub fn target(&self) -> &Currency {
        &self.target
    }

    /// Get the conversion ratio.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.source.clone(), self.target.clone())
    }

    /// Work out which way this rate applies to money held in `currency`.
    ///
    /// Returns `None` when the currency is neither the source nor the target.
    pub fn direction_for(&self, currency: &Currency) -> Option<Direction> {
        if currency.is_equal_to(&self.source) {
            Some(Direction::Forward)
        } else if currency.is_equal_to(&self.target) {
            Some(Direction::Reverse)
        } else {
            None
        }
    }

    /// Convert an amount in the given direction without touching the rate.
    pub fn convert(&self, direction: Direction, amount: Decimal) -> FxResult<Money> {
        let (value, currency) = match direction {
            Direction::Forward => (amount.checked_mul(self.rate), &self.target),
            Direction::Reverse => (amount.checked_div(self.rate), &self.source),
        };

        let value = value.ok_or_else(|| {
            FxError::InvalidArgument(format!("Exchanging {amount} at {self} overflows"))
        })?;

        Ok(Money::new(value, currency.clone()))
    }

    /// Convert a bare amount of the source currency into the target currency.
    pub fn exchange_amount(&self, amount: Decimal) -> FxResult<Money> {
        self.convert(Direction::Forward, amount)
    }

    /// Convert money in either of the rate's currencies.
    ///
    /// Money in the target currency is converted back to the source
    /// currency using the reciprocal of the rate.
    pub fn exchange(&self, money: &Money) -> FxResult<Money> {
        let direction = self
            .direction_for(money.currency())
            .ok_or_else(|| FxError::CurrencyMismatch {
                from: self.source.clone(),
                to: self.target.clone(),
                actual: money.currency().clone(),
            })?;

        self.convert(direction, money.amount())
    }

    /// Swap source and target in place and replace the rate by its
    /// reciprocal.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        self.rate = (Decimal::ONE / self.rate).normalize();
    }

    /// Get an inverted copy.
    pub fn inverse(&self) -> Self {
        let mut inverted = self.clone();
        inverted.invert();
        inverted
    }
}

/// Check the shape of a rate literal without resolving its currencies.
pub(crate) fn is_rate_literal(literal: &str) -> bool {
    RATE_LITERAL_REGEX.is_match(literal)
}

fn checked_rate(rate: Decimal) -> FxResult<Decimal> {
    if rate.is_zero() {
        return Err(FxError::InvalidArgument(
            "Conversion rate must be a non zero value".to_string(),
        ));
    }

    // The reciprocal must survive as a non zero value for `invert` to stay total.
    match Decimal::ONE.checked_div(rate) {
        Some(reciprocal) if !reciprocal.is_zero() => Ok(rate),
        _ => Err(FxError::InvalidArgument(format!(
            "Conversion rate {rate} is out of range"
        ))),
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.source, self.target, self.rate)
    }
}

impl FromStr for ExchangeRate {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExchangeRate {
    type Error = FxError;

    fn try_from(literal: String) -> Result<Self, Self::Error> {
        Self::parse(&literal)
    }
}

impl From<ExchangeRate> for String {
    fn from(rate: ExchangeRate) -> Self {
        rate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn currency(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn eur_usd() -> ExchangeRate {
        ExchangeRate::new(currency("EUR"), currency("USD"), dec!(1.141715)).unwrap()
    }

    #[test]
    fn test_exchange() {
        let rate = eur_usd();
        let eur = Money::parse("100 EUR").unwrap();
        let usd = Money::parse("114.17 USD").unwrap();

        assert_eq!(rate.exchange(&eur).unwrap(), usd);
        assert_eq!(rate.exchange_amount(dec!(100)).unwrap(), usd);

        // back conversion
        assert_eq!(rate.exchange(&usd).unwrap(), eur);

        // a bare amount is always read as source currency
        assert_ne!(rate.exchange_amount(dec!(114.17)).unwrap(), eur);
    }

    #[test]
    fn test_rate_from_string() {
        let rate = ExchangeRate::parse("BGN/EUR 0.511280836").unwrap();
        assert_eq!(rate.exchange_amount(dec!(100)).unwrap().to_string(), "51.13 EUR");

        let rate = ExchangeRate::from_codes("BGN", "EUR", dec!(0.511280836)).unwrap();
        assert_eq!(rate.exchange_amount(dec!(100)).unwrap().to_string(), "51.13 EUR");
    }

    #[test]
    fn test_to_string() {
        let rate: ExchangeRate = "BGN/EUR 0.511280836".parse().unwrap();
        assert_eq!(rate.to_string(), "BGN/EUR 0.511280836");

        assert_eq!(eur_usd().to_string(), "EUR/USD 1.141715");

        let rate = ExchangeRate::parse("EUR/USD 1.50").unwrap();
        assert_eq!(rate.to_string(), "EUR/USD 1.50");
    }

    #[test]
    fn test_leading_dot_rate() {
        let rate = ExchangeRate::parse("BGN/EUR .5").unwrap();
        assert_eq!(rate.rate(), dec!(0.5));
    }

    #[test]
    fn test_invert() {
        let mut rate = ExchangeRate::parse("EUR/USD 1.25").unwrap();

        rate.invert();
        assert_eq!(rate.rate(), dec!(0.8));
        assert_eq!(rate.source().code(), "USD");
        assert_eq!(rate.target().code(), "EUR");
        assert_eq!(rate.to_string(), "USD/EUR 0.8");

        rate.invert();
        assert_eq!(rate.to_string(), "EUR/USD 1.25");
    }

    #[test]
    fn test_inverse_leaves_original() {
        let rate = ExchangeRate::parse("EUR/USD 1.25").unwrap();
        let inverse = rate.inverse();

        assert_eq!(rate.to_string(), "EUR/USD 1.25");
        assert_eq!(inverse.to_string(), "USD/EUR 0.8");
    }

    #[test]
    fn test_malformed_literals() {
        for literal in [
            "BG/EUR 0.511280836",
            "BGN/EUR foobar",
            "bgn/eur 0.5",
            "BGN/EUR -0.5",
            "BGN/EUR +0.5",
            "BGN/EUR",
            "BGNEUR 0.5",
            "BGN/EUR 0.5 ",
        ] {
            let err = ExchangeRate::parse(literal).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{literal:?}");
        }
    }

    #[test]
    fn test_zero_rate() {
        assert!(matches!(
            ExchangeRate::new(currency("EUR"), currency("USD"), Decimal::ZERO),
            Err(FxError::InvalidArgument(_))
        ));
        assert!(matches!(
            ExchangeRate::parse("EUR/USD 0.000"),
            Err(FxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rate_without_reciprocal_is_rejected() {
        for rate in [Decimal::MAX, dec!(50000000000000000000000000000)] {
            let err = ExchangeRate::new(currency("EUR"), currency("USD"), rate).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains("out of range"));
        }

        let err = ExchangeRate::parse("EUR/USD 50000000000000000000000000000").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_large_rate_inverts_twice() {
        let mut rate =
            ExchangeRate::new(currency("EUR"), currency("USD"), dec!(10000000000000000000000000000))
                .unwrap();

        rate.invert();
        assert_eq!(rate.rate(), dec!(0.0000000000000000000000000001));

        rate.invert();
        assert_eq!(rate.rate(), dec!(10000000000000000000000000000));
    }

    #[test]
    fn test_literal_beyond_decimal_range() {
        let err = ExchangeRate::parse("BGN/EUR 0.000000000000000000000000000000001").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("out of range"), "{err}");

        let err = ExchangeRate::parse("BGN/EUR 100000000000000000000000000000").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn test_unknown_currency_in_literal() {
        assert!(matches!(
            ExchangeRate::parse("XYZ/EUR 1.5"),
            Err(FxError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_cannot_exchange_other_currencies() {
        let rate = eur_usd();
        let bgn = Money::parse("100 BGN").unwrap();

        let err = rate.exchange(&bgn).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, FxError::CurrencyMismatch { ref actual, .. } if actual.code() == "BGN"));
    }

    #[test]
    fn test_direction_for() {
        let rate = eur_usd();

        assert_eq!(rate.direction_for(&currency("EUR")), Some(Direction::Forward));
        assert_eq!(rate.direction_for(&currency("USD")), Some(Direction::Reverse));
        assert_eq!(rate.direction_for(&currency("BGN")), None);
    }

    #[test]
    fn test_convert_uses_target_precision() {
        let rate = ExchangeRate::new(currency("EUR"), currency("JPY"), dec!(161.237)).unwrap();

        let yen = rate.convert(Direction::Forward, dec!(10)).unwrap();
        assert_eq!(yen.to_string(), "1612 JPY");

        let euro = rate.convert(Direction::Reverse, dec!(1612)).unwrap();
        assert_eq!(euro.to_string(), "10.00 EUR");
    }

    #[test]
    fn test_overflow_is_reported() {
        let rate = ExchangeRate::new(currency("EUR"), currency("USD"), dec!(1000)).unwrap();
        assert!(rate.exchange_amount(Decimal::MAX).is_err());
    }

    #[test]
    fn test_serde_as_literal() {
        let rate = ExchangeRate::parse("BGN/EUR 0.511280836").unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, r#""BGN/EUR 0.511280836""#);

        let back: ExchangeRate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);

        assert!(serde_json::from_str::<ExchangeRate>(r#""BGN/EUR 0""#).is_err());
    }

    proptest! {
        #[test]
        fn prop_double_inversion_restores_rate(mantissa in 1i64..1_000_000_000, scale in 0u32..9) {
            let original = Decimal::new(mantissa, scale);
            let mut rate = ExchangeRate::new(currency("EUR"), currency("USD"), original).unwrap();

            rate.invert();
            rate.invert();

            prop_assert_eq!(rate.source().code(), "EUR");
            prop_assert_eq!(rate.target().code(), "USD");
            let tolerance = original * dec!(0.000000000001);
            prop_assert!((rate.rate() - original).abs() <= tolerance);
        }
    }
}
