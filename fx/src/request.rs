//! Input shapes accepted by the exchange entry points.

use coinage_common::{Currency, Money};
use rust_decimal::Decimal;

use crate::error::FxResult;

/// A currency given either as a value or as a code to resolve against the
/// default precision table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyRef {
    Currency(Currency),
    Code(String),
}

impl CurrencyRef {
    /// Resolve into a currency, looking codes up in the default table.
    pub fn resolve(self) -> FxResult<Currency> {
        match self {
            CurrencyRef::Currency(currency) => Ok(currency),
            CurrencyRef::Code(code) => Ok(Currency::new(code)?),
        }
    }
}

impl From<Currency> for CurrencyRef {
    fn from(currency: Currency) -> Self {
        CurrencyRef::Currency(currency)
    }
}

impl From<&Currency> for CurrencyRef {
    fn from(currency: &Currency) -> Self {
        CurrencyRef::Currency(currency.clone())
    }
}

impl From<&str> for CurrencyRef {
    fn from(code: &str) -> Self {
        CurrencyRef::Code(code.to_string())
    }
}

impl From<String> for CurrencyRef {
    fn from(code: String) -> Self {
        CurrencyRef::Code(code)
    }
}

/// What is being exchanged.
#[derive(Debug, Clone)]
pub enum ExchangeSource {
    /// A bare amount in the given currency.
    Amount { amount: Decimal, currency: CurrencyRef },
    /// A money value.
    Money(Money),
    /// A money literal such as `"100 BGN"`.
    Literal(String),
}

impl ExchangeSource {
    /// Create an amount source.
    pub fn amount(amount: Decimal, currency: impl Into<CurrencyRef>) -> Self {
        ExchangeSource::Amount {
            amount,
            currency: currency.into(),
        }
    }

    /// Build the money to exchange. Amounts are rounded to the precision of
    /// their currency first.
    pub fn into_money(self) -> FxResult<Money> {
        match self {
            ExchangeSource::Amount { amount, currency } => {
                Ok(Money::new(amount, currency.resolve()?))
            }
            ExchangeSource::Money(money) => Ok(money),
            ExchangeSource::Literal(literal) => Ok(Money::parse(&literal)?),
        }
    }
}

impl From<Money> for ExchangeSource {
    fn from(money: Money) -> Self {
        ExchangeSource::Money(money)
    }
}

impl From<&Money> for ExchangeSource {
    fn from(money: &Money) -> Self {
        ExchangeSource::Money(money.clone())
    }
}

impl From<&str> for ExchangeSource {
    fn from(literal: &str) -> Self {
        ExchangeSource::Literal(literal.to_string())
    }
}

impl From<String> for ExchangeSource {
    fn from(literal: String) -> Self {
        ExchangeSource::Literal(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolve_code() {
        let currency = CurrencyRef::from("EUR").resolve().unwrap();
        assert_eq!(currency.code(), "EUR");
        assert_eq!(currency.precision(), 2);

        assert!(matches!(
            CurrencyRef::from("foobar").resolve(),
            Err(FxError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_resolve_keeps_custom_precision() {
        let custom = Currency::with_precision("EUR", 4).unwrap();
        let resolved = CurrencyRef::from(&custom).resolve().unwrap();
        assert!(resolved.is_same_as(&custom));
    }

    #[test]
    fn test_amount_is_rounded_to_source() {
        let money = ExchangeSource::amount(dec!(51.129), "EUR").into_money().unwrap();
        assert_eq!(money.to_string(), "51.13 EUR");
    }

    #[test]
    fn test_literal_source() {
        let money = ExchangeSource::from("100 BGN").into_money().unwrap();
        assert_eq!(money.to_string(), "100.00 BGN");

        assert!(matches!(
            ExchangeSource::from("foobar BGN").into_money(),
            Err(FxError::InvalidArgument(_))
        ));
        assert!(matches!(
            ExchangeSource::from("100").into_money(),
            Err(FxError::InvalidArgument(_))
        ));
    }
}
