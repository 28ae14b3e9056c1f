//! Money amounts rounded to their currency's minor units.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::currency::Currency;
use crate::error::{MoneyError, MoneyResult};

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

lazy_static! {
    /// `[sign]digits[separator[digits]] CODE`, e.g. `-1974,50 BGN`.
    static ref MONEY_LITERAL_REGEX: Regex = Regex::new(
        r"^(?P<sign>[-+])?(?P<units>[0-9]*)[.,]?(?P<fraction>[0-9]*)\s*(?P<currency>\w*)$"
    )
    .expect("Invalid regex pattern");

    static ref PLAIN_AMOUNT_REGEX: Regex =
        Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("Invalid regex pattern");
}

/// An immutable amount of money in a currency.
///
/// The amount is rounded to the currency's precision when the value is
/// built, using midpoint-away-from-zero rounding, and always carries exactly
/// that many fractional digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Wire shape of [`Money`]; deserialized values are re-rounded.
#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl From<RawMoney> for Money {
    fn from(raw: RawMoney) -> Self {
        Money::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Create a new Money instance, rounding to the currency's precision.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: round_to_precision(amount, currency.precision()),
            currency,
        }
    }

    /// Create from an amount and a currency code resolved against the
    /// default precision table.
    pub fn from_code(amount: Decimal, code: &str) -> MoneyResult<Self> {
        Ok(Self::new(amount, Currency::new(code)?))
    }

    /// Create from a floating point amount. NaN and infinities are rejected.
    pub fn from_f64(amount: f64, currency: Currency) -> MoneyResult<Self> {
        let amount = Decimal::from_f64_retain(amount)
            .ok_or_else(|| MoneyError::invalid("Amount must be a numeric value"))?;
        Ok(Self::new(amount, currency))
    }

    /// Create from a numeric string such as `"15.07"` or `"1e3"`.
    pub fn from_amount_str(amount: &str, currency: Currency) -> MoneyResult<Self> {
        Ok(Self::new(parse_amount(amount)?, currency))
    }

    /// Parse a money literal such as `"29.99 USD"` or `"-1,5 EUR"`.
    ///
    /// Both `.` and `,` are accepted as the decimal separator. The currency
    /// code is resolved against the default precision table.
    pub fn parse(literal: &str) -> MoneyResult<Self> {
        let captures = MONEY_LITERAL_REGEX
            .captures(literal.trim())
            .ok_or_else(|| MoneyError::invalid("The string could not be parsed as money"))?;

        let code = captures.name("currency").map_or("", |m| m.as_str());
        if code.is_empty() {
            return Err(MoneyError::invalid(
                "No matching currency code in the string",
            ));
        }

        let negative = captures.name("sign").map_or(false, |m| m.as_str() == "-");
        let units = captures.name("units").map_or("", |m| m.as_str());
        let fraction = captures.name("fraction").map_or("", |m| m.as_str());

        if units.is_empty() && fraction.is_empty() {
            return Err(MoneyError::invalid("Amount must be a numeric value"));
        }

        let mut amount = String::with_capacity(units.len() + fraction.len() + 3);
        if negative {
            amount.push('-');
        }
        amount.push_str(if units.is_empty() { "0" } else { units });
        if !fraction.is_empty() {
            amount.push('.');
            amount.push_str(fraction);
        }

        let currency = Currency::new(code)?;
        Self::from_amount_str(&amount, currency)
    }

    /// Get the rounded amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Get the currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Check the currency code and the amount; precision differences between
    /// the two currencies are ignored.
    pub fn is_equal_to(&self, other: &Money) -> bool {
        self.currency.is_equal_to(&other.currency) && self.amount == other.amount
    }
}

/// Round to `precision` digits and pin the scale to exactly that many digits.
fn round_to_precision(amount: Decimal, precision: u32) -> Decimal {
    let scale = precision.min(MAX_DECIMAL_SCALE);
    let mut rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

fn parse_amount(amount: &str) -> MoneyResult<Decimal> {
    let trimmed = amount.trim();
    if let Ok(value) = Decimal::from_str(trimmed) {
        return Ok(value);
    }

    // Plain digits that still fail only overflow the 96-bit mantissa.
    if PLAIN_AMOUNT_REGEX.is_match(trimmed) {
        return Err(MoneyError::invalid(format!(
            "Amount {amount:?} is out of range"
        )));
    }

    Decimal::from_scientific(trimmed)
        .map_err(|_| MoneyError::invalid(format!("Amount {amount:?} must be a numeric value")))
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl Eq for Money {}

impl fmt::Display for Money {
    /// Always `<fixed point amount> <code>`, e.g. `10000.00 USD`, whatever
    /// the locale.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.currency.precision() as usize;
        write!(f, "{:.*} {}", digits, self.amount, self.currency)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
