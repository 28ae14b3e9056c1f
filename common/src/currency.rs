//! Currency identity and minor-unit precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{MoneyError, MoneyResult};
use crate::precision::{default_precision, PrecisionTable};

/// A currency code together with its minor-unit precision.
///
/// Equality and hashing only look at the code: `EUR` with precision 2 equals
/// `EUR` with precision 5. Use [`Currency::is_same_as`] to also compare the
/// precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCurrency")]
pub struct Currency {
    code: String,
    precision: u32,
}

impl Currency {
    /// Create a currency, taking its precision from the default table.
    pub fn new(code: impl Into<String>) -> MoneyResult<Self> {
        let code = Self::checked_code(code.into())?;
        let precision = default_precision(&code).ok_or_else(|| {
            MoneyError::UnknownCurrency(format!(
                "Currency precision is not set and there is no default for {code}"
            ))
        })?;

        Ok(Self { code, precision })
    }

    /// Create a currency with an explicit precision.
    pub fn with_precision(code: impl Into<String>, precision: u32) -> MoneyResult<Self> {
        let code = Self::checked_code(code.into())?;
        Ok(Self { code, precision })
    }

    /// Create a currency, taking its precision from the given table.
    pub fn from_table(code: impl Into<String>, table: &PrecisionTable) -> MoneyResult<Self> {
        let code = Self::checked_code(code.into())?;
        match table.get(&code) {
            Some(precision) => Ok(Self { code, precision }),
            None => Err(MoneyError::UnknownCurrency(format!(
                "Currency precision is not set and there is no default for {code}"
            ))),
        }
    }

    fn checked_code(code: String) -> MoneyResult<String> {
        if code.is_empty() {
            return Err(MoneyError::invalid("Currency code should not be empty"));
        }
        Ok(code)
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the number of minor-unit digits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Overwrite the precision.
    pub fn set_precision(&mut self, precision: u32) {
        self.precision = precision;
    }

    /// Check if both currencies have the same code.
    pub fn is_equal_to(&self, other: &Currency) -> bool {
        self.code == other.code
    }

    /// Check if both currencies have the same code and precision.
    pub fn is_same_as(&self, other: &Currency) -> bool {
        self.is_equal_to(other) && self.precision == other.precision
    }
}

/// Wire form of [`Currency`], validated on the way in.
#[derive(Deserialize)]
struct RawCurrency {
    code: String,
    precision: u32,
}

impl TryFrom<RawCurrency> for Currency {
    type Error = MoneyError;

    fn try_from(raw: RawCurrency) -> Result<Self, Self::Error> {
        Self::with_precision(raw.code, raw.precision)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An ordered pair of currencies, rendered as `SRC/DST`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency converted from.
    pub source: Currency,
    /// Currency converted to.
    pub target: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(source: Currency, target: Currency) -> Self {
        Self { source, target }
    }

    /// Get the pair pointing the other way.
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    /// Check if the pair matches `source -> target` by code.
    pub fn matches(&self, source: &Currency, target: &Currency) -> bool {
        self.source.is_equal_to(source) && self.target.is_equal_to(target)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.target)
    }
}
