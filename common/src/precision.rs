//! Minor-unit precision tables.
//!
//! A [`PrecisionTable`] maps currency codes to the number of decimal digits
//! of their smallest denomination. The process-wide default table starts out
//! with the ISO 4217 data below and can be extended or replaced at runtime.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::{MoneyError, MoneyResult};

/// ISO 4217 currencies with zero minor units.
const ZERO_DIGIT_CODES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

/// ISO 4217 currencies with three minor units.
const THREE_DIGIT_CODES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// ISO 4217 currencies with four minor units.
const FOUR_DIGIT_CODES: &[&str] = &["CLF", "UYW"];

/// ISO 4217 currencies with two minor units.
const TWO_DIGIT_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF",
    "CHE", "CHF", "CHW", "CNY", "COP", "COU", "CRC", "CUC", "CUP", "CVE", "CZK", "DKK", "DOP",
    "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GTQ",
    "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IRR", "JMD", "KES", "KGS",
    "KHR", "KPW", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN",
    "NIO", "NOK", "NPR", "NZD", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "QAR", "RON", "RSD",
    "RUB", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL", "SOS", "SRD", "SSP",
    "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH",
    "USD", "USN", "UYU", "UZS", "VED", "VES", "WST", "XCD", "YER", "ZAR", "ZMW", "ZWL",
];

/// Mapping from currency code to minor-unit precision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecisionTable {
    precisions: HashMap<String, u32>,
}

impl PrecisionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the ISO 4217 minor units.
    pub fn iso4217() -> Self {
        let groups: [(&[&str], u32); 4] = [
            (ZERO_DIGIT_CODES, 0),
            (TWO_DIGIT_CODES, 2),
            (THREE_DIGIT_CODES, 3),
            (FOUR_DIGIT_CODES, 4),
        ];

        groups
            .iter()
            .flat_map(|(codes, precision)| {
                codes
                    .iter()
                    .map(move |code| (code.to_string(), *precision))
            })
            .collect()
    }

    /// Parse `CODE=N` entries separated by commas, e.g. `"EUR=3,XBT=8"`.
    pub fn parse_overrides(spec: &str) -> MoneyResult<Self> {
        let mut table = Self::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, digits) = entry.split_once('=').ok_or_else(|| {
                MoneyError::invalid(format!("Precision entry {entry} is not in CODE=N form"))
            })?;

            let code = code.trim();
            if code.is_empty() {
                return Err(MoneyError::invalid(format!(
                    "Precision entry {entry} has an empty currency code"
                )));
            }

            let precision = digits.trim().parse::<u32>().map_err(|_| {
                MoneyError::invalid(format!("Precision entry {entry} has a non-numeric precision"))
            })?;

            table.insert(code, precision);
        }

        Ok(table)
    }

    /// Get the precision for a currency code.
    pub fn get(&self, code: &str) -> Option<u32> {
        self.precisions.get(code).copied()
    }

    /// Check if the table knows a currency code.
    pub fn contains(&self, code: &str) -> bool {
        self.precisions.contains_key(code)
    }

    /// Insert or overwrite the precision of a currency code.
    pub fn insert(&mut self, code: impl Into<String>, precision: u32) -> Option<u32> {
        self.precisions.insert(code.into(), precision)
    }

    /// Remove a currency code.
    pub fn remove(&mut self, code: &str) -> Option<u32> {
        self.precisions.remove(code)
    }

    /// Copy every entry of `other` into this table, overwriting duplicates.
    pub fn merge(&mut self, other: &PrecisionTable) {
        for (code, precision) in &other.precisions {
            self.precisions.insert(code.clone(), *precision);
        }
    }

    /// Iterate over `(code, precision)` entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.precisions
            .iter()
            .map(|(code, precision)| (code.as_str(), *precision))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.precisions.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.precisions.is_empty()
    }
}

impl FromIterator<(String, u32)> for PrecisionTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            precisions: iter.into_iter().collect(),
        }
    }
}

static DEFAULT_PRECISIONS: OnceLock<RwLock<PrecisionTable>> = OnceLock::new();

fn default_table() -> &'static RwLock<PrecisionTable> {
    DEFAULT_PRECISIONS.get_or_init(|| RwLock::new(PrecisionTable::iso4217()))
}

/// Look up a code in the process-wide default table.
pub fn default_precision(code: &str) -> Option<u32> {
    default_table().read().get(code)
}

/// Add or overwrite one entry of the process-wide default table.
pub fn register_precision(code: impl Into<String>, precision: u32) {
    let code = code.into();
    debug!(code = %code, precision, "Registering default precision");
    default_table().write().insert(code, precision);
}

/// Replace the process-wide default table.
pub fn install_precisions(table: PrecisionTable) {
    info!(entries = table.len(), "Installing default precision table");
    *default_table().write() = table;
}

/// Restore the process-wide default table to the ISO 4217 data.
pub fn reset_precisions() {
    install_precisions(PrecisionTable::iso4217());
}

/// Snapshot of the process-wide default table.
pub fn default_precisions() -> PrecisionTable {
    default_table().read().clone()
}
