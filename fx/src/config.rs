//! Registry configuration.

use coinage_common::{register_precision, PrecisionTable};
use tracing::info;

use crate::error::FxResult;
use crate::rate::is_rate_literal;

/// Environment variable holding seed rates, separated by `;`.
pub const RATES_ENV: &str = "COINAGE_RATES";

/// Environment variable holding `CODE=N` precision overrides, separated by `,`.
pub const PRECISIONS_ENV: &str = "COINAGE_PRECISIONS";

/// Configuration for building a [`RateRegistry`](crate::RateRegistry).
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Rate literals registered in order, e.g. `"BGN/EUR 0.511280836"`.
    pub seed_rates: Vec<String>,
    /// Overrides for the default precision table, e.g. `"EUR=3,XBT=8"`.
    pub precision_overrides: Option<String>,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(rates) = lookup(RATES_ENV) {
            config.seed_rates = rates
                .split(';')
                .map(str::trim)
                .filter(|literal| !literal.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(precisions) = lookup(PRECISIONS_ENV) {
            if !precisions.trim().is_empty() {
                config.precision_overrides = Some(precisions);
            }
        }

        config
    }

    /// Parse the precision overrides, if any.
    pub fn precision_table(&self) -> FxResult<Option<PrecisionTable>> {
        match &self.precision_overrides {
            Some(spec) => Ok(Some(PrecisionTable::parse_overrides(spec)?)),
            None => Ok(None),
        }
    }

    /// Register the precision overrides in the default precision table.
    pub fn apply_precisions(&self) -> FxResult<()> {
        if let Some(table) = self.precision_table()? {
            info!(entries = table.len(), "Applying precision overrides");
            for (code, precision) in table.entries() {
                register_precision(code, precision);
            }
        }
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(literal) = self.seed_rates.iter().find(|l| !is_rate_literal(l)) {
            return Err(format!("Seed rate {literal:?} is not a valid rate literal"));
        }

        self.precision_table().map_err(|e| e.to_string())?;

        Ok(())
    }
}
