//! Exchange rate registry.

use std::sync::{Arc, OnceLock};

use coinage_common::{Currency, CurrencyPair, Money};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::config::RegistryConfig;
use crate::error::{FxError, FxResult};
use crate::rate::ExchangeRate;
use crate::request::{CurrencyRef, ExchangeSource};

/// An ordered collection of exchange rates.
///
/// Rates are never merged or replaced: when several rates are registered for
/// the same pair, the first one registered is the one used. A rate
/// registered as `A/B` also serves `B/A` lookups, but only once no rate is
/// registered for `B/A` itself.
#[derive(Debug, Default)]
pub struct RateRegistry {
    rates: RwLock<Vec<Arc<ExchangeRate>>>,
}

impl RateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded from configuration.
    ///
    /// Precision overrides are applied to the default precision table before
    /// the seed rates are parsed, so seed rates may use the overridden codes.
    pub fn from_config(config: &RegistryConfig) -> FxResult<Self> {
        config.apply_precisions()?;

        let registry = Self::new();
        for literal in &config.seed_rates {
            registry.add_literal(literal)?;
        }

        info!(rates = registry.len(), "Rate registry seeded from configuration");
        Ok(registry)
    }

    /// Append a rate and return the shared entry.
    pub fn add(&self, rate: ExchangeRate) -> Arc<ExchangeRate> {
        debug!(pair = %rate.pair(), rate = %rate.rate(), "Adding exchange rate");

        let rate = Arc::new(rate);
        self.rates.write().push(Arc::clone(&rate));
        rate
    }

    /// Parse a rate literal such as `"EUR/USD 1.25"` and append it.
    pub fn add_literal(&self, literal: &str) -> FxResult<Arc<ExchangeRate>> {
        Ok(self.add(ExchangeRate::parse(literal)?))
    }

    /// Find a rate usable to go from `source` to `target`.
    ///
    /// All rates are searched for `source/target` first, in registration
    /// order. Only when none matches are they searched again for
    /// `target/source`. The registered entry is returned as is; the caller
    /// picks the direction when exchanging.
    pub fn find_rate(&self, source: &Currency, target: &Currency) -> Option<Arc<ExchangeRate>> {
        let rates = self.rates.read();

        if let Some(rate) = rates.iter().find(|r| connects(r, source, target)) {
            debug!(source = %source, target = %target, "Found forward rate");
            return Some(Arc::clone(rate));
        }

        if let Some(rate) = rates.iter().find(|r| connects(r, target, source)) {
            debug!(source = %source, target = %target, "Found reverse rate");
            return Some(Arc::clone(rate));
        }

        debug!(source = %source, target = %target, "No rate found");
        None
    }

    /// Exchange any supported source into the target currency.
    #[instrument(skip_all)]
    pub fn exchange(
        &self,
        source: impl Into<ExchangeSource>,
        target: impl Into<CurrencyRef>,
    ) -> FxResult<Money> {
        let money = source.into().into_money()?;
        let target = target.into().resolve()?;

        let rate = self.find_rate(money.currency(), &target).ok_or_else(|| {
            FxError::RateNotFound(CurrencyPair::new(money.currency().clone(), target.clone()))
        })?;

        let output = rate.exchange(&money)?;

        info!(
            input = %money,
            output = %output,
            rate = %rate,
            "Exchange completed"
        );

        Ok(output)
    }

    /// Exchange a bare amount of `source` into `target`.
    pub fn exchange_amount(
        &self,
        amount: Decimal,
        source: impl Into<CurrencyRef>,
        target: impl Into<CurrencyRef>,
    ) -> FxResult<Money> {
        self.exchange(ExchangeSource::amount(amount, source), target)
    }

    /// Exchange money into `target`.
    pub fn exchange_money(&self, money: &Money, target: impl Into<CurrencyRef>) -> FxResult<Money> {
        self.exchange(money, target)
    }

    /// Exchange a money literal such as `"100 BGN"` into `target`.
    pub fn exchange_literal(&self, literal: &str, target: impl Into<CurrencyRef>) -> FxResult<Money> {
        self.exchange(literal, target)
    }

    /// Snapshot of the registered rates, in registration order.
    pub fn rates(&self) -> Vec<Arc<ExchangeRate>> {
        self.rates.read().clone()
    }

    /// Number of registered rates.
    pub fn len(&self) -> usize {
        self.rates.read().len()
    }

    /// Check if there are no registered rates.
    pub fn is_empty(&self) -> bool {
        self.rates.read().is_empty()
    }

    /// Remove every registered rate.
    pub fn clear(&self) {
        let mut rates = self.rates.write();
        info!(rates = rates.len(), "Clearing rate registry");
        rates.clear();
    }
}

fn connects(rate: &ExchangeRate, source: &Currency, target: &Currency) -> bool {
    rate.source().is_equal_to(source) && rate.target().is_equal_to(target)
}

static DEFAULT_REGISTRY: OnceLock<RateRegistry> = OnceLock::new();

/// The process-wide registry used by [`ExchangeTo`].
///
/// Created empty on first access and kept for the life of the process. Use
/// [`RateRegistry::clear`] to reset it.
pub fn default_registry() -> &'static RateRegistry {
    DEFAULT_REGISTRY.get_or_init(|| {
        debug!("Creating default rate registry");
        RateRegistry::new()
    })
}

/// Exchange money through the default registry.
pub trait ExchangeTo {
    fn exchange_to(&self, target: impl Into<CurrencyRef>) -> FxResult<Money>;
}

impl ExchangeTo for Money {
    fn exchange_to(&self, target: impl Into<CurrencyRef>) -> FxResult<Money> {
        default_registry().exchange_money(self, target)
    }
}
