//! Coinage FX
//!
//! Exchange rates and a rate registry for converting money between
//! currencies.
//!
//! # Features
//!
//! - Rate literals such as `BGN/EUR 0.511280836`
//! - Reverse conversion through the reciprocal of a registered rate
//! - First registered rate wins when a pair is registered twice
//! - A process-wide default registry behind [`ExchangeTo`]
//!
//! # Example
//!
//! ```rust
//! use coinage_common::Money;
//! use coinage_fx::RateRegistry;
//!
//! let registry = RateRegistry::new();
//! registry.add_literal("BGN/EUR 0.511280836")?;
//!
//! let eur = registry.exchange_literal("100 BGN", "EUR")?;
//! assert_eq!(eur.to_string(), "51.13 EUR");
//!
//! let bgn = registry.exchange_money(&eur, "BGN")?;
//! assert_eq!(bgn, Money::parse("100 BGN")?);
//! # Ok::<(), coinage_fx::FxError>(())
//! ```

pub mod config;
pub mod error;
pub mod rate;
pub mod registry;
pub mod request;

pub use config::RegistryConfig;
pub use error::{ErrorKind, FxError, FxResult};
pub use rate::{Direction, ExchangeRate};
pub use registry::{default_registry, ExchangeTo, RateRegistry};
pub use request::{CurrencyRef, ExchangeSource};
