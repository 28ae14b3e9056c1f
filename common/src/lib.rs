//! Coinage Common Types
//!
//! This crate contains the monetary building blocks shared by the coinage
//! crates: currencies with their minor-unit precision, the default precision
//! table and precision-aware money amounts.

pub mod currency;
pub mod error;
pub mod money;
pub mod precision;

pub use currency::*;
pub use error::*;
pub use money::*;
pub use precision::*;
