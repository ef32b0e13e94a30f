//! Core types for Encore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod postal;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use postal::{PostalCode, PostalCodeError};
pub use price::{CurrencyCode, Price};
