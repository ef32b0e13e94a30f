//! Integration tests for Encore.
//!
//! Exercises the cart/checkout core end to end: cart mutations and
//! persistence, the checkout gates, and the demo payment path through to an
//! order confirmation.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p encore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Gate guards, validation, demo payment, failure paths
//! - `cart_persistence` - Persist/restore behavior across store instances

#![cfg_attr(not(test), forbid(unsafe_code))]

use encore_core::{CurrencyCode, Price, ProductId};
use encore_storefront::catalog::{Product, ProductDetails};
use rust_decimal::Decimal;

/// Install a test tracing subscriber (no-op if one is already set).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_storefront=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Build a catalog product for tests.
#[must_use]
pub fn test_product(id: &str, name: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: format!("{name} description"),
        price: Price::new(price, CurrencyCode::USD),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        album: None,
        details: ProductDetails::Apparel {
            fabric: Some("100% cotton".to_owned()),
            fit: None,
            care: None,
        },
    }
}
