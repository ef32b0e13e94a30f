//! Cart persistence behavior across store instances.

use std::fs;

use encore_core::ProductId;
use encore_integration_tests::test_product;
use encore_storefront::cart::{
    CART_STORAGE_KEY, CartStorage, CartStore, FileStorage, MemoryStorage,
};
use rust_decimal_macros::dec;

#[test]
fn cart_survives_store_recreation() {
    let storage = MemoryStorage::new();

    {
        let mut cart = CartStore::new(Box::new(storage.clone()));
        cart.add_item(&test_product("tee", "Tour Tee", dec!(25)));
        cart.add_item(&test_product("tee", "Tour Tee", dec!(25)));
        cart.add_item(&test_product("lp", "Live LP", dec!(15)));
    }

    let restored = CartStore::new(Box::new(storage));
    assert_eq!(restored.item_count(), 3);
    assert_eq!(restored.subtotal().amount, dec!(65));

    let ids: Vec<&str> = restored
        .items()
        .iter()
        .map(|item| item.product_id.as_str())
        .collect();
    assert_eq!(ids, vec!["tee", "lp"]);
}

#[test]
fn corrupt_stored_cart_degrades_to_empty() {
    let storage = MemoryStorage::new();
    storage
        .set(CART_STORAGE_KEY, "definitely not json")
        .expect("memory set");

    let cart = CartStore::new(Box::new(storage));
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn file_storage_round_trips_cart() {
    let dir = std::env::temp_dir().join(format!(
        "encore-cart-test-{}-{}",
        std::process::id(),
        "roundtrip"
    ));
    let _ = fs::remove_dir_all(&dir);

    {
        let mut cart = CartStore::new(Box::new(FileStorage::new(&dir)));
        cart.add_item(&test_product("tee", "Tour Tee", dec!(25)));
        cart.set_quantity(&ProductId::new("tee"), 4);
    }

    // The serialized cart is a plain JSON array of line items
    let raw = fs::read_to_string(dir.join("cart.json")).expect("cart file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value.as_array().map(Vec::len), Some(1));

    let restored = CartStore::new(Box::new(FileStorage::new(&dir)));
    assert_eq!(restored.item_count(), 4);
    assert_eq!(restored.subtotal().amount, dec!(100));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_storage_starts_empty() {
    let dir = std::env::temp_dir().join(format!(
        "encore-cart-test-{}-{}",
        std::process::id(),
        "missing"
    ));
    let _ = fs::remove_dir_all(&dir);

    let cart = CartStore::new(Box::new(FileStorage::new(&dir)));
    assert!(cart.is_empty());
}
