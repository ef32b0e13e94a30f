//! Shopping cart store.
//!
//! The authoritative in-session collection of line items with derived
//! totals, mutated through an explicit API and injected into whatever
//! presentation layer consumes it. Every mutation synchronously persists
//! the full line-item collection to the injected storage; corrupt or
//! missing stored state falls back to an empty cart.

mod storage;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};

use std::time::{Duration, Instant};

use encore_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Product;

/// Storage key the serialized cart lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// How long the add-to-cart notification stays visible.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// One product-and-quantity pairing inside the cart.
///
/// Product fields needed for display are denormalized at add time; the cart
/// does not own the product's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Reference to the catalog product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    /// Display image at add time.
    pub image_url: String,
    /// Units of this product in the cart; never below 1.
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount * Decimal::from(self.quantity)
    }
}

/// Transient add-to-cart notice.
#[derive(Debug, Clone)]
struct Notification {
    message: String,
    expires_at: Instant,
}

/// The in-session shopping cart.
///
/// Holds at most one [`LineItem`] per product id, in insertion order.
/// Derived values ([`subtotal`](Self::subtotal), [`item_count`](Self::item_count))
/// are recomputed from the line items on every call.
pub struct CartStore {
    items: Vec<LineItem>,
    notification: Option<Notification>,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// Create a cart store, restoring any previously persisted line items.
    ///
    /// Missing or unreadable stored state yields an empty cart; it is never
    /// surfaced as an error.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        let items = restore(storage.as_ref());
        Self {
            items,
            notification: None,
            storage,
        }
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented; otherwise a new line item with quantity 1 is appended.
    /// Records a transient "added to cart" notification.
    pub fn add_item(&mut self, product: &Product) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(LineItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity: 1,
            }),
        }

        self.notification = Some(Notification {
            message: format!("{} added to cart", product.name),
            expires_at: Instant::now() + NOTIFICATION_TTL,
        });

        self.persist();
    }

    /// Remove the line item for `product_id`. Absent products are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
        self.persist();
    }

    /// Overwrite the quantity for `product_id`, clamped to a minimum of 1.
    ///
    /// Removal is a separate explicit operation; a quantity of 0 does not
    /// delete the line item. Products not in the cart are a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = quantity;
        }
        self.persist();
    }

    /// Empty the cart unconditionally. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of price times quantity across current line items.
    ///
    /// The currency is taken from the first line item (all catalog prices
    /// share the store currency); an empty cart reports the default.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |item| item.price.currency_code);
        let amount: Decimal = self.items.iter().map(LineItem::line_total).sum();
        Price::new(amount, currency)
    }

    /// Sum of quantities across current line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The current add-to-cart notification, if it has not expired yet.
    #[must_use]
    pub fn notification(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .filter(|n| Instant::now() < n.expires_at)
            .map(|n| n.message.as_str())
    }

    /// Serialize the full line-item collection to storage.
    ///
    /// Write failures are logged and swallowed; persistence is opportunistic
    /// and never blocks a cart mutation.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &json) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Read the persisted line items, treating absence or corruption as empty.
fn restore(storage: &dyn CartStorage) -> Vec<LineItem> {
    let Some(raw) = storage.get(CART_STORAGE_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Stored cart unreadable, starting empty");
            Vec::new()
        }
    }
}
