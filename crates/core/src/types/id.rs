//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// Catalog entity ids are opaque document ids assigned by the catalog
/// service, so the backing representation is a string rather than an
/// integer.
///
/// # Example
///
/// ```rust
/// # use encore_core::define_id;
/// define_id!(ProductId);
///
/// let id = ProductId::new("6650f2a4c3");
/// assert_eq!(id.as_str(), "6650f2a4c3");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);

/// An order confirmation identifier.
///
/// Rendered as `ORD-` followed by a zero-padded 6-digit number, e.g.
/// `ORD-004217`. Display-only: orders are not persisted, so the identifier
/// carries no lookup semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order ID from an order number.
    ///
    /// Numbers up to 999 999 are zero-padded to six digits.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(format!("ORD-{number:06}"))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_roundtrip() {
        let id = ProductId::new("6650f2a4c3");
        assert_eq!(id.as_str(), "6650f2a4c3");
        assert_eq!(id.to_string(), "6650f2a4c3");
        assert_eq!(ProductId::from("6650f2a4c3"), id);
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_order_id_zero_padding() {
        assert_eq!(OrderId::new(0).as_str(), "ORD-000000");
        assert_eq!(OrderId::new(42).as_str(), "ORD-000042");
        assert_eq!(OrderId::new(999_999).as_str(), "ORD-999999");
    }

    #[test]
    fn test_order_id_display() {
        let id = OrderId::new(4217);
        assert_eq!(format!("{id}"), "ORD-004217");
    }
}
