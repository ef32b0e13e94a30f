//! Domain types for the catalog service.
//!
//! These types provide a clean API separate from the raw wire records the
//! catalog service returns (see `conversions`).

use encore_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Owned by the catalog service and referenced read-only by the cart core;
/// the fields a cart line item needs (name, price, image) are denormalized
/// at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Opaque catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Display image reference.
    pub image_url: String,
    /// Optional album or collection grouping label.
    pub album: Option<String>,
    /// Category-dependent attributes.
    pub details: ProductDetails,
}

/// Category-dependent product attributes.
///
/// Each category carries only its relevant attribute set; categories the
/// core does not model structurally fall back to [`ProductDetails::Other`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProductDetails {
    /// Apparel: shirts, hoodies, and other wearables.
    Apparel {
        /// Fabric composition (e.g., "100% cotton").
        fabric: Option<String>,
        /// Fit description (e.g., "unisex regular").
        fit: Option<String>,
        /// Care instructions.
        care: Option<String>,
    },
    /// Music: vinyl, CDs, cassettes.
    Music {
        /// Physical format (e.g., "vinyl", "CD").
        format: Option<String>,
        /// Year of release.
        release_year: Option<i32>,
        /// Number of tracks.
        track_count: Option<u32>,
    },
    /// Any category without structured attributes.
    Other {
        /// The category label as reported by the catalog.
        category: String,
    },
}

impl ProductDetails {
    /// The category label this variant corresponds to.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Apparel { .. } => "apparel",
            Self::Music { .. } => "music",
            Self::Other { category } => category,
        }
    }
}
