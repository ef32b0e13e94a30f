//! Catalog wire records and conversion into domain types.
//!
//! The catalog service returns flat product documents with a sibling
//! `category` string and a single `details` object whose fields are all
//! optional. Conversion produces the tagged [`ProductDetails`] variant for
//! the category and drops empty/zero placeholder values.

use encore_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::types::{Product, ProductDetails};

/// Raw product record as returned by the catalog service.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub details: DetailsRecord,
}

/// Raw category details object; every field is optional on the wire and
/// defaults to an empty/zero placeholder.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailsRecord {
    #[serde(default)]
    pub fabric: String,
    #[serde(default)]
    pub fit: String,
    #[serde(default)]
    pub care: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "releaseYear", default)]
    pub release_year: i32,
    #[serde(default)]
    pub tracks: u32,
}

/// Convert a wire record into a domain [`Product`].
pub(crate) fn convert_product(record: ProductRecord) -> Product {
    let amount = Decimal::try_from(record.price).unwrap_or_else(|_| {
        warn!(
            product_id = %record.id,
            price = record.price,
            "Product price not representable, treating as zero"
        );
        Decimal::ZERO
    });

    let details = convert_details(&record.category, record.details);

    Product {
        id: ProductId::new(record.id),
        name: record.name,
        description: record.description,
        price: Price::new(amount.max(Decimal::ZERO), CurrencyCode::USD),
        image_url: record.image_url,
        album: non_empty(record.album),
        details,
    }
}

/// Pick the tagged variant for a category, keeping only populated fields.
fn convert_details(category: &str, details: DetailsRecord) -> ProductDetails {
    match category.to_ascii_lowercase().as_str() {
        "apparel" => ProductDetails::Apparel {
            fabric: non_empty(details.fabric),
            fit: non_empty(details.fit),
            care: non_empty(details.care),
        },
        "music" => ProductDetails::Music {
            format: non_empty(details.format),
            release_year: (details.release_year != 0).then_some(details.release_year),
            track_count: (details.tracks != 0).then_some(details.tracks),
        },
        _ => ProductDetails::Other {
            category: category.to_owned(),
        },
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(category: &str, details: DetailsRecord) -> ProductRecord {
        ProductRecord {
            id: "p1".to_string(),
            name: "Tour Tee".to_string(),
            description: "Black tour tee".to_string(),
            price: 25.0,
            image_url: "https://cdn.example.com/tee.jpg".to_string(),
            category: category.to_string(),
            album: String::new(),
            details,
        }
    }

    #[test]
    fn test_convert_apparel() {
        let product = convert_product(record(
            "apparel",
            DetailsRecord {
                fabric: "100% cotton".to_string(),
                fit: String::new(),
                care: "machine wash cold".to_string(),
                ..DetailsRecord::default()
            },
        ));

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price.amount, dec!(25));
        match product.details {
            ProductDetails::Apparel { fabric, fit, care } => {
                assert_eq!(fabric.as_deref(), Some("100% cotton"));
                assert_eq!(fit, None);
                assert_eq!(care.as_deref(), Some("machine wash cold"));
            }
            other => panic!("expected apparel details, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_music_zero_placeholders_dropped() {
        let product = convert_product(record(
            "music",
            DetailsRecord {
                format: "vinyl".to_string(),
                release_year: 0,
                tracks: 12,
                ..DetailsRecord::default()
            },
        ));

        match product.details {
            ProductDetails::Music {
                format,
                release_year,
                track_count,
            } => {
                assert_eq!(format.as_deref(), Some("vinyl"));
                assert_eq!(release_year, None);
                assert_eq!(track_count, Some(12));
            }
            other => panic!("expected music details, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_unknown_category_falls_back_to_other() {
        let product = convert_product(record("posters", DetailsRecord::default()));

        match product.details {
            ProductDetails::Other { ref category } => assert_eq!(category, "posters"),
            other => panic!("expected other details, got {other:?}"),
        }
        assert_eq!(product.details.category(), "posters");
    }

    #[test]
    fn test_convert_category_is_case_insensitive() {
        let product = convert_product(record("Apparel", DetailsRecord::default()));
        assert!(matches!(product.details, ProductDetails::Apparel { .. }));
    }

    #[test]
    fn test_empty_album_becomes_none() {
        let product = convert_product(record("apparel", DetailsRecord::default()));
        assert_eq!(product.album, None);

        let mut with_album = record("apparel", DetailsRecord::default());
        with_album.album = "Midnight Static".to_string();
        assert_eq!(
            convert_product(with_album).album.as_deref(),
            Some("Midnight Static")
        );
    }

    #[test]
    fn test_negative_price_clamped_to_zero() {
        let mut bad = record("apparel", DetailsRecord::default());
        bad.price = -4.5;
        assert_eq!(convert_product(bad).price.amount, Decimal::ZERO);
    }

    #[test]
    fn test_wire_record_deserializes_catalog_json() {
        let json = r#"{
            "_id": "6650f2a4c3",
            "name": "Live at Red Rocks",
            "description": "Double LP",
            "price": 34.99,
            "imageUrl": "https://cdn.example.com/lp.jpg",
            "category": "music",
            "album": "Live at Red Rocks",
            "details": { "format": "vinyl", "releaseYear": 2023, "tracks": 14 }
        }"#;

        let record: ProductRecord = serde_json::from_str(json).unwrap();
        let product = convert_product(record);
        assert_eq!(product.name, "Live at Red Rocks");
        assert_eq!(product.price.amount, dec!(34.99));
        assert!(matches!(
            product.details,
            ProductDetails::Music {
                release_year: Some(2023),
                ..
            }
        ));
    }
}
