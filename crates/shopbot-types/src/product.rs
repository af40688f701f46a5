//! Product catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as exposed over the API.
///
/// Serializes with the external key names the storefront expects:
/// `delivery_days` goes out as `deliveryDays`, everything else stays
/// snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub reviews: i64,
    pub warehouse: String,
    #[serde(rename = "deliveryDays")]
    pub delivery_days: i64,
    pub stock: i64,
}

/// Fields for creating a new product. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub reviews: i64,
    pub warehouse: String,
    pub delivery_days: i64,
    pub stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: 7,
            name: "Wireless Mouse".to_string(),
            price: Decimal::new(1299, 2),
            image: "https://img.example/mouse.jpg".to_string(),
            category: "electronics".to_string(),
            rating: 4.5,
            reviews: 120,
            warehouse: "Cikarang".to_string(),
            delivery_days: 2,
            stock: 30,
        }
    }

    #[test]
    fn test_product_serializes_delivery_days_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["deliveryDays"], 2);
        assert!(json.get("delivery_days").is_none());
        assert_eq!(json["price"], serde_json::json!("12.99"));
    }

    #[test]
    fn test_product_roundtrip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }
}
