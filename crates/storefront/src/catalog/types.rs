//! Catalog data models.

use serde::Deserialize;
use vitrine_core::{CartItem, Price, ProductId};

/// A product as served by the catalog API.
///
/// Immutable once fetched. Cart items snapshot the fields they need at
/// add-time instead of holding onto the product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// Review aggregate for a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    /// Average score, 0-5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

impl Product {
    /// Build a cart item snapshotting this product at the given quantity.
    #[must_use]
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
            quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn deserializes_catalog_product() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
        // Decimal prices survive the JSON number representation intact
        assert_eq!(product.price.amount().to_string(), "109.95");
    }

    #[test]
    fn to_cart_item_snapshots_fields() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        let item = product.to_cart_item(3);

        assert_eq!(item.id, product.id);
        assert_eq!(item.title, product.title);
        assert_eq!(item.price, product.price);
        assert_eq!(item.image, product.image);
        assert_eq!(item.quantity, 3);
    }
}
