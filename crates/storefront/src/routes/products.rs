//! Product route handlers.
//!
//! The listing doubles as the home page. Filtering happens server side over
//! the full catalog list, so the query string is the only listing state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use vitrine_core::{Price, ProductId};

use crate::catalog::Product;
use crate::filters;
use crate::models::CartSession;
use crate::state::AppState;

// =============================================================================
// Display Data
// =============================================================================

/// Product display data for listing cards.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub image: String,
    pub rating: String,
    pub review_count: u32,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i32,
    pub sku: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: String,
    pub rating: String,
    pub review_count: u32,
    /// Five slots, filled stars first. The filled count is the floor of the
    /// rating, clamped to the row.
    pub stars: Vec<bool>,
}

/// Promotional banner display data.
#[derive(Clone)]
pub struct BannerView {
    pub message: &'static str,
    pub theme: &'static str,
}

/// One slot in the listing grid, optionally preceded by a full-width banner.
#[derive(Clone)]
pub struct ListingEntry {
    pub banner_before: Option<BannerView>,
    pub product: ProductCardView,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a price for display in Singapore dollars.
fn format_price(price: &Price) -> String {
    format!("S${price:.2}")
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            price: format_price(&product.price),
            image: product.image.clone(),
            rating: format!("{:.1}", product.rating.rate),
            review_count: product.rating.count,
        }
    }
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            sku: format!("#{:06}", product.id.as_i32()),
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: format_price(&product.price),
            rating: format!("{:.1}", product.rating.rate),
            review_count: product.rating.count,
            stars: star_flags(product.rating.rate),
        }
    }
}

// =============================================================================
// Listing Helpers
// =============================================================================

/// Messages cycled through the in-grid promotional banners.
const BANNERS: [BannerView; 5] = [
    BannerView {
        message: "🎉 Special Offer - Free Shipping on Orders Over $50!",
        theme: "banner-offer",
    },
    BannerView {
        message: "🛍️ New Arrivals - Check Out Latest Products!",
        theme: "banner-arrivals",
    },
    BannerView {
        message: "💰 Save 20% on Electronics This Week!",
        theme: "banner-electronics",
    },
    BannerView {
        message: "🔥 Limited Time Deal - Buy 2 Get 1 Free!",
        theme: "banner-deal",
    },
    BannerView {
        message: "✨ Premium Quality Products at Best Prices!",
        theme: "banner-premium",
    },
];

/// A banner slot opens before every twelfth card of the filtered grid.
const BANNER_INTERVAL: usize = 12;

/// Filter by case-insensitive title substring and exact category.
///
/// An empty query or category leaves that axis unfiltered. The input order
/// is preserved.
fn filter_products<'a>(products: &'a [Product], query: &str, category: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .filter(|product| category.is_empty() || product.category == category)
        .collect()
}

/// Categories in first-occurrence order over the full catalog list.
fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Star flags for the five-star rating row.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn star_flags(rate: f64) -> Vec<bool> {
    let filled = rate.floor().clamp(0.0, 5.0) as usize;
    (0..5).map(|slot| slot < filled).collect()
}

/// Interleave rotating banners into the filtered grid.
fn listing_entries(products: Vec<ProductCardView>) -> Vec<ListingEntry> {
    products
        .into_iter()
        .enumerate()
        .map(|(index, product)| {
            let banner_before = if index > 0 && index % BANNER_INTERVAL == 0 {
                let ordinal = index / BANNER_INTERVAL - 1;
                BANNERS.get(ordinal % BANNERS.len()).cloned()
            } else {
                None
            };
            ListingEntry {
                banner_before,
                product,
            }
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub entries: Vec<ListingEntry>,
    pub categories: Vec<String>,
    pub query: String,
    pub selected_category: String,
    pub shown_count: usize,
    pub total_count: usize,
    pub load_failed: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    /// Quantity of this product already in the visitor's cart, if any.
    pub in_cart_quantity: Option<u32>,
}

/// Missing product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate;

/// Display the product listing page.
///
/// A failed catalog fetch renders the page over an empty list with a notice
/// rather than erroring out.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let (products, load_failed) = match state.catalog().list_products().await {
        Ok(products) => (products, false),
        Err(e) => {
            tracing::error!("Failed to fetch product listing: {e}");
            (Vec::new(), true)
        }
    };

    let categories = derive_categories(&products);
    let filtered = filter_products(&products, &query.q, &query.category);
    let total_count = products.len();
    let shown_count = filtered.len();
    let cards = filtered.into_iter().map(ProductCardView::from).collect();

    ProductsIndexTemplate {
        entries: listing_entries(cards),
        categories,
        query: query.q,
        selected_category: query.category,
        shown_count,
        total_count,
        load_failed,
    }
}

/// Display the product detail page.
///
/// Unknown ids and catalog failures both land on the not-found page, the
/// latter with an error logged.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    let id = ProductId::new(id);

    let product = match state.catalog().get_product(id).await {
        Ok(product) => product,
        Err(e) => {
            if !e.is_not_found() {
                tracing::error!("Failed to fetch product {id}: {e}");
            }
            return (StatusCode::NOT_FOUND, ProductNotFoundTemplate).into_response();
        }
    };

    let cart = CartSession::new(session).load().await;
    let in_cart_quantity = cart.get(id).map(|item| item.quantity);

    ProductShowTemplate {
        product: ProductDetailView::from(&product),
        in_cart_quantity,
    }
    .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use crate::catalog::{Product, Rating};

    use super::*;

    fn product(id: i32, title: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(Decimal::new(999, 2)),
            description: String::new(),
            category: category.to_string(),
            image: format!("https://img.example.com/{id}.jpg"),
            rating: Rating {
                rate: 3.9,
                count: 120,
            },
        }
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn filter_matches_title_case_insensitively() {
        let products = vec![
            product(1, "Mens Cotton Jacket", "men's clothing"),
            product(2, "Solid Gold Petite Micropave", "jewelery"),
            product(3, "WD 2TB Elements Portable", "electronics"),
        ];

        let filtered = filter_products(&products, "COTTON", "");

        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn filter_requires_exact_category() {
        let products = vec![
            product(1, "Jacket", "men's clothing"),
            product(2, "Dress", "women's clothing"),
        ];

        assert_eq!(
            ids(&filter_products(&products, "", "men's clothing")),
            vec![1]
        );
        assert!(filter_products(&products, "", "men's").is_empty());
        assert!(filter_products(&products, "", "clothing").is_empty());
    }

    #[test]
    fn filter_combines_query_and_category() {
        let products = vec![
            product(1, "Slim Fit T-Shirt", "men's clothing"),
            product(2, "Slim Jeans", "women's clothing"),
            product(3, "Rain Jacket", "men's clothing"),
        ];

        let filtered = filter_products(&products, "slim", "men's clothing");

        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn empty_filters_keep_every_product_in_order() {
        let products = vec![
            product(3, "C", "electronics"),
            product(1, "A", "jewelery"),
            product(2, "B", "electronics"),
        ];

        let filtered = filter_products(&products, "", "");

        assert_eq!(ids(&filtered), vec![3, 1, 2]);
    }

    #[test]
    fn categories_are_deduped_in_first_occurrence_order() {
        let products = vec![
            product(1, "A", "electronics"),
            product(2, "B", "jewelery"),
            product(3, "C", "electronics"),
            product(4, "D", "men's clothing"),
            product(5, "E", "jewelery"),
        ];

        let categories = derive_categories(&products);

        assert_eq!(
            categories,
            vec!["electronics", "jewelery", "men's clothing"]
        );
    }

    #[test]
    fn star_flags_take_the_floor_of_the_rating() {
        assert_eq!(star_flags(4.7), vec![true, true, true, true, false]);
        assert_eq!(star_flags(3.0), vec![true, true, true, false, false]);
        assert_eq!(star_flags(0.4), vec![false; 5]);
    }

    #[test]
    fn star_flags_saturate_at_the_row_bounds() {
        assert_eq!(star_flags(-1.0), vec![false; 5]);
        assert_eq!(star_flags(9.9), vec![true; 5]);
        assert_eq!(star_flags(5.0), vec![true; 5]);
    }

    fn cards(count: i32) -> Vec<ProductCardView> {
        (0..count)
            .map(|id| ProductCardView::from(&product(id, "Product", "electronics")))
            .collect()
    }

    #[test]
    fn short_grids_have_no_banners() {
        let entries = listing_entries(cards(12));

        assert!(entries.iter().all(|entry| entry.banner_before.is_none()));
    }

    #[test]
    fn banners_open_before_every_twelfth_card() {
        let entries = listing_entries(cards(30));

        let positions: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.banner_before.is_some())
            .map(|(index, _)| index)
            .collect();

        assert_eq!(entries.len(), 30);
        assert_eq!(positions, vec![12, 24]);
    }

    #[test]
    fn banner_variants_rotate_and_wrap() {
        let entries = listing_entries(cards(80));

        let messages: Vec<&str> = entries
            .iter()
            .filter_map(|entry| entry.banner_before.as_ref())
            .map(|banner| banner.message)
            .collect();

        assert_eq!(messages.len(), 6);
        assert_eq!(messages.first().copied(), Some(BANNERS[0].message));
        assert_eq!(messages.get(4).copied(), Some(BANNERS[4].message));
        // The sixth banner wraps back to the first variant.
        assert_eq!(messages.get(5).copied(), Some(BANNERS[0].message));
    }
}
