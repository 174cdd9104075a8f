//! Integration tests for the storefront pages.
//!
//! These tests require:
//! - The storefront running (cargo run -p vitrine-storefront)
//! - The catalog API reachable from it
//!
//! Run with: cargo test -p vitrine-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

/// Base URL for the storefront (configurable via environment).
fn base_url() -> String {
    std::env::var("VITRINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with a cookie jar, so the session survives across requests.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health_endpoint() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_readiness_endpoint() {
    let resp = client()
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Catalog Page Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog API"]
async fn test_listing_page_renders_products() {
    let resp = client()
        .get(base_url())
        .send()
        .await
        .expect("Failed to get listing page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("product-grid"));
    assert!(body.contains("Showing "));
    assert!(body.contains("All Categories"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog API"]
async fn test_listing_page_filters_by_query() {
    let resp = client()
        .get(format!("{}/products?q=zzzz-no-such-product", base_url()))
        .send()
        .await
        .expect("Failed to get filtered listing");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("Showing 0 of "));
    assert!(body.contains("No products found"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog API"]
async fn test_detail_page_renders() {
    let resp = client()
        .get(format!("{}/products/1", base_url()))
        .send()
        .await
        .expect("Failed to get detail page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("product-detail"));
    assert!(body.contains("Add to Cart"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog API"]
async fn test_unknown_product_returns_not_found_page() {
    let resp = client()
        .get(format!("{}/products/999999", base_url()))
        .send()
        .await
        .expect("Failed to get detail page");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("Product not found"));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_non_numeric_product_id_is_rejected() {
    let resp = client()
        .get(format!("{}/products/not-a-number", base_url()))
        .send()
        .await
        .expect("Failed to get detail page");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
