//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every handler follows the same shape: load the cart from the session,
//! apply a pure transition, save the whole cart back. Mutations answer with
//! an `HX-Trigger: cart-updated` header; the header badge and the item
//! regions re-fetch themselves on that event.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use vitrine_core::{Cart, CartItem, Price, ProductId};

use crate::filters;
use crate::models::CartSession;
use crate::state::AppState;

/// Smallest quantity the add form accepts.
const MIN_QUANTITY: i64 = 1;

/// Largest quantity the add form accepts.
///
/// The clamp is a surface concern: the cart itself takes quantities as
/// given, so every entry point that accepts a count applies this range
/// before touching the cart.
const MAX_QUANTITY: i64 = 99;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub quantity: u32,
    /// Unit price from the add-time snapshot.
    pub price: String,
    /// Snapshot price times quantity.
    pub line_price: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a price for display in Singapore dollars.
fn format_price(price: &Price) -> String {
    format!("S${price:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_price(&cart.total_price()),
            item_count: cart.total_items(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            quantity: item.quantity,
            price: format_price(&item.price),
            line_price: format_price(&item.price.times(item.quantity)),
            image: item.image.clone(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i32,
    pub quantity: Option<i64>,
}

/// Update cart form data. A quantity of zero or below removes the item.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: i32,
}

/// Clamp a requested add quantity to the accepted range.
///
/// A missing quantity means "add one", matching the listing cards, which
/// post no quantity at all.
fn clamp_quantity(requested: Option<i64>) -> u32 {
    let clamped = requested
        .unwrap_or(MIN_QUANTITY)
        .clamp(MIN_QUANTITY, MAX_QUANTITY);
    u32::try_from(clamped).unwrap_or(1)
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = CartSession::new(session).load().await;

    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Get cart item list fragment (HTMX).
#[instrument(skip(session))]
pub async fn items(session: Session) -> impl IntoResponse {
    let cart = CartSession::new(session).load().await;

    CartItemsTemplate {
        cart: CartView::from(&cart),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = CartSession::new(session).load().await;

    CartCountTemplate {
        count: cart.total_items(),
    }
}

/// Add item to cart (HTMX).
///
/// The catalog is consulted for the product so the cart item snapshots
/// title, price, and image at add-time. Adding a product already in the
/// cart merges quantities instead of duplicating the entry.
#[instrument(skip(state, session), fields(id = form.id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let quantity = clamp_quantity(form.quantity);

    let product = match state.catalog().get_product(ProductId::new(form.id)).await {
        Ok(product) => product,
        Err(e) => {
            tracing::error!("Failed to add product {} to cart: {e}", form.id);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let store = CartSession::new(session);
    let mut cart = store.load().await;
    cart.add(product.to_cart_item(quantity));
    store.save(&cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX).
///
/// The quantity is absolute, not incremental; zero or below removes the
/// item, and an id not in the cart is silently ignored.
#[instrument(skip(session), fields(id = form.id, quantity = form.quantity))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> impl IntoResponse {
    let store = CartSession::new(session);
    let mut cart = store.load().await;
    cart.set_quantity(ProductId::new(form.id), form.quantity);
    store.save(&cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}

/// Remove item from cart (HTMX).
#[instrument(skip(session), fields(id = form.id))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> impl IntoResponse {
    let store = CartSession::new(session);
    let mut cart = store.load().await;
    cart.remove(ProductId::new(form.id));
    store.save(&cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> impl IntoResponse {
    let store = CartSession::new(session);
    let mut cart = store.load().await;
    cart.clear();
    store.save(&cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}
