//! The session-backed cart store.
//!
//! [`CartSession`] is the thin adapter between the pure cart transitions in
//! `vitrine-core` and the visitor's session record: handlers load the cart,
//! apply a transition, and save the whole cart back. The session middleware
//! flushes the record when the response goes out, so a save here never
//! blocks the visitor, and a record that cannot be read is treated the same
//! as no record at all.

use tower_sessions::Session;

use vitrine_core::Cart;

use crate::models::session::keys;

/// Cart store bound to one request's session.
#[derive(Debug, Clone)]
pub struct CartSession {
    session: Session,
}

impl CartSession {
    /// Wrap the request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the visitor's cart from the session.
    ///
    /// A missing record and an unreadable record both come back as an empty
    /// cart; corruption is logged and discarded, never surfaced.
    pub async fn load(&self) -> Cart {
        match self.session.get::<Cart>(keys::CART).await {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Discarding unreadable cart from session: {e}");
                Cart::new()
            }
        }
    }

    /// Write the cart wholesale into the session.
    ///
    /// Failures are logged and swallowed so a flaky session store cannot
    /// fail a cart mutation that already happened in memory.
    pub async fn save(&self, cart: &Cart) {
        if let Err(e) = self.session.insert(keys::CART, cart).await {
            tracing::error!("Failed to save cart to session: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use vitrine_core::{CartItem, Price, ProductId};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn item(id: i32, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new("9.99".parse().unwrap()),
            image: String::new(),
            quantity,
        }
    }

    #[tokio::test]
    async fn load_returns_empty_cart_when_nothing_stored() {
        let store = CartSession::new(session());

        let cart = store.load().await;

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let session = session();
        let store = CartSession::new(session.clone());

        let mut cart = Cart::new();
        cart.add(item(1, 2));
        cart.add(item(2, 3));
        store.save(&cart).await;

        let reloaded = CartSession::new(session).load().await;

        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.total_items(), 5);
    }

    #[tokio::test]
    async fn corrupt_session_value_loads_as_empty_cart() {
        let session = session();
        session
            .insert(keys::CART, "definitely not a cart")
            .await
            .unwrap();

        let cart = CartSession::new(session).load().await;

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_cart() {
        let store = CartSession::new(session());

        let mut cart = Cart::new();
        cart.add(item(1, 2));
        store.save(&cart).await;

        cart.clear();
        cart.add(item(2, 1));
        store.save(&cart).await;

        let reloaded = store.load().await;

        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.total_items(), 1);
        assert!(reloaded.get(ProductId::new(2)).is_some());
    }
}
