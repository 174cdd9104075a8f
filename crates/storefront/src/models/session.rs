//! Session definitions for visitor data.

/// Keys used to reference data stored in the session.
pub mod keys {
    /// The serialized cart. The whole cart is rewritten under this single
    /// key after every mutation.
    pub const CART: &str = "cart";
}
