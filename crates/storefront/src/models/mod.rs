//! Domain models for the storefront.
//!
//! The only state the storefront owns is the visitor's cart, mirrored into
//! the session record; everything else is read from the catalog API.

pub mod cart;
pub mod session;

pub use cart::CartSession;
