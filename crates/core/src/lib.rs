//! Vitrine Core - Shared domain types.
//!
//! This crate provides the types shared across Vitrine components:
//! - `storefront` - Public-facing catalog and cart site
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and their pure state transitions - no
//! I/O, no database access, no HTTP clients. In particular the whole cart
//! state machine lives here so it can be tested without a session store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, plus the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
