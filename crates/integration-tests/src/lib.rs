//! End-to-end tests for Vitrine.
//!
//! The tests in `tests/` drive a running storefront over HTTP and are
//! `#[ignore]`d by default since they need a live instance and a reachable
//! catalog API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront
//! cargo run -p vitrine-storefront
//!
//! # Run the end-to-end suite against it
//! cargo test -p vitrine-integration-tests -- --ignored
//! ```
//!
//! The target instance defaults to `http://localhost:3000` and can be
//! overridden with `VITRINE_BASE_URL`.
