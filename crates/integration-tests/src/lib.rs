//! Integration tests for Pricelens.
//!
//! The tests in `tests/` drive a running server over HTTP and are marked
//! `#[ignore]` so a plain `cargo test` stays self-contained.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p pricelens-cli -- migrate
//! cargo run -p pricelens-cli -- seed
//!
//! # Start the server
//! cargo run -p pricelens-web
//!
//! # Run the integration tests against it
//! cargo test -p pricelens-integration-tests -- --ignored
//! ```
//!
//! The base URL defaults to `http://localhost:3000` and can be overridden
//! with `PRICELENS_BASE_URL`.

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PRICELENS_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store for session handling.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
