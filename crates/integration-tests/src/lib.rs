//! Integration tests for AgriLink.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! docker compose up -d postgres
//! cargo run -p agrilink-cli -- migrate
//!
//! # Start the server
//! cargo run -p agrilink-server
//!
//! # Run integration tests
//! cargo test -p agrilink-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login, logout, and route guards
//! - `catalog` - Browse views with search and crop filters
//! - `admin_records` - Record management (requires an admin account)
//!
//! The tests talk to a running server over HTTP; they are all `#[ignore]`d
//! so `cargo test` stays hermetic without a server.
