//! HTTP middleware stack for the server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, clear_session_identity, set_session_identity,
};
pub use session::create_session_layer;
