//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (pings the store)
//!
//! # Catalog (requires login)
//! GET  /soils                  - Soil type listing with search/crop filter
//! GET  /distributors           - Distributor listing with search/crop filter
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Admin (requires admin role)
//! GET  /admin                  - Dashboard
//! GET  /admin/soils            - Soil management (form + table)
//! POST /admin/soils            - Create soil record
//! POST /admin/soils/{id}       - Update soil record
//! POST /admin/soils/{id}/delete - Delete soil record
//! GET  /admin/distributors     - Distributor management (form + table)
//! POST /admin/distributors     - Create distributor record
//! POST /admin/distributors/{id} - Update distributor record
//! POST /admin/distributors/{id}/delete - Delete distributor record
//! ```

pub mod admin;
pub mod auth;
pub mod distributors;
pub mod home;
pub mod soils;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Navigation context shared by every page template.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub logged_in: bool,
    pub is_admin: bool,
    pub user_name: String,
}

impl Nav {
    /// Nav for a logged-in user.
    #[must_use]
    pub fn for_user(user: &CurrentUser) -> Self {
        Self {
            logged_in: true,
            is_admin: user.is_admin(),
            user_name: user.name.clone().unwrap_or_else(|| user.email.clone()),
        }
    }

    /// Nav for an optional user (guest when `None`).
    #[must_use]
    pub fn for_visitor(user: Option<&CurrentUser>) -> Self {
        user.map_or_else(Self::default, Self::for_user)
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/soils", get(admin::soils_page).post(admin::create_soil))
        .route("/soils/{id}", post(admin::update_soil))
        .route("/soils/{id}/delete", post(admin::delete_soil))
        .route(
            "/distributors",
            get(admin::distributors_page).post(admin::create_distributor),
        )
        .route("/distributors/{id}", post(admin::update_distributor))
        .route(
            "/distributors/{id}/delete",
            post(admin::delete_distributor),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/soils", get(soils::index))
        .route("/distributors", get(distributors::index))
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
        .fallback(not_found)
}

/// Fallback handler for paths no route matches.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_unknown_path_yields_404() {
        let response = not_found(Uri::from_static("/no-such-page"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_nav_prefers_profile_name() {
        let user = CurrentUser {
            id: agrilink_core::UserId::new("u-1"),
            email: "grower@example.com".to_owned(),
            name: Some("Grower".to_owned()),
            role: None,
        };
        assert_eq!(Nav::for_user(&user).user_name, "Grower");

        let bare = CurrentUser { name: None, ..user };
        assert_eq!(Nav::for_user(&bare).user_name, "grower@example.com");
    }
}
