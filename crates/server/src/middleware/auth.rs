//! Authentication extractors.
//!
//! The session cookie stores only the identity (id + email). These
//! extractors re-resolve the profile document on every request, so role
//! changes take effect without re-login.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, SessionIdentity, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in user.
///
/// If there is no session identity, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a logged-in admin.
///
/// No session redirects to the login page; a logged-in non-admin is sent
/// back to the home page instead.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when an auth requirement is not met.
pub enum AuthRejection {
    /// Redirect to login page (no session).
    RedirectToLogin,
    /// Redirect to home page (logged in, wrong role).
    RedirectHome,
    /// Unauthorized response (session layer missing).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::RedirectHome => Redirect::to("/").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

async fn session_identity(parts: &mut Parts) -> Result<SessionIdentity, AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get(session_keys::CURRENT_IDENTITY)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::RedirectToLogin)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = session_identity(parts).await?;
        let user = state.auth().resolve_session(&identity).await;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = session_identity(parts).await?;
        let user = state.auth().resolve_session(&identity).await;
        if !user.is_admin() {
            return Err(AuthRejection::RedirectHome);
        }
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<SessionIdentity>(session_keys::CURRENT_IDENTITY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        let user = match identity {
            Some(identity) => Some(state.auth().resolve_session(&identity).await),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the session identity (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_session_identity(
    session: &Session,
    identity: &SessionIdentity,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_IDENTITY, identity)
        .await
}

/// Helper to clear the session identity (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session_identity(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<SessionIdentity>(session_keys::CURRENT_IDENTITY)
        .await?;
    Ok(())
}
