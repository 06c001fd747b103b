//! Authentication route handlers.
//!
//! Handles login, registration, and logout. Only the session identity
//! (id + email) is written to the session; the profile is re-resolved on
//! every request by the auth extractors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{OptionalAuth, clear_session_identity, set_session_identity};
use crate::models::SessionIdentity;
use crate::routes::Nav;
use crate::services::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Someone already logged in is sent to the catalog (admins to the
/// dashboard) instead.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if let Some(user) = user {
        let target = if user.is_admin() { "/admin" } else { "/soils" };
        return Redirect::to(target).into_response();
    }

    LoginTemplate {
        nav: Nav::default(),
        error: query.error.map(login_error_message),
        success: query.success.map(|_| "Account created, log in below.".to_owned()),
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth().log_in(&form.email, &form.password).await {
        Ok(user) => {
            let identity = SessionIdentity {
                id: user.id.clone(),
                email: user.email.clone(),
            };
            if let Err(e) = set_session_identity(&session, &identity).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?error=session").into_response();
            }

            // Admins land on the dashboard, everyone else on the catalog.
            if user.is_admin() {
                Redirect::to("/admin").into_response()
            } else {
                Redirect::to("/soils").into_response()
            }
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/soils").into_response();
    }

    RegisterTemplate {
        nav: Nav::default(),
        error: query.error.map(register_error_message),
    }
    .into_response()
}

/// Handle registration form submission.
///
/// New accounts always get the `user` role; promotion happens out-of-band
/// via the CLI.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    match state
        .auth()
        .sign_up(&form.email, &form.password, form.name.trim())
        .await
    {
        Ok(user) => {
            let identity = SessionIdentity {
                id: user.id.clone(),
                email: user.email.clone(),
            };
            if let Err(e) = set_session_identity(&session, &identity).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/auth/login?success=registered").into_response();
            }
            Redirect::to("/soils").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let code = match e {
                AuthError::UserAlreadyExists => "email_taken",
                AuthError::WeakPassword(_) => "password_too_short",
                AuthError::InvalidEmail(_) => "invalid_email",
                _ => "failed",
            };
            Redirect::to(&format!("/auth/register?error={code}")).into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout form submission.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Response {
    if let Ok(Some(identity)) = session
        .get::<SessionIdentity>(crate::models::session_keys::CURRENT_IDENTITY)
        .await
    {
        state.auth().log_out(&identity);
    }

    if let Err(e) = clear_session_identity(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    Redirect::to("/").into_response()
}

// =============================================================================
// Error Messages
// =============================================================================

fn login_error_message(code: String) -> String {
    match code.as_str() {
        "credentials" => "Invalid email or password.".to_owned(),
        "session" => "Could not start a session, please try again.".to_owned(),
        _ => "Login failed, please try again.".to_owned(),
    }
}

fn register_error_message(code: String) -> String {
    match code.as_str() {
        "password_mismatch" => "Passwords do not match.".to_owned(),
        "password_too_short" => "Password must be at least 8 characters.".to_owned(),
        "email_taken" => "An account with this email already exists.".to_owned(),
        "invalid_email" => "That email address does not look valid.".to_owned(),
        _ => "Registration failed, please try again.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_messages() {
        assert_eq!(
            login_error_message("credentials".to_owned()),
            "Invalid email or password."
        );
        assert_eq!(
            register_error_message("email_taken".to_owned()),
            "An account with this email already exists."
        );
        // Unknown codes fall back to a generic message.
        assert!(register_error_message("bogus".to_owned()).starts_with("Registration failed"));
    }
}
