//! Errors that escape to the HTTP edge.
//!
//! Most failures never reach this type: the view handlers catch store and
//! auth errors and render them as page banners or redirect-with-code flows.
//! `AppError` covers what legitimately surfaces as a bare response: form
//! input that fails validation and requests for unknown paths.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Form input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// The message shown to the client, without the variant prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NotFound(path) => format!("Nothing was found at {path}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, self.user_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/soils/unknown".to_string());
        assert_eq!(err.to_string(), "Not found: /soils/unknown");

        let err = AppError::Validation("pH must be between 0 and 14.".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: pH must be between 0 and 14."
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_user_message_drops_variant_prefix() {
        let err = AppError::Validation("Soil type is required.".to_string());
        assert_eq!(err.user_message(), "Soil type is required.");
    }
}
