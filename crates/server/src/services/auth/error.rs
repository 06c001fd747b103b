//! Authentication error types.

use agrilink_core::EmailError;

use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password doesn't meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// An identity with this email already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Email/password combination is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
