//! Identity provider error types.

use thiserror::Error;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Invalid email format (local validation).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] makan_core::EmailError),

    /// Password too weak (local validation or provider rejection).
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account registered for the email.
    #[error("account not found")]
    UserNotFound,

    /// The email is already registered.
    #[error("email already registered")]
    EmailExists,

    /// Provider answered with an unrecognized error code.
    #[error("identity provider error: {0}")]
    Provider(String),

    /// Provider response did not match the expected shape.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// HTTP transport failure.
    #[error("identity transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
