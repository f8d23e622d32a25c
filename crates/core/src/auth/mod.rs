//! Login rules and password hashing.
//!
//! The credential check is pure: the caller looks the user up by normalized
//! email and hands the record (or its absence) to [`verify_login`].

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use docengine_shared::types::UserId;
use thiserror::Error;

/// Errors that can occur while authenticating a user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required login field was blank.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// No user exists for the email.
    #[error("No user found for email {0}.")]
    UserNotFound(String),

    /// The account is disabled.
    #[error("User {0} is inactive.")]
    InactiveUser(String),

    /// The password does not match.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Hashing failed unexpectedly.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl AuthError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::InvalidCredentials => 401,
            Self::InactiveUser(_) => 403,
            Self::UserNotFound(_) => 404,
            Self::Password(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InactiveUser(_) => "INACTIVE_USER",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Password(_) => "INTERNAL_ERROR",
        }
    }
}

/// Stored credentials of a user, as needed for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID, becomes the token subject.
    pub id: UserId,
    /// Stored email.
    pub email: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
    /// Disabled accounts cannot log in.
    pub is_active: bool,
}

/// Trims and lowercases an email for lookup.
///
/// # Errors
///
/// Returns `AuthError::InvalidInput` if nothing is left.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(AuthError::InvalidInput("Email must be provided."));
    }
    Ok(normalized)
}

/// Rejects an empty login password before any lookup happens.
///
/// Whitespace counts as a password; only the empty string is refused.
///
/// # Errors
///
/// Returns `AuthError::InvalidInput` if `password` is empty.
pub fn require_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::InvalidInput("Password must be provided."));
    }
    Ok(())
}

/// Checks a login attempt against the looked-up user.
///
/// The account state is checked before the password.
pub fn verify_login(
    email: &str,
    found: Option<UserCredentials>,
    password: &str,
) -> Result<UserCredentials, AuthError> {
    let user = found.ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

    if !user.is_active {
        return Err(AuthError::InactiveUser(user.email));
    }

    let matches = match verify_password(password, &user.password_hash) {
        Ok(matches) => matches,
        Err(PasswordError::InvalidHash) => false,
        Err(e) => return Err(e.into()),
    };
    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
