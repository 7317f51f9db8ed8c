//! Identity Error Types
//!
//! The error taxonomy this subsystem exposes. Expected failure paths
//! (wrong secret, disabled account) are typed variants; only backing-store
//! and crypto failures use the opaque internal variants. Each variant maps
//! to one stable HTTP status and one stable machine-readable code,
//! independent of which internal step produced it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Identifier or secret absent from the request
    #[error("Identifier and secret are required")]
    MissingFields,

    /// Unknown identifier OR wrong secret. Deliberately a single variant
    /// so the two cases cannot leak account existence.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials matched but the account is inactive
    #[error("Account is disabled")]
    AccountDisabled,

    /// Bearer token missing, malformed, expired, or of the wrong use
    #[error("Invalid or missing access token")]
    TokenInvalid,

    /// Valid token, insufficient role
    #[error("Administrator role required")]
    RoleForbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (hashing, token minting, row decoding)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::MissingFields => StatusCode::BAD_REQUEST,
            IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            IdentityError::AccountDisabled => StatusCode::FORBIDDEN,
            IdentityError::TokenInvalid => StatusCode::UNAUTHORIZED,
            IdentityError::RoleForbidden => StatusCode::FORBIDDEN,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code, surfaced in the response body
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::MissingFields => "missing_fields",
            IdentityError::InvalidCredentials => "invalid_credentials",
            IdentityError::AccountDisabled => "account_disabled",
            IdentityError::TokenInvalid => "invalid_token",
            IdentityError::RoleForbidden => "forbidden",
            IdentityError::Database(_) | IdentityError::Internal(_) => "internal_error",
        }
    }

    /// ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::MissingFields => ErrorKind::BadRequest,
            IdentityError::InvalidCredentials | IdentityError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            IdentityError::AccountDisabled | IdentityError::RoleForbidden => ErrorKind::Forbidden,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// User-facing message for the response body
    ///
    /// Server-side detail (database messages, hash parse errors) never
    /// leaves the process; internal variants collapse to a generic line.
    pub fn public_message(&self) -> &'static str {
        match self {
            IdentityError::MissingFields => "Identifier and secret are required",
            IdentityError::InvalidCredentials => "Invalid credentials",
            IdentityError::AccountDisabled => "Account is disabled",
            IdentityError::TokenInvalid => "Invalid or missing access token",
            IdentityError::RoleForbidden => "Administrator role required",
            IdentityError::Database(_) | IdentityError::Internal(_) => "Internal server error",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            IdentityError::AccountDisabled => {
                tracing::warn!("Sign-in attempt on disabled account");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();

        let body = serde_json::json!({
            "error": self.code(),
            "message": self.public_message(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}
