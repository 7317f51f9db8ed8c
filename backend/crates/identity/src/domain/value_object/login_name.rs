//! Login Name Value Object
//!
//! The unique handle an account holder may sign in with. Stored and
//! matched case-sensitively, exactly as entered at registration.
//!
//! A login name must never contain `@`: at sign-in time an identifier
//! containing `@` is always routed to contact-address matching, so a
//! handle with `@` in it would be unreachable.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum login name length
const LOGIN_NAME_MAX_LENGTH: usize = 64;

/// Login name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginName(String);

impl LoginName {
    /// Create a new login name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(AppError::bad_request("Login name cannot be empty"));
        }

        if name.chars().count() > LOGIN_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Login name must be at most {} characters",
                LOGIN_NAME_MAX_LENGTH
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'))
        {
            return Err(AppError::bad_request(
                "Login name may only contain letters, digits, and . _ - +",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the login name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LoginName {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        LoginName::new(s)
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LoginName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
