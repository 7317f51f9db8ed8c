//! Contact Address Value Object
//!
//! The canonical identity key of an account: credential verification is
//! keyed on the contact address, not the login name. Normalized to
//! lowercase at construction so stored values match exactly.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum address length (per RFC 5321)
const ADDRESS_MAX_LENGTH: usize = 254;

/// Contact address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactAddress(String);

impl ContactAddress {
    /// Create a new contact address with validation
    pub fn new(address: impl Into<String>) -> AppResult<Self> {
        let address = address.into().trim().to_lowercase();

        if address.is_empty() {
            return Err(AppError::bad_request("Contact address cannot be empty"));
        }

        if address.len() > ADDRESS_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Contact address must be at most {} characters",
                ADDRESS_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&address) {
            return Err(AppError::bad_request("Invalid contact address format"));
        }

        Ok(Self(address))
    }

    /// Basic format validation: one `@`, non-empty local part, dotted domain
    fn is_valid_format(address: &str) -> bool {
        let Some((local, domain)) = address.split_once('@') else {
            return false;
        };

        // A second '@' means the domain split was ambiguous
        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.len() > 64 {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with('.')
            || domain.ends_with('.')
            || domain.starts_with('-')
            || domain.ends_with('-')
        {
            return false;
        }

        true
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain part of the address
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for ContactAddress {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        ContactAddress::new(s)
    }
}

impl fmt::Display for ContactAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContactAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_valid() {
        assert!(ContactAddress::new("alice@example.org").is_ok());
        assert!(ContactAddress::new("Alice@Example.ORG").is_ok()); // lowercased
        assert!(ContactAddress::new("a.b+tag@example.co.ke").is_ok());
    }

    #[test]
    fn test_address_invalid() {
        assert!(ContactAddress::new("").is_err());
        assert!(ContactAddress::new("aliceexample.org").is_err());
        assert!(ContactAddress::new("alice@").is_err());
        assert!(ContactAddress::new("@example.org").is_err());
        assert!(ContactAddress::new("alice@@example.org").is_err());
        assert!(ContactAddress::new("alice@example").is_err());
        assert!(ContactAddress::new("alice@-example.org").is_err());
    }

    #[test]
    fn test_address_case_normalization() {
        let address = ContactAddress::new("Alice@Example.ORG").unwrap();
        assert_eq!(address.as_str(), "alice@example.org");
    }

    #[test]
    fn test_address_domain() {
        let address = ContactAddress::new("alice@example.org").unwrap();
        assert_eq!(address.domain(), "example.org");
    }
}
