//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Clients historically sent the identifier under three different keys, so
/// all three are accepted. `identifier` wins over `username` wins over
/// `email` when more than one is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name or contact address
    #[serde(default)]
    pub identifier: Option<String>,
    /// Legacy key: login name
    #[serde(default)]
    pub username: Option<String>,
    /// Legacy key: contact address
    #[serde(default)]
    pub email: Option<String>,
    /// Secret
    #[serde(default, alias = "password")]
    pub secret: Option<String>,
}

impl LoginRequest {
    /// The effective identifier, honoring key precedence
    pub fn effective_identifier(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub account: AccountDto,
    pub tokens: TokenPairDto,
}

/// Account as exposed over the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub account_id: String,
    pub login_name: String,
    pub contact_address: String,
    pub role: String,
    pub is_active: bool,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id.to_string(),
            login_name: account.login_name.as_str().to_string(),
            contact_address: account.contact_address.as_str().to_string(),
            role: account.role.code().to_string(),
            is_active: account.is_active,
        }
    }
}

/// Issued token pair
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
    /// Access token expiry (unix seconds)
    pub access_expires_at: i64,
    /// Refresh token expiry (unix seconds)
    pub refresh_expires_at: i64,
}

// ============================================================================
// Profile
// ============================================================================

/// Identity behind a presented access token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub account_id: String,
    pub role: String,
}
