//! Application Configuration
//!
//! Configuration for the Identity application layer.

use std::time::Duration;

use crate::domain::value_object::account_role::AccountRole;

/// Token lifetimes for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Access token TTL
    pub access: Duration,
    /// Refresh token TTL
    pub refresh: Duration,
}

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Signing key for session tokens (32 bytes)
    pub signing_key: [u8; 32],
    /// Member access token TTL (10 minutes)
    pub member_access_ttl: Duration,
    /// Member refresh token TTL (1 day)
    pub member_refresh_ttl: Duration,
    /// Administrator access token TTL (30 days)
    pub admin_access_ttl: Duration,
    /// Administrator refresh token TTL (30 days)
    pub admin_refresh_ttl: Duration,
    /// Secret pepper (optional, application-wide secret)
    pub secret_pepper: Option<Vec<u8>>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            signing_key: [0u8; 32],
            member_access_ttl: Duration::from_secs(10 * 60), // 10 minutes
            member_refresh_ttl: Duration::from_secs(24 * 3600), // 1 day
            admin_access_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            admin_refresh_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            secret_pepper: None,
        }
    }
}

impl IdentityConfig {
    /// Create config with a random signing key (for development)
    pub fn with_random_key() -> Self {
        Self {
            signing_key: platform::crypto::random_signing_key(),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_key()
    }

    /// Token lifetimes for the given role
    ///
    /// Administrators get long-lived tokens so back-office tooling does
    /// not have to re-authenticate; members stay on a short access TTL.
    pub fn lifetimes(&self, role: AccountRole) -> TokenLifetimes {
        match role {
            AccountRole::Member => TokenLifetimes {
                access: self.member_access_ttl,
                refresh: self.member_refresh_ttl,
            },
            AccountRole::Administrator => TokenLifetimes {
                access: self.admin_access_ttl,
                refresh: self.admin_refresh_ttl,
            },
        }
    }

    /// Get secret pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.secret_pepper.as_deref()
    }
}
