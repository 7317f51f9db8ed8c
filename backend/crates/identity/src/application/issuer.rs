//! Session Issuer
//!
//! Mints an access and refresh token pair for a verified account and
//! records the authentication time. Lifetimes come from the config and
//! depend on the account role.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::IdentityConfig;
use crate::application::token::{TokenCodec, TOKEN_USE_ACCESS, TOKEN_USE_REFRESH};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::error::IdentityResult;

/// An issued session
#[derive(Debug, Clone)]
pub struct Session {
    /// Short-lived bearer token
    pub access_token: String,
    /// Long-lived renewal token
    pub refresh_token: String,
    /// When the access token expires
    pub access_expires_at: DateTime<Utc>,
    /// When the refresh token expires
    pub refresh_expires_at: DateTime<Utc>,
}

/// Session issuer
pub struct SessionIssuer<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
    codec: TokenCodec,
}

impl<S> SessionIssuer<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        let codec = TokenCodec::new(&config.signing_key);
        Self {
            store,
            config,
            codec,
        }
    }

    /// Issue a token pair for a verified account
    ///
    /// The `last_authenticated_at` update is best-effort: a store failure
    /// is logged and the session is still returned.
    pub async fn issue(&self, account: &Account) -> IdentityResult<Session> {
        let now = Utc::now();
        let lifetimes = self.config.lifetimes(account.role);

        let (access_token, access_expires_at) = self.codec.mint(
            &account.account_id,
            account.role,
            TOKEN_USE_ACCESS,
            lifetimes.access,
            now,
        )?;
        let (refresh_token, refresh_expires_at) = self.codec.mint(
            &account.account_id,
            account.role,
            TOKEN_USE_REFRESH,
            lifetimes.refresh,
            now,
        )?;

        if let Err(e) = self
            .store
            .update_last_authenticated(&account.account_id, now)
            .await
        {
            tracing::warn!(
                account_id = %account.account_id,
                error = %e,
                "Failed to record authentication time"
            );
        }

        Ok(Session {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}
