//! Credential Verifier
//!
//! Checks a secret against the account stored for a contact address. An
//! unknown address and a wrong secret produce the same rejection so the
//! caller cannot probe which addresses exist. The active check runs only
//! after the secret has verified.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::account_secret::RawSecret;
use crate::error::IdentityResult;

/// Verification outcome
#[derive(Debug)]
pub enum Verdict {
    /// Credentials check out; account may be issued a session
    Verified(Account),
    /// Credentials rejected
    Rejected(Rejection),
}

/// Why credentials were rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Unknown address or wrong secret (deliberately indistinguishable)
    InvalidCredentials,
    /// Secret was correct but the account is deactivated
    AccountDisabled,
}

/// Credential verifier
pub struct CredentialVerifier<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> CredentialVerifier<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self { store, config }
    }

    /// Verify a secret for the account behind a contact address
    pub async fn verify(&self, address: &str, secret: &str) -> IdentityResult<Verdict> {
        let account = match self.store.find_by_contact_address(address).await? {
            Some(account) => account,
            None => return Ok(Verdict::Rejected(Rejection::InvalidCredentials)),
        };

        // No policy validation here: a stored secret predating a policy
        // change must still verify.
        let raw = RawSecret::unchecked(secret.to_string());
        if !account.secret_hash.verify(&raw, self.config.pepper()) {
            return Ok(Verdict::Rejected(Rejection::InvalidCredentials));
        }

        if !account.can_authenticate() {
            return Ok(Verdict::Rejected(Rejection::AccountDisabled));
        }

        Ok(Verdict::Verified(account))
    }
}
