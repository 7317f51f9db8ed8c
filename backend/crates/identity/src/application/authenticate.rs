//! Authenticate Use Case
//!
//! Orchestrates the login flow: resolve the identifier, verify the
//! secret, issue a session.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::issuer::{Session, SessionIssuer};
use crate::application::resolver::{IdentifierResolver, Resolution};
use crate::application::verifier::{CredentialVerifier, Rejection, Verdict};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::error::{IdentityError, IdentityResult};

/// Authenticate input
pub struct AuthenticateInput {
    /// Login name or contact address
    pub identifier: String,
    /// Secret
    pub secret: String,
}

/// Authenticate output
#[derive(Debug)]
pub struct AuthenticateOutput {
    /// The authenticated account
    pub account: Account,
    /// The issued session
    pub session: Session,
}

/// Authenticate use case
pub struct AuthenticateUseCase<S>
where
    S: AccountStore,
{
    resolver: IdentifierResolver<S>,
    verifier: CredentialVerifier<S>,
    issuer: SessionIssuer<S>,
}

impl<S> AuthenticateUseCase<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            resolver: IdentifierResolver::new(store.clone()),
            verifier: CredentialVerifier::new(store.clone(), config.clone()),
            issuer: SessionIssuer::new(store, config),
        }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> IdentityResult<AuthenticateOutput> {
        if input.identifier.is_empty() || input.secret.is_empty() {
            return Err(IdentityError::MissingFields);
        }

        // A failed login-name lookup reports invalid credentials, not
        // "not found", for the same reason the verifier does.
        let address = match self.resolver.resolve(&input.identifier).await? {
            Resolution::Resolved(address) => address,
            Resolution::NotFound => return Err(IdentityError::InvalidCredentials),
        };

        let account = match self.verifier.verify(&address, &input.secret).await? {
            Verdict::Verified(account) => account,
            Verdict::Rejected(Rejection::InvalidCredentials) => {
                return Err(IdentityError::InvalidCredentials);
            }
            Verdict::Rejected(Rejection::AccountDisabled) => {
                return Err(IdentityError::AccountDisabled);
            }
        };

        let session = self.issuer.issue(&account).await?;

        // The store write happened inside the issuer; reflect it on the
        // projection handed back to the caller as well.
        let mut account = account;
        account.record_authentication();

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account authenticated"
        );

        Ok(AuthenticateOutput { account, session })
    }
}
