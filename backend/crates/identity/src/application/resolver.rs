//! Identifier Resolver
//!
//! Maps a caller-supplied identifier to the contact address the verifier
//! keys on. Anything containing '@' is treated as a contact address and
//! passed through unchanged; everything else is a case-sensitive login
//! name lookup.

use std::sync::Arc;

use crate::domain::repository::AccountStore;
use crate::error::IdentityResult;

/// Resolution outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Contact address to verify against
    Resolved(String),
    /// Identifier matched no account
    NotFound,
}

/// Identifier resolver
pub struct IdentifierResolver<S>
where
    S: AccountStore,
{
    store: Arc<S>,
}

impl<S> IdentifierResolver<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve an identifier to a contact address
    ///
    /// The '@' branch never touches the store, so resolving an address is
    /// idempotent: feeding a resolved address back in returns it again.
    pub async fn resolve(&self, identifier: &str) -> IdentityResult<Resolution> {
        if identifier.contains('@') {
            return Ok(Resolution::Resolved(identifier.to_string()));
        }

        match self.store.find_by_login_name(identifier).await? {
            Some(account) => Ok(Resolution::Resolved(
                account.contact_address.as_str().to_string(),
            )),
            None => Ok(Resolution::NotFound),
        }
    }
}
