//! Store Trait
//!
//! The credential-store boundary this core consumes. Implementations live
//! in the infrastructure layer; the in-memory test double lives with the
//! crate tests. Lookups take plain strings because both the resolver and
//! the verifier operate on caller-supplied identifiers of unknown shape.

use chrono::{DateTime, Utc};

use crate::domain::entity::account::Account;
use crate::domain::value_object::account_id::AccountId;
use crate::error::IdentityResult;

/// Account store trait
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Find account by exact, case-sensitive login name
    async fn find_by_login_name(&self, login_name: &str) -> IdentityResult<Option<Account>>;

    /// Find account by exact contact address
    async fn find_by_contact_address(&self, address: &str) -> IdentityResult<Option<Account>>;

    /// Record the time of a successful issuance
    ///
    /// Best-effort from the caller's point of view: the session issuer
    /// logs failures and still returns the session.
    async fn update_last_authenticated(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> IdentityResult<()>;
}
