//! Account Entity
//!
//! A registered member or administrator identity record. This subsystem
//! only reads accounts and updates `last_authenticated_at`; creation and
//! role changes belong to external registration/admin collaborators.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, account_secret::StoredSecret,
    contact_address::ContactAddress, login_name::LoginName,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Opaque unique identifier, assigned at creation, immutable
    pub account_id: AccountId,
    /// Unique handle, matched case-sensitively
    pub login_name: LoginName,
    /// Unique contact address; the canonical credential-verification key
    pub contact_address: ContactAddress,
    /// Argon2id hash of the account secret; never serialized
    pub secret_hash: StoredSecret,
    /// Member or administrator
    pub role: AccountRole,
    /// Inactive accounts never receive a session
    pub is_active: bool,
    /// Last successful session issuance
    pub last_authenticated_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account
    pub fn new(
        login_name: LoginName,
        contact_address: ContactAddress,
        secret_hash: StoredSecret,
        role: AccountRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            login_name,
            contact_address,
            secret_hash,
            role,
            is_active: true,
            last_authenticated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful session issuance
    pub fn record_authentication(&mut self) {
        let now = Utc::now();
        self.last_authenticated_at = Some(now);
        self.updated_at = now;
    }

    /// Whether a session may be issued for this account
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }

    /// Whether this account holds the administrator role
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}
