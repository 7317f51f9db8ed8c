//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, account_secret::StoredSecret,
    contact_address::ContactAddress, login_name::LoginName,
};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountStore for PgAccountStore {
    async fn find_by_login_name(&self, login_name: &str) -> IdentityResult<Option<Account>> {
        // login_name is matched case-sensitively; no LOWER() here
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                login_name,
                contact_address,
                secret_hash,
                account_role,
                is_active,
                last_authenticated_at,
                created_at,
                updated_at
            FROM accounts
            WHERE login_name = $1
            "#,
        )
        .bind(login_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_contact_address(&self, address: &str) -> IdentityResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                login_name,
                contact_address,
                secret_hash,
                account_role,
                is_active,
                last_authenticated_at,
                created_at,
                updated_at
            FROM accounts
            WHERE contact_address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn update_last_authenticated(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> IdentityResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET last_authenticated_at = $2, updated_at = $2
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    login_name: String,
    contact_address: String,
    secret_hash: String,
    account_role: i16,
    is_active: bool,
    last_authenticated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> IdentityResult<Account> {
        let role = AccountRole::from_id(self.account_role)
            .ok_or_else(|| IdentityError::Internal(format!("Invalid role id: {}", self.account_role)))?;

        let secret_hash = StoredSecret::from_phc_string(self.secret_hash)
            .map_err(|e| IdentityError::Internal(format!("Invalid secret hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            login_name: LoginName::from_db(self.login_name),
            contact_address: ContactAddress::from_db(self.contact_address),
            secret_hash,
            role,
            is_active: self.is_active,
            last_authenticated_at: self.last_authenticated_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
