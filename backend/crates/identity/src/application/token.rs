//! Session Tokens
//!
//! Stateless HS256 tokens carrying the account id, role and token use.
//! Access and refresh tokens share one claim shape and differ only in
//! the `typ` claim and their lifetime.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::account_id::AccountId;
use crate::domain::value_object::account_role::AccountRole;
use crate::error::{IdentityError, IdentityResult};

/// `typ` claim value for access tokens
pub const TOKEN_USE_ACCESS: &str = "access";
/// `typ` claim value for refresh tokens
pub const TOKEN_USE_REFRESH: &str = "refresh";

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Role code ("member" or "administrator")
    pub role: String,
    /// Token use ("access" or "refresh")
    pub typ: String,
    /// Unique token id
    pub jti: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an account id
    pub fn account_id(&self) -> IdentityResult<AccountId> {
        let uuid = Uuid::parse_str(&self.sub).map_err(|_| IdentityError::TokenInvalid)?;
        Ok(AccountId::from_uuid(uuid))
    }

    /// Parse the role claim
    pub fn account_role(&self) -> IdentityResult<AccountRole> {
        AccountRole::from_code(&self.role).ok_or(IdentityError::TokenInvalid)
    }
}

/// Encoder and decoder for session tokens
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(signing_key: &[u8; 32]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(signing_key),
            decoding: DecodingKey::from_secret(signing_key),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Mint a token for the account with the given use and lifetime
    ///
    /// Each call allocates a fresh `jti`, so two tokens minted in the same
    /// second are still distinct strings.
    pub fn mint(
        &self,
        account_id: &AccountId,
        role: AccountRole,
        token_use: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> IdentityResult<(String, DateTime<Utc>)> {
        let expires_at = now + chrono::Duration::from_std(ttl)
            .map_err(|e| IdentityError::Internal(format!("Token TTL out of range: {e}")))?;

        let claims = Claims {
            sub: account_id.to_string(),
            role: role.code().to_string(),
            typ: token_use.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| IdentityError::Internal(format!("Token encoding failed: {e}")))?;

        Ok((token, expires_at))
    }

    /// Decode and validate a token (signature and expiry)
    pub fn decode(&self, token: &str) -> IdentityResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| IdentityError::TokenInvalid)
    }

    /// Decode a token and require it to be an access token
    ///
    /// Refresh tokens are rejected here so a long-lived refresh token can
    /// never be presented as a bearer credential.
    pub fn decode_access(&self, token: &str) -> IdentityResult<Claims> {
        let claims = self.decode(token)?;
        if claims.typ != TOKEN_USE_ACCESS {
            return Err(IdentityError::TokenInvalid);
        }
        Ok(claims)
    }
}
