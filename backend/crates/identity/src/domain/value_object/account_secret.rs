//! Account Secret Value Objects
//!
//! Domain wrappers over `platform::secret`. `RawSecret` is caller input
//! (zeroized on drop, never logged); `StoredSecret` is the Argon2id hash
//! kept on the account record. The hash never appears in any response
//! produced by this crate.

use kernel::error::app_error::{AppError, AppResult};
use platform::secret::{ClearSecret, SecretHash, SecretPolicyError};
use std::fmt;

/// Raw secret from caller input
///
/// Memory is automatically zeroized when dropped.
pub struct RawSecret(ClearSecret);

impl RawSecret {
    /// Create with policy validation (registration-side construction)
    pub fn new(raw: String) -> AppResult<Self> {
        let clear = ClearSecret::new(raw).map_err(|e| match e {
            SecretPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Secret must be at least {} characters (got {})",
                min, actual
            )),
            SecretPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Secret must be at most {} characters (got {})",
                max, actual
            )),
            SecretPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Secret cannot be empty")
            }
            SecretPolicyError::InvalidCharacter => {
                AppError::bad_request("Secret contains invalid characters")
            }
        })?;

        Ok(Self(clear))
    }

    /// Create without policy validation
    ///
    /// Used when verifying a caller-supplied secret against a stored
    /// hash: policy was enforced when the secret was set, and a wrong
    /// value simply fails verification.
    pub fn unchecked(raw: String) -> Self {
        Self(ClearSecret::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearSecret {
        &self.0
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSecret").field(&"[REDACTED]").finish()
    }
}

/// Stored secret hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSecret(SecretHash);

impl StoredSecret {
    /// Hash a raw secret for storage
    pub fn from_raw(raw: &RawSecret, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hash = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hash))
    }

    /// Create from a PHC string loaded from the database
    pub fn from_phc_string(s: impl Into<String>) -> AppResult<Self> {
        let hash = SecretHash::from_phc_string(s)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hash))
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification of a raw secret against this hash
    pub fn verify(&self, raw: &RawSecret, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for StoredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoredSecret").field(&"[HASH]").finish()
    }
}
