//! Secret Hashing and Verification
//!
//! NIST SP 800-63B compliant handling of account secrets:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for an additional application-wide secret layer

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum secret length (NIST: SHALL be at least 8)
pub const MIN_SECRET_LENGTH: usize = 8;

/// Maximum secret length (NIST: SHOULD permit at least 64)
pub const MAX_SECRET_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Secret policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretPolicyError {
    /// Secret is too short
    #[error("Secret must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Secret is too long
    #[error("Secret must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Secret contains only whitespace
    #[error("Secret cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Secret contains invalid characters (control characters)
    #[error("Secret contains invalid control characters")]
    InvalidCharacter,
}

/// Secret hashing/verification errors
#[derive(Debug, Error)]
pub enum SecretHashError {
    /// Hashing operation failed
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid secret hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Secret (Zeroized on drop)
// ============================================================================

/// Clear text secret with automatic memory zeroization
///
/// Ensures the secret is securely erased from memory when the value is
/// dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearSecret(String);

impl ClearSecret {
    /// Create a new clear text secret with validation
    ///
    /// Validates against NIST SP 800-63B requirements:
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, SecretPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return Err(SecretPolicyError::EmptyOrWhitespace);
        }

        // NIST: count Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_SECRET_LENGTH {
            return Err(SecretPolicyError::TooShort {
                min: MIN_SECRET_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_SECRET_LENGTH {
            return Err(SecretPolicyError::TooLong {
                max: MAX_SECRET_LENGTH,
                actual: char_count,
            });
        }

        // Control characters are rejected, except space, tab, newline
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(SecretPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Create without validation
    ///
    /// Only for verification of caller-supplied secrets against stored
    /// hashes, where policy was enforced at creation time, and for tests.
    /// A wrong secret simply fails verification.
    pub fn new_unchecked(raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        Self(normalized)
    }

    /// Get the secret as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the secret using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret for additional security
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `SecretHash`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<SecretHash, SecretHashError> {
        let secret_bytes = match pepper {
            Some(p) => {
                let mut combined = self.as_bytes().to_vec();
                combined.extend_from_slice(p);
                combined
            }
            None => self.as_bytes().to_vec(),
        };

        // Random 128-bit salt
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&secret_bytes, &salt)
            .map_err(|e| SecretHashError::HashingFailed(e.to_string()))?;

        Ok(SecretHash {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Secret Hash (Safe to store)
// ============================================================================

/// Hashed secret in PHC string format
///
/// Stores the Argon2id hash in PHC format, which includes the algorithm
/// identifier, version, parameters, salt, and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash {
    hash: String,
}

impl SecretHash {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, SecretHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| SecretHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a secret against this hash
    ///
    /// Uses constant-time comparison to prevent timing attacks.
    ///
    /// ## Arguments
    /// * `secret` - The clear text secret to verify
    /// * `pepper` - Optional pepper (must match the one used during hashing)
    pub fn verify(&self, secret: &ClearSecret, pepper: Option<&[u8]>) -> bool {
        let secret_bytes = match pepper {
            Some(p) => {
                let mut combined = secret.as_bytes().to_vec();
                combined.extend_from_slice(p);
                combined
            }
            None => secret.as_bytes().to_vec(),
        };

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let argon2 = Argon2::default();

        // Argon2 uses constant-time comparison internally
        argon2.verify_password(&secret_bytes, &parsed_hash).is_ok()
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretHash")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
