//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random key material, base64 key decoding)
//! - Secret hashing (Argon2id, NIST SP 800-63B compliant)
//!
//! Nothing in here knows about accounts, sessions, or HTTP; domain crates
//! build on these primitives.

pub mod crypto;
pub mod secret;
