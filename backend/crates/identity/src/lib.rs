//! Identity (Session Issuance) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, store trait
//! - `application/` - Resolver, verifier, issuer, and the authenticate use case
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Sign-in with either login name or contact address
//! - Stateless HS256 token pairs (access + refresh), offline-verifiable
//! - Role-dependent token lifetimes (member vs administrator)
//! - Bearer-token middleware for downstream role-gated routes
//!
//! ## Security Model
//! - Secrets hashed with Argon2id (NIST SP 800-63B compliant)
//! - "No such account" and "wrong secret" are indistinguishable to callers
//! - Inactive accounts never receive a session, even with valid credentials

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::postgres::PgAccountStore;
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountStore as AccountDb;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
