//! Application Layer
//!
//! Use cases and application services. The `authenticate` use case is the
//! orchestrator; resolver, verifier and issuer are its stages and are
//! public so tests and callers can drive them directly.

pub mod authenticate;
pub mod config;
pub mod issuer;
pub mod resolver;
pub mod token;
pub mod verifier;

pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::{IdentityConfig, TokenLifetimes};
pub use issuer::{Session, SessionIssuer};
pub use resolver::{IdentifierResolver, Resolution};
pub use token::{Claims, TokenCodec, TOKEN_USE_ACCESS, TOKEN_USE_REFRESH};
pub use verifier::{CredentialVerifier, Rejection, Verdict};
