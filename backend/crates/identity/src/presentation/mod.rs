//! Presentation Layer (HTTP)

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::{AccessIdentity, IdentityMiddlewareState};
pub use router::{identity_router, identity_router_generic};
