//! Identity Middleware
//!
//! Middleware for requiring a bearer access token on protected routes.
//! Token validation is offline; no store access happens here.

use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::IdentityConfig;
use crate::application::token::TokenCodec;
use crate::domain::value_object::account_role::AccountRole;
use crate::error::IdentityError;

/// Middleware state
#[derive(Clone)]
pub struct IdentityMiddlewareState {
    pub config: Arc<IdentityConfig>,
}

/// Identity stored in request extensions after token validation
#[derive(Debug, Clone, Copy)]
pub struct AccessIdentity {
    pub account_id: Uuid,
    pub role: AccountRole,
}

/// Middleware that requires a valid bearer access token
pub async fn require_access_token(
    state: IdentityMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let identity = authenticate_request(&state, &req)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Middleware that requires a valid bearer token with the administrator role
pub async fn require_administrator(
    state: IdentityMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let identity = authenticate_request(&state, &req)?;
    if !identity.role.is_administrator() {
        return Err(IdentityError::RoleForbidden.into_response());
    }
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn authenticate_request(
    state: &IdentityMiddlewareState,
    req: &Request<Body>,
) -> Result<AccessIdentity, Response> {
    let token = extract_bearer_token(req).ok_or_else(token_invalid)?;

    let codec = TokenCodec::new(&state.config.signing_key);
    let claims = codec.decode_access(token).map_err(|e| e.into_response())?;

    let account_id = claims.account_id().map_err(|e| e.into_response())?;
    let role = claims.account_role().map_err(|e| e.into_response())?;

    Ok(AccessIdentity {
        account_id: account_id.into_uuid(),
        role,
    })
}

fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn token_invalid() -> Response {
    IdentityError::TokenInvalid.into_response()
}
