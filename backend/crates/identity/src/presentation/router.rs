//! Identity Router

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::AccountStore;
use crate::infra::postgres::PgAccountStore;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware::{self, IdentityMiddlewareState};

/// Create the Identity router with the PostgreSQL store
pub fn identity_router(store: PgAccountStore, config: IdentityConfig) -> Router {
    identity_router_generic(store, config)
}

/// Create a generic Identity router for any store implementation
pub fn identity_router_generic<S>(store: S, config: IdentityConfig) -> Router
where
    S: AccountStore + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };
    let middleware_state = IdentityMiddlewareState {
        config: state.config.clone(),
    };

    let protected = Router::new()
        .route("/profile", get(handlers::profile))
        .layer(axum_middleware::from_fn(move |req, next| {
            let state = middleware_state.clone();
            middleware::require_access_token(state, req, next)
        }));

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .merge(protected)
        .with_state(state)
}
