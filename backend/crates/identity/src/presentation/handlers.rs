//! HTTP Handlers

use axum::extract::State;
use axum::Extension;
use axum::Json;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{AuthenticateInput, AuthenticateUseCase};
use crate::domain::repository::AccountStore;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    AccountDto, LoginRequest, LoginResponse, ProfileResponse, TokenPairDto,
};
use crate::presentation::middleware::AccessIdentity;

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<S>
where
    S: AccountStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<IdentityConfig>,
}

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<IdentityAppState<S>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Json<LoginResponse>>
where
    S: AccountStore + Clone + Send + Sync + 'static,
{
    // Absent keys and empty values report the same way
    let identifier = req
        .effective_identifier()
        .ok_or(IdentityError::MissingFields)?
        .to_string();
    let secret = req.secret.clone().ok_or(IdentityError::MissingFields)?;

    let use_case = AuthenticateUseCase::new(state.store.clone(), state.config.clone());

    let output = use_case
        .execute(AuthenticateInput { identifier, secret })
        .await?;

    Ok(Json(LoginResponse {
        account: AccountDto::from(&output.account),
        tokens: TokenPairDto {
            access: output.session.access_token,
            refresh: output.session.refresh_token,
            access_expires_at: output.session.access_expires_at.timestamp(),
            refresh_expires_at: output.session.refresh_expires_at.timestamp(),
        },
    }))
}

/// GET /api/auth/profile
///
/// Reads the identity the middleware placed in request extensions; the
/// token has already been validated by the time this runs.
pub async fn profile(
    Extension(identity): Extension<AccessIdentity>,
) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        account_id: identity.account_id.to_string(),
        role: identity.role.code().to_string(),
    })
}
