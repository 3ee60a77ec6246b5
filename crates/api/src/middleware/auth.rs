//! Caller identity extractors.
//!
//! Both extractors read `Authorization: Bearer <token>`. [`AuthUser`] insists
//! on it; [`Actor`] falls back to an anonymous context when the header is
//! absent. A header that is present but malformed or invalid is a 401 either
//! way.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use folio_core::actor::ActorContext;
use folio_core::error::CoreError;
use folio_core::types::DbId;

use crate::auth::jwt::{verify_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// The bearer token, `None` when no `Authorization` header was sent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid ASCII"))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

fn authenticate(token: &str, jwt: &JwtConfig) -> Result<AuthUser, AppError> {
    let claims = verify_token(token, jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        unauthorized("Invalid or expired token")
    })?;
    Ok(AuthUser {
        user_id: claims.sub,
        actor: claims.actor(),
    })
}

/// An authenticated caller.
///
/// ```ignore
/// async fn handler(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<()>> {
///     workflow::edit_entry(&state.pool, &auth.actor, "Rust", &input).await?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
    pub actor: ActorContext,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| unauthorized("Missing Authorization header"))?;
        authenticate(token, &state.config.jwt)
    }
}

/// Caller identity for routes anonymous visitors may also use.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub ActorContext);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(Actor(authenticate(token, &state.config.jwt)?.actor)),
            None => Ok(Actor(ActorContext::anonymous())),
        }
    }
}
