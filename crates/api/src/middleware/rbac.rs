//! Moderator-only route guard.
//!
//! Used by the read-only moderator listings (dispute queue, audit log).
//! Mutating moderation operations check the same capability inside the
//! workflow, so they report the operation-specific message instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated caller holding the elevated capability; 403 otherwise.
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.actor.is_elevated {
            return Err(AppError::Core(CoreError::Forbidden(
                "Moderator access required".into(),
            )));
        }
        Ok(RequireModerator(user))
    }
}
