//! Handlers for the moderator dispute queue.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use folio_core::search::DISPUTE_QUEUE_LIMIT;
use folio_core::types::DbId;
use folio_db::models::dispute::ResolveDispute;
use folio_db::repositories::DisputeRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::response::data;
use crate::state::AppState;
use crate::workflow;

/// GET /disputes
///
/// Disputes in every status, newest first, with their entry titles.
pub async fn list_disputes(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let disputes = DisputeRepo::list(&state.pool, DISPUTE_QUEUE_LIMIT).await?;
    Ok(data(disputes))
}

/// POST /disputes/{id}/resolve
///
/// Without a body the dispute is closed as `resolved` with no note.
pub async fn resolve_dispute(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(dispute_id): Path<DbId>,
    body: Option<AppJson<ResolveDispute>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|AppJson(b)| b).unwrap_or_default();
    let outcome =
        workflow::resolve_dispute(&state.pool, &auth.actor, dispute_id, &input).await?;
    Ok(data(outcome))
}
