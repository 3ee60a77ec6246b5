use axum::extract::{Query, State};
use axum::response::IntoResponse;

use folio_core::audit::{DEFAULT_AUDIT_LIMIT, MAX_AUDIT_LIMIT};
use folio_core::search::clamp_limit;
use folio_db::models::audit::AuditQuery;
use folio_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireModerator;
use crate::response::data;
use crate::state::AppState;

/// GET /audit-logs?limit=&actor_id=
///
/// Newest first, capped at 100 by default.
pub async fn list_audit_logs(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_AUDIT_LIMIT, MAX_AUDIT_LIMIT);
    let logs = AuditLogRepo::list(&state.pool, params.actor_id, limit).await?;
    Ok(data(logs))
}
