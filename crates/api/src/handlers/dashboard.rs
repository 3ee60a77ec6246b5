//! Per-user dashboard, with extra moderator sections for admins.

use axum::extract::State;
use axum::response::IntoResponse;

use folio_core::search::{
    DASHBOARD_ALL_ENTRIES, DASHBOARD_AUDIT_ROWS, DASHBOARD_OPEN_DISPUTES, DASHBOARD_OWN_ACTIVITY,
    DASHBOARD_OWN_ENTRIES,
};
use folio_db::models::dashboard::{Dashboard, ModeratorSections};
use folio_db::repositories::{AuditLogRepo, DashboardRepo, DisputeRepo, EntryRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::data;
use crate::state::AppState;

/// GET /dashboard
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let actor = auth.actor;

    let stats = DashboardRepo::stats(pool).await?;
    let your_entries_count = EntryRepo::count_by_owner(pool, auth.user_id).await?;
    let your_recent_entries =
        EntryRepo::list_recent_by_owner(pool, auth.user_id, DASHBOARD_OWN_ENTRIES).await?;
    let your_recent_activity =
        AuditLogRepo::list(pool, Some(auth.user_id), DASHBOARD_OWN_ACTIVITY).await?;

    let moderator = if actor.is_elevated {
        Some(ModeratorSections {
            all_recent_entries: EntryRepo::list_recent(pool, DASHBOARD_ALL_ENTRIES).await?,
            recent_audit_logs: AuditLogRepo::list(pool, None, DASHBOARD_AUDIT_ROWS).await?,
            pending_disputes: DisputeRepo::list_open(pool, DASHBOARD_OPEN_DISPUTES).await?,
        })
    } else {
        None
    };

    Ok(data(Dashboard {
        stats,
        your_entries_count,
        your_recent_entries,
        your_recent_activity,
        moderator,
    }))
}
