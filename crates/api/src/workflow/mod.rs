//! Moderation workflow.
//!
//! Every state-changing operation on an entry goes through this module. Each
//! operation:
//!
//! 1. checks the caller's [`ActorContext`] capability,
//! 2. runs its reads and writes in one transaction, selecting the entry row
//!    `FOR UPDATE` so snapshots and overwrites cannot interleave,
//! 3. commits, then appends an audit record.
//!
//! Audit writes are best effort: a failure is logged and never turns a
//! committed operation into an error.

mod disputes;
mod entries;
mod moderation;

pub use disputes::{report_dispute, resolve_dispute, ReportOutcome, ResolveOutcome};
pub use entries::{create_entry, delete_entry, edit_entry, rollback_entry, EditOutcome, RollbackOutcome};
pub use moderation::{lock_entry, set_verification, toggle_lock, unlock_entry, LockOutcome};

use folio_core::actor::ActorContext;
use folio_core::error::CoreError;
use folio_core::moderation::VerificationStatus;
use folio_core::types::DbId;
use folio_db::models::audit::CreateAuditLog;
use folio_db::models::entry::Entry;
use folio_db::repositories::{AuditLogRepo, EntryRepo};
use sqlx::{PgConnection, PgPool};

use crate::error::AppResult;

/// Load an entry by title (ignoring case) and lock its row, or fail with 404.
async fn lock_entry_by_title(conn: &mut PgConnection, title: &str) -> AppResult<Entry> {
    let entry = EntryRepo::find_by_title_for_update(&mut *conn, title)
        .await?
        .ok_or_else(|| CoreError::not_found("Entry", title))?;
    Ok(entry)
}

/// Parse the stored verification status. The column CHECK makes failure an
/// internal error.
fn stored_status(entry: &Entry) -> Result<VerificationStatus, CoreError> {
    VerificationStatus::parse(&entry.verification_status).ok_or_else(|| {
        CoreError::Internal(format!(
            "Entry {} has unknown verification status '{}'",
            entry.id, entry.verification_status
        ))
    })
}

/// Append an audit record, logging and swallowing any failure.
async fn record_audit(
    pool: &PgPool,
    action: &'static str,
    entry_title: &str,
    entry_id: Option<DbId>,
    actor: &ActorContext,
    details: String,
) {
    let input = CreateAuditLog {
        action,
        entry_title: entry_title.to_string(),
        entry_id,
        actor_id: actor.user_id(),
        details,
    };

    if let Err(e) = AuditLogRepo::record(pool, &input).await {
        tracing::warn!(
            action,
            title = %entry_title,
            error = %e,
            "Failed to write audit log (operation already committed)",
        );
    }
}
