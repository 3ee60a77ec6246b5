//! Dispute-driven status changes.

use folio_core::actor::ActorContext;
use folio_core::audit::{actions, dispute_resolved_details, DETAILS_DISPUTE_REPORTED};
use folio_core::entry::{normalize, validate_dispute_message, validate_note};
use folio_core::error::CoreError;
use folio_core::moderation::{
    check_dispute_resolvable, coerce_resolution, status_after_report, status_after_resolution,
    DisputeStatus,
};
use folio_core::types::DbId;
use folio_db::models::dispute::{Dispute, ReportDispute, ResolveDispute};
use folio_db::models::entry::Entry;
use folio_db::repositories::{DisputeRepo, EntryRepo};
use serde::Serialize;
use sqlx::PgPool;

use super::{lock_entry_by_title, record_audit, stored_status};
use crate::error::AppResult;

/// The filed dispute and the entry after its status change (if any).
#[derive(Debug, Serialize)]
pub struct ReportOutcome {
    pub dispute: Dispute,
    pub entry: Entry,
}

/// The closed dispute and its entry after any status change.
#[derive(Debug, Serialize)]
pub struct ResolveOutcome {
    pub dispute: Dispute,
    pub entry: Entry,
}

/// File a dispute. The entry moves to `disputed` unless it already is.
pub async fn report_dispute(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    input: &ReportDispute,
) -> AppResult<ReportOutcome> {
    actor.require_authenticated("report disputes")?;

    let message = normalize(input.message.as_deref());

    let mut tx = pool.begin().await?;
    let current = lock_entry_by_title(&mut tx, title).await?;

    validate_dispute_message(&message)?;

    let dispute = DisputeRepo::open(&mut *tx, current.id, actor.user_id(), &message).await?;

    let entry = match status_after_report(stored_status(&current)?) {
        Some(next) => {
            EntryRepo::set_verification_status(&mut *tx, current.id, next.as_str()).await?
        }
        None => current,
    };

    tx.commit().await?;

    record_audit(
        pool,
        actions::DISPUTE_REPORTED,
        &entry.title,
        Some(entry.id),
        actor,
        DETAILS_DISPUTE_REPORTED.to_string(),
    )
    .await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        dispute_id = dispute.id,
        "Dispute reported"
    );

    Ok(ReportOutcome { dispute, entry })
}

/// Close an open dispute as `resolved` or `rejected`.
///
/// Unknown resolutions are coerced to `resolved`. When the last open dispute
/// on a `disputed` entry closes, the entry goes back to `under_review`.
pub async fn resolve_dispute(
    pool: &PgPool,
    actor: &ActorContext,
    dispute_id: DbId,
    input: &ResolveDispute,
) -> AppResult<ResolveOutcome> {
    actor.require_elevated("resolve disputes")?;

    let resolution = coerce_resolution(input.resolution.as_deref());
    let note = normalize(input.resolution_note.as_deref());
    validate_note("Resolution note", &note)?;

    let mut tx = pool.begin().await?;

    let existing = DisputeRepo::find_by_id(&mut *tx, dispute_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Dispute", dispute_id))?;
    let existing_status = DisputeStatus::parse(&existing.status).ok_or_else(|| {
        CoreError::Internal(format!(
            "Dispute {dispute_id} has unknown status '{}'",
            existing.status
        ))
    })?;
    check_dispute_resolvable(dispute_id, existing_status)?;

    // Entry row first, same lock order as report_dispute.
    let current = EntryRepo::find_by_id_for_update(&mut *tx, existing.entry_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Entry", existing.entry_id))?;

    // Another moderator may have closed it while we waited for the lock.
    let dispute = DisputeRepo::resolve(&mut *tx, dispute_id, resolution, actor.user_id(), &note)
        .await?
        .ok_or_else(|| CoreError::Conflict(format!("Dispute {dispute_id} is already closed")))?;

    let remaining_open = DisputeRepo::count_open_for(&mut *tx, current.id).await?;
    let entry = match status_after_resolution(stored_status(&current)?, remaining_open) {
        Some(next) => {
            EntryRepo::set_verification_status(&mut *tx, current.id, next.as_str()).await?
        }
        None => current,
    };

    tx.commit().await?;

    record_audit(
        pool,
        actions::DISPUTE_RESOLVED,
        &entry.title,
        Some(entry.id),
        actor,
        dispute_resolved_details(dispute.id, resolution.as_str()),
    )
    .await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        dispute_id = dispute.id,
        resolution = %resolution,
        remaining_open,
        "Dispute resolved"
    );

    Ok(ResolveOutcome { dispute, entry })
}
