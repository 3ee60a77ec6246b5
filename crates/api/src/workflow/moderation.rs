//! Superuser moderation: locking and verification status.

use chrono::Utc;
use folio_core::actor::ActorContext;
use folio_core::audit::{actions, lock_details, verify_details, DETAILS_UNLOCKED};
use folio_core::entry::{normalize, validate_note};
use folio_core::moderation::{
    coerce_verification_status, lock_transition, records_verifier, LockTransition,
};
use folio_db::models::entry::{Entry, SetVerification};
use folio_db::repositories::EntryRepo;
use serde::Serialize;
use sqlx::PgPool;

use super::{lock_entry_by_title, record_audit};
use crate::error::AppResult;

/// Result of a lock operation and which way it went.
#[derive(Debug, Serialize)]
pub struct LockOutcome {
    pub entry: Entry,
    pub transition: LockTransition,
}

/// Lock the entry if it is unlocked, unlock it otherwise.
pub async fn toggle_lock(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    reason: Option<&str>,
) -> AppResult<LockOutcome> {
    apply_lock(pool, actor, title, None, reason).await
}

/// Place a moderation lock. Locking a locked entry changes nothing.
pub async fn lock_entry(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    reason: Option<&str>,
) -> AppResult<LockOutcome> {
    apply_lock(pool, actor, title, Some(LockTransition::Lock), reason).await
}

/// Remove a moderation lock. Unlocking an unlocked entry changes nothing.
pub async fn unlock_entry(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
) -> AppResult<LockOutcome> {
    apply_lock(pool, actor, title, Some(LockTransition::Unlock), None).await
}

/// Shared body of the lock operations. `requested = None` means toggle.
async fn apply_lock(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    requested: Option<LockTransition>,
    reason: Option<&str>,
) -> AppResult<LockOutcome> {
    actor.require_elevated("lock or unlock pages")?;

    let reason = normalize(reason);
    validate_note("Lock reason", &reason)?;

    let mut tx = pool.begin().await?;
    let current = lock_entry_by_title(&mut tx, title).await?;

    let transition = requested.unwrap_or_else(|| lock_transition(current.is_locked));
    let entry = match transition {
        LockTransition::Lock if current.is_locked => current,
        LockTransition::Lock => {
            EntryRepo::set_lock(&mut *tx, current.id, &reason, actor.user_id()).await?
        }
        LockTransition::Unlock if !current.is_locked => current,
        LockTransition::Unlock => EntryRepo::clear_lock(&mut *tx, current.id).await?,
    };

    tx.commit().await?;

    let (action, details) = match transition {
        LockTransition::Lock => (actions::LOCK, lock_details(&reason)),
        LockTransition::Unlock => (actions::UNLOCK, DETAILS_UNLOCKED.to_string()),
    };
    record_audit(pool, action, &entry.title, Some(entry.id), actor, details).await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        action,
        "Entry lock changed"
    );

    Ok(LockOutcome { entry, transition })
}

/// Set the verification status and note.
///
/// Unknown statuses are coerced to `draft`. Only `verified` records the
/// verifier and timestamp; every other status clears them.
pub async fn set_verification(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    input: &SetVerification,
) -> AppResult<Entry> {
    actor.require_elevated("update verification status")?;

    let status = coerce_verification_status(input.verification_status.as_deref());
    let note = normalize(input.verification_note.as_deref());
    validate_note("Verification note", &note)?;

    let mut tx = pool.begin().await?;
    let current = lock_entry_by_title(&mut tx, title).await?;

    let (verified_by, verified_at) = if records_verifier(status) {
        (actor.user_id(), Some(Utc::now()))
    } else {
        (None, None)
    };

    let entry = EntryRepo::set_verification(
        &mut *tx,
        current.id,
        status.as_str(),
        &note,
        verified_by,
        verified_at,
    )
    .await?;

    tx.commit().await?;

    record_audit(
        pool,
        actions::VERIFY,
        &entry.title,
        Some(entry.id),
        actor,
        verify_details(status.as_str()),
    )
    .await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        status = %status,
        "Verification status set"
    );

    Ok(entry)
}
