//! Content lifecycle: create, edit, delete, rollback.

use folio_core::actor::ActorContext;
use folio_core::audit::{actions, edit_details, rollback_details, DETAILS_CREATED, DETAILS_DELETED};
use folio_core::entry::{normalize, validate_content, validate_note, validate_title};
use folio_core::error::CoreError;
use folio_core::moderation::{
    check_delete_allowed, check_edit_allowed, check_rollback_allowed, edit_needs_revision,
    DEFAULT_EDIT_SUMMARY, PRE_ROLLBACK_SUMMARY,
};
use folio_core::types::DbId;
use folio_db::models::entry::{CreateEntry, EditEntry, Entry};
use folio_db::models::revision::EntryRevision;
use folio_db::repositories::{EntryRepo, RevisionRepo};
use serde::Serialize;
use sqlx::PgPool;

use super::{lock_entry_by_title, record_audit};
use crate::error::AppResult;

/// Result of an edit. `revision` is `None` when the content was unchanged.
#[derive(Debug, Serialize)]
pub struct EditOutcome {
    pub entry: Entry,
    pub revision: Option<EntryRevision>,
}

/// Result of a rollback: the restored entry and the snapshot taken first.
#[derive(Debug, Serialize)]
pub struct RollbackOutcome {
    pub entry: Entry,
    pub snapshot: EntryRevision,
    pub restored_revision_id: DbId,
}

/// Create a new entry owned by the caller, in `draft` and unlocked.
pub async fn create_entry(
    pool: &PgPool,
    actor: &ActorContext,
    input: &CreateEntry,
) -> AppResult<Entry> {
    actor.require_authenticated("create entries")?;

    let title = normalize(input.title.as_deref());
    let content = normalize(input.content.as_deref());
    validate_title(&title)?;
    validate_content(&content)?;

    let mut tx = pool.begin().await?;

    if EntryRepo::find_by_title(&mut *tx, &title).await?.is_some() {
        return Err(CoreError::Conflict(format!("Entry page '{title}' already exists")).into());
    }

    // A concurrent insert of the same title still fails on
    // uq_entries_title_lower and maps to 409.
    let entry = EntryRepo::create(&mut *tx, &title, &content, actor.user_id()).await?;
    tx.commit().await?;

    record_audit(
        pool,
        actions::CREATE,
        &entry.title,
        Some(entry.id),
        actor,
        DETAILS_CREATED.to_string(),
    )
    .await;

    tracing::info!(user_id = ?actor.id, entry_id = entry.id, title = %entry.title, "Entry created");

    Ok(entry)
}

/// Replace an entry's content, snapshotting the old content first if it
/// differs.
pub async fn edit_entry(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    input: &EditEntry,
) -> AppResult<EditOutcome> {
    actor.require_authenticated("edit entries")?;

    let content = normalize(input.content.as_deref());
    let summary = normalize(input.edit_summary.as_deref());
    validate_note("Edit summary", &summary)?;

    let mut tx = pool.begin().await?;
    let current = lock_entry_by_title(&mut tx, title).await?;

    check_edit_allowed(actor, current.is_locked)?;
    validate_content(&content)?;

    let (entry, revision) = if edit_needs_revision(&current.content, &content) {
        let snapshot_summary = if summary.is_empty() {
            DEFAULT_EDIT_SUMMARY
        } else {
            summary.as_str()
        };
        let revision = RevisionRepo::append(
            &mut *tx,
            current.id,
            &current.content,
            actor.user_id(),
            snapshot_summary,
        )
        .await?;
        let entry = EntryRepo::update_content(&mut *tx, current.id, &content).await?;
        (entry, Some(revision))
    } else {
        (current, None)
    };

    tx.commit().await?;

    record_audit(
        pool,
        actions::EDIT,
        &entry.title,
        Some(entry.id),
        actor,
        edit_details(&summary),
    )
    .await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        revision_id = ?revision.as_ref().map(|r| r.id),
        "Entry edited"
    );

    Ok(EditOutcome { entry, revision })
}

/// Delete an entry. Revisions and disputes go with it; audit rows keep the
/// title.
pub async fn delete_entry(pool: &PgPool, actor: &ActorContext, title: &str) -> AppResult<Entry> {
    actor.require_authenticated("delete entries")?;

    let mut tx = pool.begin().await?;
    let entry = lock_entry_by_title(&mut tx, title).await?;

    check_delete_allowed(actor, entry.created_by)?;

    EntryRepo::delete(&mut *tx, entry.id).await?;
    tx.commit().await?;

    // The row is gone, so the stored entry_id degrades to NULL.
    record_audit(
        pool,
        actions::DELETE,
        &entry.title,
        Some(entry.id),
        actor,
        DETAILS_DELETED.to_string(),
    )
    .await;

    tracing::info!(user_id = ?actor.id, entry_id = entry.id, title = %entry.title, "Entry deleted");

    Ok(entry)
}

/// Restore the content of one of the entry's revisions.
///
/// The current content is snapshotted first, so a rollback is itself
/// reversible.
pub async fn rollback_entry(
    pool: &PgPool,
    actor: &ActorContext,
    title: &str,
    revision_id: DbId,
) -> AppResult<RollbackOutcome> {
    actor.require_authenticated("roll back entries")?;

    let mut tx = pool.begin().await?;
    let current = lock_entry_by_title(&mut tx, title).await?;

    check_rollback_allowed(actor, current.created_by)?;

    let target = RevisionRepo::find_for_entry(&mut *tx, current.id, revision_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Revision", revision_id))?;

    let snapshot = RevisionRepo::append(
        &mut *tx,
        current.id,
        &current.content,
        actor.user_id(),
        PRE_ROLLBACK_SUMMARY,
    )
    .await?;
    let entry = EntryRepo::update_content(&mut *tx, current.id, &target.content).await?;

    tx.commit().await?;

    record_audit(
        pool,
        actions::ROLLBACK,
        &entry.title,
        Some(entry.id),
        actor,
        rollback_details(target.id),
    )
    .await;

    tracing::info!(
        user_id = ?actor.id,
        entry_id = entry.id,
        revision_id = target.id,
        "Entry rolled back"
    );

    Ok(RollbackOutcome {
        entry,
        snapshot,
        restored_revision_id: target.id,
    })
}
