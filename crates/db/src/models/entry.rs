//! Wiki entry models and request DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_by: Option<DbId>,
    pub is_locked: bool,
    pub lock_reason: String,
    pub locked_by: Option<DbId>,
    pub locked_at: Option<Timestamp>,
    pub verification_status: String,
    pub verification_note: String,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an insert-or-update by title.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedEntry {
    #[sqlx(flatten)]
    pub entry: Entry,
    /// `true` when the row was inserted rather than updated.
    pub inserted: bool,
}

/// DTO for creating a new entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// DTO for saving an edit.
#[derive(Debug, Deserialize)]
pub struct EditEntry {
    pub content: Option<String>,
    pub edit_summary: Option<String>,
}

/// DTO for the lock toggle. The reason only applies when locking.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleLock {
    pub lock_reason: Option<String>,
}

/// DTO for setting the verification status.
///
/// Unknown status values are coerced to `draft` rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct SetVerification {
    pub verification_status: Option<String>,
    pub verification_note: Option<String>,
}

/// Index listing: all titles plus how many entries are locked.
#[derive(Debug, Serialize)]
pub struct EntryIndex {
    pub titles: Vec<String>,
    pub locked_entries: i64,
}

/// Search response. An exact title match is reported separately.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub exact_match: Option<Entry>,
    pub results: Vec<Entry>,
}

/// Usernames behind an entry's owner, locker and verifier references.
/// `None` when the reference is unset or the user no longer exists.
#[derive(Debug, Clone, Default, FromRow)]
pub struct EntryPeople {
    pub owner: Option<String>,
    pub locked_by: Option<String>,
    pub verified_by: Option<String>,
}

/// Caller-specific capabilities on a single entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntryPermissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_moderate: bool,
    pub can_rollback: bool,
}

/// Full entry view: the row, its rendered HTML, and moderation context.
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub html: String,
    pub owner_name: String,
    pub locked_by_name: String,
    pub verified_by_name: String,
    pub open_disputes_count: i64,
    pub permissions: EntryPermissions,
}

/// Markdown preview response.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}
