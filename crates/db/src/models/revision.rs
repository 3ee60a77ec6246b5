//! Entry revision model.
//!
//! Revisions are immutable snapshots of the content an entry had *before* a
//! change.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `entry_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntryRevision {
    pub id: DbId,
    pub entry_id: DbId,
    pub content: String,
    pub edited_by: Option<DbId>,
    pub edit_summary: String,
    pub created_at: Timestamp,
}
