//! Repository for the `entry_revisions` table: the append-only revision log.

use folio_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::revision::EntryRevision;

/// Column list for entry_revisions queries.
const COLUMNS: &str = "id, entry_id, content, edited_by, edit_summary, created_at";

/// Appends and reads content snapshots. Rows are never updated.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Snapshot `content` (the content as it was *before* the change).
    pub async fn append<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
        content: &str,
        edited_by: Option<DbId>,
        edit_summary: &str,
    ) -> Result<EntryRevision, sqlx::Error> {
        let query = format!(
            "INSERT INTO entry_revisions (entry_id, content, edited_by, edit_summary)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntryRevision>(&query)
            .bind(entry_id)
            .bind(content)
            .bind(edited_by)
            .bind(edit_summary)
            .fetch_one(executor)
            .await
    }

    /// All revisions of an entry, newest first.
    pub async fn list_for<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
    ) -> Result<Vec<EntryRevision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entry_revisions
             WHERE entry_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EntryRevision>(&query)
            .bind(entry_id)
            .fetch_all(executor)
            .await
    }

    /// Find a revision, but only if it belongs to `entry_id`.
    pub async fn find_for_entry<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<EntryRevision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entry_revisions WHERE id = $1 AND entry_id = $2");
        sqlx::query_as::<_, EntryRevision>(&query)
            .bind(revision_id)
            .bind(entry_id)
            .fetch_optional(executor)
            .await
    }

    /// Total number of revisions across all entries.
    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entry_revisions")
            .fetch_one(executor)
            .await
    }
}
