//! Repository for the `disputes` table: the dispute tracker.

use folio_core::moderation::DisputeStatus;
use folio_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::dispute::{Dispute, DisputeWithEntry};

/// Column list for disputes queries.
const COLUMNS: &str = "id, entry_id, reported_by, message, status, resolved_by, \
    resolution_note, created_at, resolved_at";

/// Same columns qualified with the `d` alias, plus the joined entry title.
const JOINED_COLUMNS: &str = "d.id, d.entry_id, d.reported_by, d.message, d.status, \
    d.resolved_by, d.resolution_note, d.created_at, d.resolved_at, e.title AS entry_title";

/// Opens, resolves and lists disputes.
pub struct DisputeRepo;

impl DisputeRepo {
    /// File a new dispute in `open` state.
    pub async fn open<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
        reported_by: Option<DbId>,
        message: &str,
    ) -> Result<Dispute, sqlx::Error> {
        let query = format!(
            "INSERT INTO disputes (entry_id, reported_by, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(entry_id)
            .bind(reported_by)
            .bind(message)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disputes WHERE id = $1");
        sqlx::query_as::<_, Dispute>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Close an open dispute.
    ///
    /// Returns `None` if the dispute does not exist or is no longer open;
    /// terminal disputes are never modified.
    pub async fn resolve<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        resolution: DisputeStatus,
        resolved_by: Option<DbId>,
        resolution_note: &str,
    ) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!(
            "UPDATE disputes SET
                status = $2,
                resolved_by = $3,
                resolution_note = $4,
                resolved_at = NOW()
             WHERE id = $1 AND status = 'open'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(id)
            .bind(resolution.as_str())
            .bind(resolved_by)
            .bind(resolution_note)
            .fetch_optional(executor)
            .await
    }

    /// Number of open disputes against one entry.
    pub async fn count_open_for<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM disputes WHERE entry_id = $1 AND status = 'open'",
        )
        .bind(entry_id)
        .fetch_one(executor)
        .await
    }

    /// Number of open disputes across the wiki.
    pub async fn count_open<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM disputes WHERE status = 'open'")
            .fetch_one(executor)
            .await
    }

    /// Open disputes with their entry titles, newest first.
    pub async fn list_open<'e, E: PgExecutor<'e>>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<DisputeWithEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM disputes d
             JOIN entries e ON e.id = d.entry_id
             WHERE d.status = 'open'
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, DisputeWithEntry>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Disputes in every status with their entry titles, newest first.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<DisputeWithEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM disputes d
             JOIN entries e ON e.id = d.entry_id
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, DisputeWithEntry>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// All disputes filed against one entry, newest first.
    pub async fn list_for_entry<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_id: DbId,
    ) -> Result<Vec<Dispute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM disputes
             WHERE entry_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(entry_id)
            .fetch_all(executor)
            .await
    }
}
