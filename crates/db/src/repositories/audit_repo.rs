//! Repository for the `audit_logs` table.
//!
//! Audit rows are immutable: the repository exposes insert and select only.

use folio_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::audit::{AuditLog, CreateAuditLog};

/// Column list for audit_logs queries.
const COLUMNS: &str = "id, action, entry_title, entry_id, actor_id, details, created_at";

/// Appends and queries audit records.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit record.
    ///
    /// Entry and actor references go through sub-selects: if the referenced
    /// row is gone the column is stored as NULL rather than failing the
    /// foreign key. The title snapshot is always kept.
    pub async fn record<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateAuditLog,
    ) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (action, entry_title, entry_id, actor_id, details)
             VALUES (
                $1,
                $2,
                (SELECT id FROM entries WHERE id = $3),
                (SELECT id FROM users WHERE id = $4),
                $5
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.action)
            .bind(&input.entry_title)
            .bind(input.entry_id)
            .bind(input.actor_id)
            .bind(&input.details)
            .fetch_one(executor)
            .await
    }

    /// Newest records first, optionally restricted to one actor.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        actor_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR actor_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(actor_id)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Records for a title snapshot, ignoring case. Works after the entry is
    /// deleted.
    pub async fn list_for_title<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE lower(entry_title) = lower($1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(title)
            .fetch_all(executor)
            .await
    }
}
