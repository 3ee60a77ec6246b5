//! Audit log models. Audit rows have no `updated_at` (immutable records).

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub action: String,
    /// Title at the time of the action; survives entry deletion.
    pub entry_title: String,
    pub entry_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub details: String,
    pub created_at: Timestamp,
}

/// DTO for appending an audit row.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub action: &'static str,
    pub entry_title: String,
    pub entry_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub details: String,
}

/// Query parameters for the audit listing.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub actor_id: Option<DbId>,
    pub limit: Option<i64>,
}
