//! Dispute models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `disputes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dispute {
    pub id: DbId,
    pub entry_id: DbId,
    pub reported_by: Option<DbId>,
    pub message: String,
    pub status: String,
    pub resolved_by: Option<DbId>,
    pub resolution_note: String,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// A dispute joined with the title of the entry it targets (moderator queue).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DisputeWithEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dispute: Dispute,
    pub entry_title: String,
}

/// DTO for reporting a dispute.
#[derive(Debug, Default, Deserialize)]
pub struct ReportDispute {
    pub message: Option<String>,
}

/// DTO for closing a dispute. Unknown resolutions are coerced to `resolved`.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveDispute {
    pub resolution: Option<String>,
    pub resolution_note: Option<String>,
}
