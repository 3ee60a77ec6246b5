//! Dashboard aggregate models.

use serde::Serialize;
use sqlx::FromRow;

use super::audit::AuditLog;
use super::dispute::DisputeWithEntry;
use super::entry::Entry;

/// Site-wide counters shown on every dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_entries: i64,
    pub locked_entries: i64,
    pub verified_entries: i64,
    pub revision_count: i64,
    pub pending_disputes: i64,
}

/// Extra sections only superusers see.
#[derive(Debug, Serialize)]
pub struct ModeratorSections {
    pub all_recent_entries: Vec<Entry>,
    pub recent_audit_logs: Vec<AuditLog>,
    pub pending_disputes: Vec<DisputeWithEntry>,
}

/// Full dashboard response.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub your_entries_count: i64,
    pub your_recent_entries: Vec<Entry>,
    pub your_recent_activity: Vec<AuditLog>,
    pub moderator: Option<ModeratorSections>,
}
