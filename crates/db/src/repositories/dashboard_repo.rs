//! Aggregate counters for the dashboard.

use sqlx::PgExecutor;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Site-wide totals in a single round trip.
    pub async fn stats<'e, E: PgExecutor<'e>>(executor: E) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM entries) AS total_entries,
                (SELECT COUNT(*) FROM entries WHERE is_locked) AS locked_entries,
                (SELECT COUNT(*) FROM entries WHERE verification_status = 'verified')
                    AS verified_entries,
                (SELECT COUNT(*) FROM entry_revisions) AS revision_count,
                (SELECT COUNT(*) FROM disputes WHERE status = 'open') AS pending_disputes",
        )
        .fetch_one(executor)
        .await
    }
}
