/// Row id for users, entries, revisions, disputes and audit records
/// (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// Stored as `TIMESTAMPTZ`, always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
