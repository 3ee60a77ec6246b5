//! Repository for the `entries` table: the entry store.
//!
//! Titles are matched case-insensitively everywhere via `lower(title)`, which
//! is also the expression behind the `uq_entries_title_lower` unique index.

use folio_core::search::contains_pattern;
use folio_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::entry::{Entry, EntryPeople, UpsertedEntry};

/// Column list for entries queries.
const COLUMNS: &str = "id, title, content, created_by, is_locked, lock_reason, \
    locked_by, locked_at, verification_status, verification_note, verified_by, \
    verified_at, created_at, updated_at";

/// Case-insensitive alphabetical order.
const TITLE_ORDER: &str = "ORDER BY lower(title) ASC, title ASC";

/// Provides CRUD, listing and search over entries.
pub struct EntryRepo;

impl EntryRepo {
    // ── Lookup ───────────────────────────────────────────────────────

    /// Find an entry by title, ignoring case.
    pub async fn find_by_title<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE lower(title) = lower($1)");
        sqlx::query_as::<_, Entry>(&query)
            .bind(title)
            .fetch_optional(executor)
            .await
    }

    /// Same as [`EntryRepo::find_by_title`] but takes a row lock for the rest
    /// of the enclosing transaction.
    pub async fn find_by_title_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries WHERE lower(title) = lower($1) FOR UPDATE"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(title)
            .fetch_optional(executor)
            .await
    }

    /// Find an entry by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an entry by ID, locking the row for the enclosing transaction.
    pub async fn find_by_id_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Usernames of the entry's owner, locker and verifier.
    pub async fn people<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<EntryPeople, sqlx::Error> {
        let people = sqlx::query_as::<_, EntryPeople>(
            "SELECT o.username AS owner, l.username AS locked_by, v.username AS verified_by
             FROM entries e
             LEFT JOIN users o ON o.id = e.created_by
             LEFT JOIN users l ON l.id = e.locked_by
             LEFT JOIN users v ON v.id = e.verified_by
             WHERE e.id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(people.unwrap_or_default())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Insert a new entry in `draft`, unlocked.
    ///
    /// A case-insensitive title collision fails with a unique violation on
    /// `uq_entries_title_lower`.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
        content: &str,
        owner: Option<DbId>,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (title, content, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(title)
            .bind(content)
            .bind(owner)
            .fetch_one(executor)
            .await
    }

    /// Create the entry if no title matches (ignoring case), otherwise
    /// overwrite its content. The stored title keeps its original casing.
    pub async fn upsert_content<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
        content: &str,
    ) -> Result<UpsertedEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (title, content)
             VALUES ($1, $2)
             ON CONFLICT ((lower(title))) DO UPDATE SET content = EXCLUDED.content
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedEntry>(&query)
            .bind(title)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    /// Overwrite an entry's content.
    pub async fn update_content<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        content: &str,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!("UPDATE entries SET content = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    /// Place a moderation lock.
    pub async fn set_lock<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        reason: &str,
        locked_by: Option<DbId>,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET
                is_locked = true,
                lock_reason = $2,
                locked_by = $3,
                locked_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(reason)
            .bind(locked_by)
            .fetch_one(executor)
            .await
    }

    /// Remove a moderation lock and clear its bookkeeping fields.
    pub async fn clear_lock<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET
                is_locked = false,
                lock_reason = '',
                locked_by = NULL,
                locked_at = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Set status, note and verifier stamp in one statement.
    pub async fn set_verification<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        status: &str,
        note: &str,
        verified_by: Option<DbId>,
        verified_at: Option<Timestamp>,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET
                verification_status = $2,
                verification_note = $3,
                verified_by = $4,
                verified_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(status)
            .bind(note)
            .bind(verified_by)
            .bind(verified_at)
            .fetch_one(executor)
            .await
    }

    /// Change only the verification status (dispute-driven transitions).
    pub async fn set_verification_status<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        status: &str,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET verification_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Delete an entry by ID. Revisions and disputes cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an entry by title, ignoring case. Returns `true` if a row went.
    pub async fn delete_by_title<'e, E: PgExecutor<'e>>(
        executor: E,
        title: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE lower(title) = lower($1)")
            .bind(title)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every entry. Returns the number of rows removed.
    pub async fn delete_all<'e, E: PgExecutor<'e>>(executor: E) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries").execute(executor).await?;
        Ok(result.rows_affected())
    }

    // ── Listing & search ─────────────────────────────────────────────

    /// All titles in case-insensitive alphabetical order.
    pub async fn list_titles<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<String>, sqlx::Error> {
        let query = format!("SELECT title FROM entries {TITLE_ORDER}");
        sqlx::query_scalar::<_, String>(&query)
            .fetch_all(executor)
            .await
    }

    /// Entries whose title or content contains `query`, ignoring case.
    ///
    /// The query is matched literally (LIKE wildcards are escaped).
    pub async fn search<'e, E: PgExecutor<'e>>(
        executor: E,
        query_str: &str,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let pattern = contains_pattern(query_str);
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE title ILIKE $1 OR content ILIKE $1
             {TITLE_ORDER}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(&pattern)
            .fetch_all(executor)
            .await
    }

    /// Most recently updated entries.
    pub async fn list_recent<'e, E: PgExecutor<'e>>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries ORDER BY updated_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Most recently updated entries created by `owner`.
    pub async fn list_recent_by_owner<'e, E: PgExecutor<'e>>(
        executor: E,
        owner: DbId,
        limit: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries
             WHERE created_by = $1
             ORDER BY updated_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(owner)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Number of entries created by `owner`.
    pub async fn count_by_owner<'e, E: PgExecutor<'e>>(
        executor: E,
        owner: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries WHERE created_by = $1")
            .bind(owner)
            .fetch_one(executor)
            .await
    }

    /// Total number of entries.
    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries")
            .fetch_one(executor)
            .await
    }

    /// Number of entries with the given verification status.
    pub async fn count_by_status<'e, E: PgExecutor<'e>>(
        executor: E,
        status: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries WHERE verification_status = $1")
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Number of entries currently under a moderation lock.
    pub async fn count_locked<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries WHERE is_locked")
            .fetch_one(executor)
            .await
    }
}
