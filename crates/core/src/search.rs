//! Search and listing helpers.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Open disputes shown in the moderator queue.
pub const DISPUTE_QUEUE_LIMIT: i64 = 200;

/// Dashboard: caller's recently updated entries.
pub const DASHBOARD_OWN_ENTRIES: i64 = 8;

/// Dashboard: caller's latest audit actions.
pub const DASHBOARD_OWN_ACTIVITY: i64 = 10;

/// Dashboard (superuser): most recently updated entries.
pub const DASHBOARD_ALL_ENTRIES: i64 = 12;

/// Dashboard (superuser): latest audit rows.
pub const DASHBOARD_AUDIT_ROWS: i64 = 20;

/// Dashboard (superuser): open disputes.
pub const DASHBOARD_OPEN_DISPUTES: i64 = 15;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build a `%...%` substring pattern from raw user input.
pub fn contains_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, 100, 500), 100);
        assert_eq!(clamp_limit(Some(0), 100, 500), 1);
        assert_eq!(clamp_limit(Some(-4), 100, 500), 1);
        assert_eq!(clamp_limit(Some(9999), 100, 500), 500);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn contains_pattern_wraps() {
        assert_eq!(contains_pattern("dj"), "%dj%");
    }
}
