//! Audit action names and detail text.
//!
//! Action values must match the CHECK constraint on `audit_logs.action`.

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known audit actions.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const EDIT: &str = "edit";
    pub const DELETE: &str = "delete";
    pub const LOCK: &str = "lock";
    pub const UNLOCK: &str = "unlock";
    pub const ROLLBACK: &str = "rollback";
    pub const VERIFY: &str = "verify";
    pub const DISPUTE_REPORTED: &str = "dispute_reported";
    pub const DISPUTE_RESOLVED: &str = "dispute_resolved";
}

/// All valid audit actions.
pub const VALID_ACTIONS: &[&str] = &[
    actions::CREATE,
    actions::EDIT,
    actions::DELETE,
    actions::LOCK,
    actions::UNLOCK,
    actions::ROLLBACK,
    actions::VERIFY,
    actions::DISPUTE_REPORTED,
    actions::DISPUTE_RESOLVED,
];

// ---------------------------------------------------------------------------
// Listing limits
// ---------------------------------------------------------------------------

/// Default number of rows in the moderator audit listing.
pub const DEFAULT_AUDIT_LIMIT: i64 = 100;

/// Upper bound for any audit listing.
pub const MAX_AUDIT_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// Detail text
// ---------------------------------------------------------------------------

pub const DETAILS_CREATED: &str = "Created new entry";
pub const DETAILS_DELETED: &str = "Deleted entry";
pub const DETAILS_UNLOCKED: &str = "Unlocked entry";
pub const DETAILS_DISPUTE_REPORTED: &str = "Dispute reported";

/// Detail text for an edit: the summary, or a generic note.
pub fn edit_details(summary: &str) -> String {
    if summary.is_empty() {
        "Updated entry content".to_string()
    } else {
        summary.to_string()
    }
}

/// Detail text for a lock: the reason, or a generic note.
pub fn lock_details(reason: &str) -> String {
    if reason.is_empty() {
        "Locked entry".to_string()
    } else {
        reason.to_string()
    }
}

pub fn rollback_details(revision_id: i64) -> String {
    format!("Rolled back to revision {revision_id}")
}

pub fn verify_details(status: &str) -> String {
    format!("Status set to {status}")
}

pub fn dispute_resolved_details(dispute_id: i64, resolution: &str) -> String {
    format!("Dispute {dispute_id} marked {resolution}")
}
