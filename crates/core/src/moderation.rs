//! Moderation state machine rules.
//!
//! An entry's moderation state is the pair (`is_locked`, verification status).
//! Everything here is pure: the workflow layer loads rows, asks these
//! functions what to do, and writes the result inside one transaction.

use serde::{Deserialize, Serialize};

use crate::actor::ActorContext;
use crate::error::CoreError;
use crate::types::DbId;

/// Revision summary used when an edit carries no summary of its own.
pub const DEFAULT_EDIT_SUMMARY: &str = "Edit snapshot";

/// Revision summary for the snapshot taken right before a rollback.
pub const PRE_ROLLBACK_SUMMARY: &str = "Pre-rollback snapshot";

// ---------------------------------------------------------------------------
// Verification status
// ---------------------------------------------------------------------------

/// Factual verification status of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Draft,
    UnderReview,
    Verified,
    Disputed,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 4] = [
        VerificationStatus::Draft,
        VerificationStatus::UnderReview,
        VerificationStatus::Verified,
        VerificationStatus::Disputed,
    ];

    /// The value stored in `entries.verification_status`.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Draft => "draft",
            VerificationStatus::UnderReview => "under_review",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Disputed => "disputed",
        }
    }

    /// Strict parse; `None` for anything outside the allowed set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Dispute status
// ---------------------------------------------------------------------------

/// Lifecycle of a dispute. `Open` is the only initial state; the other two
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    Open,
    Resolved,
    Rejected,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 3] = [
        DisputeStatus::Open,
        DisputeStatus::Resolved,
        DisputeStatus::Rejected,
    ];

    /// The value stored in `disputes.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            DisputeStatus::Open => "open",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn is_terminal(self) -> bool {
        self != DisputeStatus::Open
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Permissive coercion
// ---------------------------------------------------------------------------

/// Map a requested verification status onto the allowed set.
///
/// Matching is exact: missing or unknown values, including padded or
/// differently-cased ones, become `Draft` instead of being rejected. Kept in
/// one place so the behavior can be tightened without touching callers.
pub fn coerce_verification_status(requested: Option<&str>) -> VerificationStatus {
    requested
        .and_then(VerificationStatus::parse)
        .unwrap_or(VerificationStatus::Draft)
}

/// Map a requested dispute resolution onto {resolved, rejected}.
///
/// Missing or unknown values (including `open`) become `Resolved`.
pub fn coerce_resolution(requested: Option<&str>) -> DisputeStatus {
    match requested.and_then(DisputeStatus::parse) {
        Some(DisputeStatus::Rejected) => DisputeStatus::Rejected,
        _ => DisputeStatus::Resolved,
    }
}

// ---------------------------------------------------------------------------
// Transition rules
// ---------------------------------------------------------------------------

/// Which way a lock toggle goes given the current lock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockTransition {
    Lock,
    Unlock,
}

pub fn lock_transition(is_locked: bool) -> LockTransition {
    if is_locked {
        LockTransition::Unlock
    } else {
        LockTransition::Lock
    }
}

/// Authorization and lock check for a content edit.
pub fn check_edit_allowed(actor: &ActorContext, is_locked: bool) -> Result<(), CoreError> {
    actor.require_authenticated("edit entries")?;
    if is_locked && !actor.can_bypass_lock() {
        return Err(CoreError::Locked(
            "This page is locked by moderation and cannot be edited right now".into(),
        ));
    }
    Ok(())
}

/// A revision is only recorded when the content actually changes.
pub fn edit_needs_revision(current: &str, proposed: &str) -> bool {
    current != proposed
}

/// Delete is allowed for the entry owner or a superuser.
pub fn check_delete_allowed(actor: &ActorContext, owner: Option<DbId>) -> Result<(), CoreError> {
    if actor.can_manage(owner) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the page creator or a superuser can delete this page".into(),
        ))
    }
}

/// Rollback is allowed for the entry owner or a superuser.
pub fn check_rollback_allowed(actor: &ActorContext, owner: Option<DbId>) -> Result<(), CoreError> {
    if actor.can_manage(owner) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the page creator or a superuser can rollback revisions".into(),
        ))
    }
}

/// Whether a verification status records who verified the entry and when.
pub fn records_verifier(status: VerificationStatus) -> bool {
    status == VerificationStatus::Verified
}

/// Status to write after a dispute is reported, if any change is needed.
pub fn status_after_report(current: VerificationStatus) -> Option<VerificationStatus> {
    if current == VerificationStatus::Disputed {
        None
    } else {
        Some(VerificationStatus::Disputed)
    }
}

/// Status to write after a dispute is closed.
///
/// Once the last open dispute is gone a disputed entry goes back to review;
/// any other status is left alone.
pub fn status_after_resolution(
    current: VerificationStatus,
    remaining_open: i64,
) -> Option<VerificationStatus> {
    if remaining_open == 0 && current == VerificationStatus::Disputed {
        Some(VerificationStatus::UnderReview)
    } else {
        None
    }
}

/// A dispute may only be closed from `open`.
pub fn check_dispute_resolvable(dispute_id: DbId, current: DisputeStatus) -> Result<(), CoreError> {
    if current.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Dispute {dispute_id} is already {current}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
