//! Workflow tests for locking, verification and disputes.

mod common;

use assert_matches::assert_matches;
use folio_api::error::AppError;
use folio_api::workflow;
use folio_core::actor::ActorContext;
use folio_core::error::CoreError;
use folio_core::moderation::LockTransition;
use folio_db::models::dispute::{ReportDispute, ResolveDispute};
use folio_db::models::entry::{CreateEntry, EditEntry, Entry, SetVerification};
use folio_db::repositories::{AuditLogRepo, DisputeRepo, EntryRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, actor: &ActorContext, title: &str) -> Entry {
    workflow::create_entry(
        pool,
        actor,
        &CreateEntry {
            title: Some(title.to_string()),
            content: Some(format!("About {title}")),
        },
    )
    .await
    .unwrap()
}

fn edit(content: &str) -> EditEntry {
    EditEntry {
        content: Some(content.to_string()),
        edit_summary: None,
    }
}

fn report(message: &str) -> ReportDispute {
    ReportDispute {
        message: Some(message.to_string()),
    }
}

fn resolve(resolution: &str) -> ResolveDispute {
    ResolveDispute {
        resolution: Some(resolution.to_string()),
        resolution_note: Some("checked".to_string()),
    }
}

fn verification(status: &str) -> SetVerification {
    SetVerification {
        verification_status: Some(status.to_string()),
        verification_note: None,
    }
}

async fn status_of(pool: &PgPool, title: &str) -> String {
    EntryRepo::find_by_title(pool, title)
        .await
        .unwrap()
        .unwrap()
        .verification_status
}

// ---------------------------------------------------------------------------
// Locking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locked_entry_blocks_editor_until_unlocked(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Policy").await;

    let outcome = workflow::lock_entry(&pool, &admin.actor, "Policy", Some("vandalism"))
        .await
        .unwrap();
    assert!(outcome.entry.is_locked);
    assert_eq!(outcome.entry.lock_reason, "vandalism");
    assert_eq!(outcome.entry.locked_by, Some(admin.id));
    assert!(outcome.entry.locked_at.is_some());

    let err = workflow::edit_entry(&pool, &alice.actor, "Policy", &edit("changed"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Locked(_)));
    assert_eq!(
        EntryRepo::find_by_title(&pool, "Policy").await.unwrap().unwrap().content,
        "About Policy"
    );

    let outcome = workflow::unlock_entry(&pool, &admin.actor, "Policy").await.unwrap();
    assert!(!outcome.entry.is_locked);
    assert_eq!(outcome.entry.lock_reason, "");
    assert!(outcome.entry.locked_by.is_none());
    assert!(outcome.entry.locked_at.is_none());

    let outcome = workflow::edit_entry(&pool, &alice.actor, "Policy", &edit("changed"))
        .await
        .unwrap();
    assert_eq!(outcome.entry.content, "changed");

    let logs = AuditLogRepo::list_for_title(&pool, "Policy").await.unwrap();
    let actions: Vec<_> = logs.iter().map(|l| l.action.as_str()).collect();
    assert_eq!(actions, vec!["edit", "unlock", "lock", "create"]);
    assert_eq!(logs[1].details, "Unlocked entry");
    assert_eq!(logs[2].details, "vandalism");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_superuser_edits_through_lock(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Guarded").await;
    workflow::lock_entry(&pool, &admin.actor, "Guarded", None).await.unwrap();

    let outcome = workflow::edit_entry(&pool, &admin.actor, "Guarded", &edit("fixed"))
        .await
        .unwrap();
    assert_eq!(outcome.entry.content, "fixed");
    assert!(outcome.entry.is_locked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_lock_flips_state(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Toggle").await;

    let first = workflow::toggle_lock(&pool, &admin.actor, "Toggle", None).await.unwrap();
    assert_eq!(first.transition, LockTransition::Lock);
    assert!(first.entry.is_locked);

    let second = workflow::toggle_lock(&pool, &admin.actor, "toggle", Some("ignored"))
        .await
        .unwrap();
    assert_eq!(second.transition, LockTransition::Unlock);
    assert!(!second.entry.is_locked);

    let logs = AuditLogRepo::list_for_title(&pool, "Toggle").await.unwrap();
    assert_eq!(logs[0].action, "unlock");
    assert_eq!(logs[1].action, "lock");
    assert_eq!(logs[1].details, "Locked entry");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_on_locked_entry_is_noop(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Steady").await;

    let first = workflow::lock_entry(&pool, &admin.actor, "Steady", Some("first"))
        .await
        .unwrap();
    let second = workflow::lock_entry(&pool, &admin.actor, "Steady", Some("second"))
        .await
        .unwrap();

    assert!(second.entry.is_locked);
    assert_eq!(second.entry.lock_reason, "first");
    assert_eq!(second.entry.locked_at, first.entry.locked_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_requires_superuser(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    create(&pool, &alice.actor, "Mine").await;

    let err = workflow::toggle_lock(&pool, &alice.actor, "Mine", None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    assert!(!EntryRepo::find_by_title(&pool, "Mine").await.unwrap().unwrap().is_locked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_reason_too_long_is_rejected(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Verbose").await;

    let reason = "r".repeat(256);
    let err = workflow::lock_entry(&pool, &admin.actor, "Verbose", Some(&reason))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verified_records_verifier_and_other_statuses_clear_it(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Facts").await;

    let entry = workflow::set_verification(
        &pool,
        &admin.actor,
        "Facts",
        &SetVerification {
            verification_status: Some("verified".into()),
            verification_note: Some("  sourced  ".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(entry.verification_status, "verified");
    assert_eq!(entry.verification_note, "sourced");
    assert_eq!(entry.verified_by, Some(admin.id));
    assert!(entry.verified_at.is_some());

    let entry = workflow::set_verification(&pool, &admin.actor, "Facts", &verification("under_review"))
        .await
        .unwrap();
    assert_eq!(entry.verification_status, "under_review");
    assert!(entry.verified_by.is_none());
    assert!(entry.verified_at.is_none());

    let logs = AuditLogRepo::list_for_title(&pool, "Facts").await.unwrap();
    assert_eq!(logs[0].action, "verify");
    assert_eq!(logs[0].details, "Status set to under_review");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_verification_status_becomes_draft(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Loose").await;
    workflow::set_verification(&pool, &admin.actor, "Loose", &verification("verified"))
        .await
        .unwrap();

    let entry = workflow::set_verification(&pool, &admin.actor, "Loose", &verification("approved"))
        .await
        .unwrap();
    assert_eq!(entry.verification_status, "draft");
    assert!(entry.verified_by.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verification_requires_superuser(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    create(&pool, &alice.actor, "Claim").await;

    let err = workflow::set_verification(&pool, &alice.actor, "Claim", &verification("verified"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    assert_eq!(status_of(&pool, "Claim").await, "draft");
}

// ---------------------------------------------------------------------------
// Disputes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dispute_lifecycle_returns_entry_to_review(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let bob = common::create_editor(&pool, "bob").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Beta").await;
    workflow::set_verification(&pool, &admin.actor, "Beta", &verification("verified"))
        .await
        .unwrap();

    let first = workflow::report_dispute(&pool, &bob.actor, "Beta", &report("wrong date"))
        .await
        .unwrap();
    assert_eq!(first.entry.verification_status, "disputed");
    assert_eq!(first.dispute.status, "open");
    assert_eq!(first.dispute.reported_by, Some(bob.id));

    let second = workflow::report_dispute(&pool, &alice.actor, "Beta", &report("bad source"))
        .await
        .unwrap();
    assert_eq!(second.entry.verification_status, "disputed");
    assert_ne!(first.dispute.id, second.dispute.id);
    assert_eq!(
        DisputeRepo::count_open_for(&pool, first.entry.id).await.unwrap(),
        2
    );

    // One dispute still open: status stays disputed.
    let outcome = workflow::resolve_dispute(&pool, &admin.actor, first.dispute.id, &resolve("rejected"))
        .await
        .unwrap();
    assert_eq!(outcome.dispute.status, "rejected");
    assert_eq!(outcome.dispute.resolved_by, Some(admin.id));
    assert_eq!(outcome.dispute.resolution_note, "checked");
    assert!(outcome.dispute.resolved_at.is_some());
    assert_eq!(outcome.entry.verification_status, "disputed");

    // Last one closes: back to review.
    let outcome = workflow::resolve_dispute(&pool, &admin.actor, second.dispute.id, &resolve("resolved"))
        .await
        .unwrap();
    assert_eq!(outcome.entry.verification_status, "under_review");
    assert_eq!(status_of(&pool, "Beta").await, "under_review");

    let logs = AuditLogRepo::list_for_title(&pool, "Beta").await.unwrap();
    assert_eq!(logs[0].action, "dispute_resolved");
    assert_eq!(
        logs[0].details,
        format!("Dispute {} marked resolved", second.dispute.id)
    );
    assert_eq!(logs[2].action, "dispute_reported");
    assert_eq!(logs[2].details, "Dispute reported");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolving_closed_dispute_conflicts(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Twice").await;
    let reported = workflow::report_dispute(&pool, &alice.actor, "Twice", &report("typo"))
        .await
        .unwrap();

    workflow::resolve_dispute(&pool, &admin.actor, reported.dispute.id, &resolve("resolved"))
        .await
        .unwrap();
    let err = workflow::resolve_dispute(&pool, &admin.actor, reported.dispute.id, &resolve("rejected"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));

    let stored = DisputeRepo::find_by_id(&pool, reported.dispute.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "resolved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_resolution_becomes_resolved(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Vague").await;
    let reported = workflow::report_dispute(&pool, &alice.actor, "Vague", &report("hmm"))
        .await
        .unwrap();

    let outcome = workflow::resolve_dispute(&pool, &admin.actor, reported.dispute.id, &resolve("open"))
        .await
        .unwrap();
    assert_eq!(outcome.dispute.status, "resolved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolution_leaves_non_disputed_status_alone(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    let admin = common::create_admin(&pool, "root").await;
    create(&pool, &alice.actor, "Overridden").await;
    let reported = workflow::report_dispute(&pool, &alice.actor, "Overridden", &report("old"))
        .await
        .unwrap();
    // A moderator sets the status directly while the dispute is open.
    workflow::set_verification(&pool, &admin.actor, "Overridden", &verification("verified"))
        .await
        .unwrap();

    let outcome = workflow::resolve_dispute(&pool, &admin.actor, reported.dispute.id, &resolve("resolved"))
        .await
        .unwrap();
    assert_eq!(outcome.entry.verification_status, "verified");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_requires_superuser(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    create(&pool, &alice.actor, "Self").await;
    let reported = workflow::report_dispute(&pool, &alice.actor, "Self", &report("x"))
        .await
        .unwrap();

    let err = workflow::resolve_dispute(&pool, &alice.actor, reported.dispute.id, &resolve("resolved"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_missing_dispute_is_not_found(pool: PgPool) {
    let admin = common::create_admin(&pool, "root").await;

    let err = workflow::resolve_dispute(&pool, &admin.actor, 424242, &resolve("resolved"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Dispute", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_validation(pool: PgPool) {
    let alice = common::create_editor(&pool, "alice").await;
    create(&pool, &alice.actor, "Gamma").await;

    let err = workflow::report_dispute(&pool, &alice.actor, "Gamma", &report("   "))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));

    let err = workflow::report_dispute(&pool, &ActorContext::anonymous(), "Gamma", &report("x"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));

    let err = workflow::report_dispute(&pool, &alice.actor, "Nope", &report("x"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));

    assert_eq!(status_of(&pool, "Gamma").await, "draft");
    assert_eq!(DisputeRepo::count_open(&pool).await.unwrap(), 0);
}
