//! Integration tests for the revision log.

use folio_db::repositories::{EntryRepo, RevisionRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revisions_list_newest_first(pool: PgPool) {
    let entry = EntryRepo::create(&pool, "History", "v3", None).await.unwrap();
    let first = RevisionRepo::append(&pool, entry.id, "v1", None, "one")
        .await
        .unwrap();
    let second = RevisionRepo::append(&pool, entry.id, "v2", None, "two")
        .await
        .unwrap();

    let list = RevisionRepo::list_for(&pool, entry.id).await.unwrap();
    let ids: Vec<_> = list.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(list[1].content, "v1");
    assert_eq!(list[1].edit_summary, "one");
    assert_eq!(RevisionRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_for_entry_checks_ownership(pool: PgPool) {
    let a = EntryRepo::create(&pool, "A", "a", None).await.unwrap();
    let b = EntryRepo::create(&pool, "B", "b", None).await.unwrap();
    let rev = RevisionRepo::append(&pool, a.id, "a0", None, "").await.unwrap();

    assert!(RevisionRepo::find_for_entry(&pool, a.id, rev.id)
        .await
        .unwrap()
        .is_some());
    assert!(RevisionRepo::find_for_entry(&pool, b.id, rev.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlong_summary_rejected(pool: PgPool) {
    let entry = EntryRepo::create(&pool, "Long", "x", None).await.unwrap();
    let summary = "s".repeat(256);

    let result = RevisionRepo::append(&pool, entry.id, "x", None, &summary).await;
    assert!(result.is_err());
}
