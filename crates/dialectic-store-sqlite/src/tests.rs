//! Integration tests for `SqliteStore` against an in-memory database.

use dialectic_core::{ArgumentStore, FetchSomeOptions, NewArgument, StoreError};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

dialectic_conformance::conformance_tests!(store);

fn socrates() -> NewArgument {
  NewArgument::new("Socrates is mortal", ["Socrates is a man", "All men are mortal"])
}

// ─── Claims ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_claims_share_one_row() {
  let s = store().await;

  s.save(socrates()).await.unwrap();
  s.save(socrates()).await.unwrap();
  s.save(NewArgument::new("All men are mortal", ["Socrates is mortal", "Socrates is a man"]))
    .await
    .unwrap();

  assert_eq!(s.claim_count().await.unwrap(), 3);
}

#[tokio::test]
async fn repeated_premise_is_one_claim() {
  let s = store().await;

  let id = s.save(NewArgument::new("p", ["q", "q"])).await.unwrap();
  assert_eq!(s.claim_count().await.unwrap(), 2);

  let live = s.fetch_live(id).await.unwrap();
  assert_eq!(live.premises, ["q", "q"]);
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn premise_order_is_preserved() {
  let s = store().await;
  let premises = ["zeta", "alpha", "mu", "beta"];

  let id = s.save(NewArgument::new("ordered", premises)).await.unwrap();
  assert_eq!(s.fetch_live(id).await.unwrap().premises, premises);

  s.update(id, NewArgument::new("ordered", ["omega", "delta"])).await.unwrap();
  assert_eq!(s.fetch_version(id, 1).await.unwrap().premises, premises);

  let listed = s.fetch_some(&FetchSomeOptions::default()).await.unwrap();
  assert_eq!(listed[0].premises, ["omega", "delta"]);
}

// ─── Soft delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_records_timestamp() {
  let s = store().await;
  let id = s.save(socrates()).await.unwrap();

  assert!(s.deleted_at(id).await.unwrap().is_none());

  let before = chrono::Utc::now();
  s.delete(id).await.unwrap();
  let at = s.deleted_at(id).await.unwrap().expect("deleted_at set");
  assert!(at >= before);
}

#[tokio::test]
async fn double_delete_keeps_first_timestamp() {
  let s = store().await;
  let id = s.save(socrates()).await.unwrap();

  s.delete(id).await.unwrap();
  let first = s.deleted_at(id).await.unwrap();
  assert!(s.delete(id).await.unwrap_err().is_not_found());
  assert_eq!(s.deleted_at(id).await.unwrap(), first);
}

#[tokio::test]
async fn deleted_at_unknown_is_not_found() {
  let s = store().await;
  let err = s.deleted_at(42).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;

  let first = s.save(socrates()).await.unwrap();
  s.delete(first).await.unwrap();
  let second = s.save(socrates()).await.unwrap();
  assert!(second > first);
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_update_leaves_no_new_claims() {
  let s = store().await;
  let id = s.save(socrates()).await.unwrap();
  s.delete(id).await.unwrap();

  let before = s.claim_count().await.unwrap();
  let err = s
    .update(id, NewArgument::new("brand new", ["never", "stored"]))
    .await
    .unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(s.claim_count().await.unwrap(), before);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_database() {
  let s = store().await;
  let err = s.save(NewArgument::new("c", ["a", ""])).await.unwrap_err();

  assert!(matches!(err, Error::Core(dialectic_core::Error::Invalid(_))));
  assert!(!err.is_not_found());
  assert_eq!(s.claim_count().await.unwrap(), 0);
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let path = std::env::temp_dir().join(format!("dialectic-reopen-{}.db", std::process::id()));
  let _ = std::fs::remove_file(&path);

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let id = s.save(socrates()).await.unwrap();
    s.update(id, NewArgument::new("Socrates is mortal", ["Socrates is a human", "All men are mortal"]))
      .await
      .unwrap();
    id
  };

  // Schema initialisation runs again and must not disturb existing rows.
  let s = SqliteStore::open(&path).await.unwrap();
  let live = s.fetch_live(id).await.unwrap();
  assert_eq!(live.version, 2);
  assert_eq!(live.premises, ["Socrates is a human", "All men are mortal"]);

  drop(s);
  let _ = std::fs::remove_file(&path);
}
