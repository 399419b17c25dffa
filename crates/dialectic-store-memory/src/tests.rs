//! Tests for `MemoryStore`.

use dialectic_core::{ArgumentStore, Error, NewArgument};

use crate::MemoryStore;

async fn store() -> MemoryStore { MemoryStore::new() }

dialectic_conformance::conformance_tests!(store);

fn socrates() -> NewArgument {
  NewArgument::new("Socrates is mortal", ["Socrates is a man", "All men are mortal"])
}

#[tokio::test]
async fn identical_claims_are_stored_once() {
  let s = store().await;

  s.save(socrates()).await.unwrap();
  s.save(NewArgument::new("All men are mortal", ["Socrates is mortal", "Socrates is a man"]))
    .await
    .unwrap();

  assert_eq!(s.claim_count().unwrap(), 3);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;

  let first = s.save(socrates()).await.unwrap();
  s.delete(first).await.unwrap();
  let second = s.save(socrates()).await.unwrap();

  assert_eq!(first, 1);
  assert_eq!(second, 2);
}

#[tokio::test]
async fn clones_share_state() {
  let s = store().await;
  let other = s.clone();

  let id = s.save(socrates()).await.unwrap();
  let fetched = other.fetch_live(id).await.unwrap();
  assert_eq!(fetched.conclusion, "Socrates is mortal");
}

#[tokio::test]
async fn not_found_messages_name_the_argument() {
  let s = store().await;

  let err = s.fetch_live(7).await.unwrap_err();
  assert!(matches!(&err, Error::NotFound(msg) if msg == "argument with id 7 does not exist"));

  let id = s.save(socrates()).await.unwrap();
  let err = s.fetch_version(id, 4).await.unwrap_err();
  assert_eq!(err.to_string(), "version 4 of argument 1 does not exist");
}

#[tokio::test]
async fn invalid_input_is_a_validation_error() {
  let s = store().await;
  let err = s.save(NewArgument::new("c", ["lonely"])).await.unwrap_err();
  assert!(matches!(err, Error::Invalid(_)));
}
