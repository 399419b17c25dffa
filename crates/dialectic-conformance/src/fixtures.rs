//! Sample arguments and assertion helpers used by the conformance checks.

use std::fmt::Debug;

use dialectic_core::{Argument, ArgumentId, ArgumentStore, Claim, NewArgument, StoreError};

pub fn original() -> NewArgument {
  NewArgument::new("Socrates is mortal", ["Socrates is a man", "All men are mortal"])
}

pub fn updated() -> NewArgument {
  NewArgument::new("Socrates is mortal", ["Socrates is a human", "All men are mortal"])
}

pub fn argument(conclusion: &str) -> NewArgument {
  NewArgument::new(conclusion, ["first premise", "second premise"])
}

/// Save `first`, then apply each of `updates` in turn. Returns the new ID.
pub async fn save_with_updates<S: ArgumentStore>(
  store: &S,
  first: NewArgument,
  updates: impl IntoIterator<Item = NewArgument>,
) -> ArgumentId {
  let id = store.save(first).await.expect("save");
  for update in updates {
    store.update(id, update).await.expect("update");
  }
  id
}

/// Premise order is best-effort across backends, so compare as multisets.
#[track_caller]
pub fn assert_premises_match(expected: &[Claim], actual: &[Claim]) {
  let mut expected = expected.to_vec();
  let mut actual = actual.to_vec();
  expected.sort();
  actual.sort();
  assert_eq!(expected, actual, "premises differ");
}

/// Assert that `actual` is the snapshot of `expected` at `id`/`version`.
#[track_caller]
pub fn assert_snapshot(actual: &Argument, id: ArgumentId, version: u32, expected: &NewArgument) {
  assert_eq!(actual.id, id, "argument id");
  assert_eq!(actual.version, version, "argument version");
  assert_eq!(actual.conclusion, expected.conclusion, "conclusion");
  assert_premises_match(&expected.premises, &actual.premises);
}

/// Assert that `result` failed with the store's not-found error.
#[track_caller]
pub fn assert_not_found<T: Debug, E: StoreError>(result: Result<T, E>, what: &str) {
  match result {
    Err(err) => assert!(err.is_not_found(), "{what}: expected not-found, got {err}"),
    Ok(value) => panic!("{what}: expected not-found, got {value:?}"),
  }
}

/// Assert that `result` failed, but not with a not-found error.
#[track_caller]
pub fn assert_rejected<T: Debug, E: StoreError>(result: Result<T, E>, what: &str) {
  match result {
    Err(err) => assert!(!err.is_not_found(), "{what}: expected rejection, got not-found {err}"),
    Ok(value) => panic!("{what}: expected rejection, got {value:?}"),
  }
}

pub fn ids(arguments: &[Argument]) -> Vec<ArgumentId> { arguments.iter().map(|a| a.id).collect() }
