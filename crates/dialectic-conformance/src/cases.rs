//! The individual contract checks. Each takes ownership of a fresh, empty
//! store.

use dialectic_core::{ArgumentStore, Claim, FetchSomeOptions, NewArgument};

use crate::fixtures::{
  argument, assert_not_found, assert_premises_match, assert_rejected, assert_snapshot, ids,
  original, save_with_updates, updated,
};

// ─── Save ────────────────────────────────────────────────────────────────────

pub async fn save_then_fetch_live_round_trips<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");

  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 1, &original());

  let first = store.fetch_version(id, 1).await.expect("fetch version 1");
  assert_eq!(first, live);
}

pub async fn save_rejects_malformed_arguments<S: ArgumentStore>(store: S) {
  assert_rejected(store.save(NewArgument::new("", ["a", "b"])).await, "empty conclusion");
  assert_rejected(store.save(NewArgument::new("c", ["a"])).await, "one premise");
  assert_rejected(store.save(NewArgument::new("c", ["a", ""])).await, "empty premise");

  let all = store.fetch_some(&FetchSomeOptions::default()).await.expect("fetch some");
  assert!(all.is_empty(), "rejected arguments must not be stored");
}

pub async fn save_assigns_distinct_ids<S: ArgumentStore>(store: S) {
  let a = store.save(original()).await.expect("save");
  let b = store.save(original()).await.expect("save");
  let c = store.save(updated()).await.expect("save");

  assert!(a >= 1);
  assert!(a < b && b < c, "ids must increase: {a}, {b}, {c}");
}

pub async fn duplicate_premises_are_kept<S: ArgumentStore>(store: S) {
  let repeated = NewArgument::new("p", ["q", "q", "r"]);
  let id = store.save(repeated.clone()).await.expect("save");

  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 1, &repeated);
}

/// Arguments reusing the same claim text must not affect each other.
pub async fn shared_claims_stay_independent<S: ArgumentStore>(store: S) {
  let a = store.save(original()).await.expect("save");
  let b = store
    .save(NewArgument::new("All men are mortal", ["Socrates is mortal", "Socrates is a man"]))
    .await
    .expect("save");

  store.update(a, updated()).await.expect("update");

  let other = store.fetch_live(b).await.expect("fetch live");
  assert_eq!(other.version, 1);
  assert_eq!(other.conclusion, "All men are mortal");
  assert_premises_match(
    &[Claim::from("Socrates is mortal"), Claim::from("Socrates is a man")],
    &other.premises,
  );
}

// ─── Update ──────────────────────────────────────────────────────────────────

pub async fn update_makes_new_version_live<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");
  let version = store.update(id, updated()).await.expect("update");
  assert_eq!(version, 2);

  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 2, &updated());
}

pub async fn update_returns_incrementing_versions<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");
  for expected in 2..=5 {
    let version = store.update(id, updated()).await.expect("update");
    assert_eq!(version, expected);
  }
  assert_eq!(store.fetch_live(id).await.expect("fetch live").version, 5);
}

pub async fn historical_versions_remain_fetchable<S: ArgumentStore>(store: S) {
  let history: Vec<NewArgument> = (1..=4)
    .map(|n| NewArgument::new(format!("conclusion {n}"), [format!("premise {n}a"), format!("premise {n}b")]))
    .collect();

  let id = save_with_updates(&store, history[0].clone(), history[1..].iter().cloned()).await;

  for (index, expected) in history.iter().enumerate() {
    let version = index as u32 + 1;
    let fetched = store.fetch_version(id, version).await.expect("fetch version");
    assert_snapshot(&fetched, id, version, expected);
  }
  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 4, &history[3]);
}

/// Reapplying an old snapshot appends a copy; history is never rewound.
pub async fn old_version_can_be_reapplied<S: ArgumentStore>(store: S) {
  let id = save_with_updates(&store, original(), [updated()]).await;

  let first = store.fetch_version(id, 1).await.expect("fetch version 1");
  let version = store.update(id, first.into_new()).await.expect("update");
  assert_eq!(version, 3);

  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 3, &original());
  let second = store.fetch_version(id, 2).await.expect("fetch version 2");
  assert_snapshot(&second, id, 2, &updated());
}

pub async fn update_rejects_malformed_arguments<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");

  assert_rejected(store.update(id, NewArgument::new("c", ["only one"])).await, "one premise");
  assert_rejected(store.update(id, NewArgument::new("", ["a", "b"])).await, "empty conclusion");

  let live = store.fetch_live(id).await.expect("fetch live");
  assert_snapshot(&live, id, 1, &original());
}

pub async fn update_unknown_is_not_found<S: ArgumentStore>(store: S) {
  assert_not_found(store.update(1, updated()).await, "update of unknown argument");
}

pub async fn update_deleted_is_not_found<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");
  store.delete(id).await.expect("delete");
  assert_not_found(store.update(id, updated()).await, "update of deleted argument");
}

// ─── Fetch ───────────────────────────────────────────────────────────────────

pub async fn fetch_unknown_is_not_found<S: ArgumentStore>(store: S) {
  assert_not_found(store.fetch_live(1).await, "fetch live of unknown argument");
  assert_not_found(store.fetch_version(1, 1).await, "fetch version of unknown argument");
  assert_not_found(store.fetch_live(0).await, "fetch live of id 0");
  assert_not_found(store.fetch_live(-3).await, "fetch live of negative id");
}

pub async fn fetch_missing_version_is_not_found<S: ArgumentStore>(store: S) {
  let id = save_with_updates(&store, original(), [updated()]).await;
  assert_not_found(store.fetch_version(id, 0).await, "version 0");
  assert_not_found(store.fetch_version(id, 3).await, "version past the newest");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

pub async fn delete_hides_live_and_history<S: ArgumentStore>(store: S) {
  let id = save_with_updates(&store, original(), [updated()]).await;
  store.delete(id).await.expect("delete");

  assert_not_found(store.fetch_live(id).await, "fetch live after delete");
  assert_not_found(store.fetch_version(id, 1).await, "fetch version 1 after delete");
  assert_not_found(store.fetch_version(id, 2).await, "fetch version 2 after delete");
}

pub async fn delete_unknown_is_not_found<S: ArgumentStore>(store: S) {
  assert_not_found(store.delete(1).await, "delete of unknown argument");
}

pub async fn double_delete_is_not_found<S: ArgumentStore>(store: S) {
  let id = store.save(original()).await.expect("save");
  store.delete(id).await.expect("first delete");
  assert_not_found(store.delete(id).await, "second delete");
}

pub async fn delete_leaves_other_arguments_alone<S: ArgumentStore>(store: S) {
  let doomed = store.save(original()).await.expect("save");
  let kept = store.save(updated()).await.expect("save");
  store.delete(doomed).await.expect("delete");

  let live = store.fetch_live(kept).await.expect("fetch live");
  assert_snapshot(&live, kept, 1, &updated());
}

// ─── FetchSome ───────────────────────────────────────────────────────────────

pub async fn fetch_some_empty_store<S: ArgumentStore>(store: S) {
  let found = store.fetch_some(&FetchSomeOptions::default()).await.expect("fetch some");
  assert!(found.is_empty());

  let filtered = FetchSomeOptions { conclusion: Some("nothing".into()), ..Default::default() };
  let found = store.fetch_some(&filtered).await.expect("fetch some");
  assert!(found.is_empty());
}

pub async fn fetch_some_by_conclusion<S: ArgumentStore>(store: S) {
  let first = store.save(original()).await.expect("save");
  store.save(argument("some other conclusion")).await.expect("save");
  let second = store.save(updated()).await.expect("save");

  let options = FetchSomeOptions { conclusion: Some("Socrates is mortal".into()), ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");

  assert_eq!(ids(&found), [first, second]);
  assert_snapshot(&found[0], first, 1, &original());
  assert_snapshot(&found[1], second, 1, &updated());
}

pub async fn fetch_some_uses_live_versions<S: ArgumentStore>(store: S) {
  let id = save_with_updates(&store, original(), [updated()]).await;
  let renamed = save_with_updates(&store, original(), [argument("a new conclusion")]).await;

  let options = FetchSomeOptions { conclusion: Some("Socrates is mortal".into()), ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(found.len(), 1);
  assert_snapshot(&found[0], id, 2, &updated());

  let options = FetchSomeOptions { conclusion: Some("a new conclusion".into()), ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [renamed]);
  assert_eq!(found[0].version, 2);
}

pub async fn fetch_some_contains_all<S: ArgumentStore>(store: S) {
  let a = store.save(argument("These are the best of times")).await.expect("save");
  store.save(argument("An unrelated claim")).await.expect("save");
  let c = store.save(argument("These are the worst of times")).await.expect("save");

  let options = FetchSomeOptions {
    conclusion_contains_all: vec!["times".into()],
    ..Default::default()
  };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [a, c]);

  let options = FetchSomeOptions {
    conclusion_contains_all: vec!["times".into(), "best".into()],
    ..Default::default()
  };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [a]);
  assert_eq!(found[0].conclusion, "These are the best of times");
}

pub async fn fetch_some_count<S: ArgumentStore>(store: S) {
  let first = store.save(argument("one")).await.expect("save");
  let second = store.save(argument("two")).await.expect("save");
  store.save(argument("three")).await.expect("save");

  let options = FetchSomeOptions { count: 2, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [first, second]);

  let options = FetchSomeOptions { count: 10, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(found.len(), 3);
}

pub async fn fetch_some_offset<S: ArgumentStore>(store: S) {
  store.save(argument("one")).await.expect("save");
  let second = store.save(argument("two")).await.expect("save");
  let third = store.save(argument("three")).await.expect("save");

  let options = FetchSomeOptions { offset: 1, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [second, third]);

  let options = FetchSomeOptions { offset: 3, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert!(found.is_empty());
}

pub async fn fetch_some_offset_and_count<S: ArgumentStore>(store: S) {
  store.save(argument("one")).await.expect("save");
  let second = store.save(argument("two")).await.expect("save");
  store.save(argument("three")).await.expect("save");

  let options = FetchSomeOptions { offset: 1, count: 1, ..Default::default() };
  for _ in 0..3 {
    let found = store.fetch_some(&options).await.expect("fetch some");
    assert_eq!(ids(&found), [second]);
  }
}

pub async fn fetch_some_exclude<S: ArgumentStore>(store: S) {
  let first = store.save(argument("one")).await.expect("save");
  let second = store.save(argument("two")).await.expect("save");
  let third = store.save(argument("three")).await.expect("save");

  let options = FetchSomeOptions { exclude: vec![second], ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [first, third]);

  let options = FetchSomeOptions { exclude: vec![first, second, third], ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert!(found.is_empty());
}

pub async fn fetch_some_combined_filters<S: ArgumentStore>(store: S) {
  let mut matching = Vec::new();
  for n in 0..5 {
    matching.push(store.save(argument("the times they are a-changin")).await.expect("save"));
    store.save(argument(&format!("filler {n}"))).await.expect("save");
  }

  // Exclusion happens before the offset is applied.
  let options = FetchSomeOptions {
    conclusion:              Some("the times they are a-changin".into()),
    conclusion_contains_all: vec!["times".into(), "changin".into()],
    exclude:                 vec![matching[0]],
    offset:                  1,
    count:                   2,
  };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [matching[2], matching[3]]);
  assert!(found.iter().all(|a| a.conclusion == "the times they are a-changin"));
}

pub async fn fetch_some_offset_past_end_is_empty<S: ArgumentStore>(store: S) {
  store.save(original()).await.expect("save");
  store.save(updated()).await.expect("save");

  let options = FetchSomeOptions { offset: usize::MAX, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert!(found.is_empty(), "offset beyond every match must skip them all");

  let options = FetchSomeOptions {
    offset: (i64::MAX as usize).saturating_add(2),
    count: 1,
    ..Default::default()
  };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert!(found.is_empty());
}

pub async fn fetch_some_omits_deleted<S: ArgumentStore>(store: S) {
  let first = store.save(original()).await.expect("save");
  let doomed = store.save(original()).await.expect("save");
  let third = store.save(original()).await.expect("save");
  store.delete(doomed).await.expect("delete");

  let found = store.fetch_some(&FetchSomeOptions::default()).await.expect("fetch some");
  assert_eq!(ids(&found), [first, third]);

  // The deleted argument must not count towards the offset either.
  let options = FetchSomeOptions { offset: 1, ..Default::default() };
  let found = store.fetch_some(&options).await.expect("fetch some");
  assert_eq!(ids(&found), [third]);
}

pub async fn fetch_some_orders_by_id<S: ArgumentStore>(store: S) {
  let mut saved = Vec::new();
  for n in 0..6 {
    saved.push(store.save(argument(&format!("conclusion {n}"))).await.expect("save"));
  }
  // Updating older arguments must not move them in the ordering.
  store.update(saved[0], argument("conclusion 0, revised")).await.expect("update");
  store.update(saved[3], argument("conclusion 3, revised")).await.expect("update");

  let found = store.fetch_some(&FetchSomeOptions::default()).await.expect("fetch some");
  assert_eq!(ids(&found), saved);
  assert_eq!(found[0].version, 2);
  assert_eq!(found[3].conclusion, "conclusion 3, revised");
}
