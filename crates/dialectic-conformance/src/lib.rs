//! Behavioural test suite shared by every Dialectic storage backend.
//!
//! Each check in [`cases`] takes a fresh, empty store and panics if the store
//! breaks the [`ArgumentStore`](dialectic_core::ArgumentStore) contract. A
//! backend wires the whole suite into its own tests with one macro call:
//!
//! ```rust,ignore
//! async fn store() -> SqliteStore {
//!   SqliteStore::open_in_memory().await.expect("in-memory store")
//! }
//!
//! dialectic_conformance::conformance_tests!(store);
//! ```
//!
//! The invoking crate needs `tokio` as a dev-dependency.

pub mod cases;
pub mod fixtures;

/// Expand to a `conformance` module holding one `#[tokio::test]` per check in
/// [`cases`], each fed a fresh store from the async factory fn `$factory`.
#[macro_export]
macro_rules! conformance_tests {
  ($factory:ident) => {
    $crate::conformance_tests!(@cases $factory;
      save_then_fetch_live_round_trips,
      save_rejects_malformed_arguments,
      save_assigns_distinct_ids,
      duplicate_premises_are_kept,
      shared_claims_stay_independent,
      update_makes_new_version_live,
      update_returns_incrementing_versions,
      historical_versions_remain_fetchable,
      old_version_can_be_reapplied,
      update_rejects_malformed_arguments,
      update_unknown_is_not_found,
      update_deleted_is_not_found,
      fetch_unknown_is_not_found,
      fetch_missing_version_is_not_found,
      delete_hides_live_and_history,
      delete_unknown_is_not_found,
      double_delete_is_not_found,
      delete_leaves_other_arguments_alone,
      fetch_some_empty_store,
      fetch_some_by_conclusion,
      fetch_some_uses_live_versions,
      fetch_some_contains_all,
      fetch_some_count,
      fetch_some_offset,
      fetch_some_offset_and_count,
      fetch_some_offset_past_end_is_empty,
      fetch_some_exclude,
      fetch_some_combined_filters,
      fetch_some_omits_deleted,
      fetch_some_orders_by_id,
    );
  };
  (@cases $factory:ident; $($case:ident),* $(,)?) => {
    mod conformance {
      $(
        #[tokio::test]
        async fn $case() { $crate::cases::$case(super::$factory().await).await; }
      )*
    }
  };
}
