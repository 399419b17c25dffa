//! The `ArgumentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`dialectic-store-memory`,
//! `dialectic-store-sqlite`). Every backend must pass the shared suite in
//! `dialectic-conformance`, so callers can swap one for another without
//! noticing.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  argument::{Argument, ArgumentId, NewArgument, VersionNumber},
  error::StoreError,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ArgumentStore::fetch_some`]. All filters are optional and
/// combine with AND. They apply to the live version of each argument only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSomeOptions {
  /// Only arguments whose live conclusion is exactly this text.
  pub conclusion:              Option<String>,
  /// Only arguments whose live conclusion contains every one of these terms.
  pub conclusion_contains_all: Vec<String>,
  /// Maximum number of results. `0` means unlimited.
  pub count:                   usize,
  /// Number of matching arguments to skip before collecting results.
  pub offset:                  usize,
  /// Arguments with any of these IDs are never returned.
  pub exclude:                 Vec<ArgumentId>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an argument storage backend.
///
/// Arguments are append-only: [`update`](Self::update) adds a version and
/// never touches existing ones, and [`delete`](Self::delete) only hides the
/// argument. Once deleted, an argument behaves exactly like one that never
/// existed: every operation addressing it fails with a not-found error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes. Dropping a future abandons the operation; a write that was
/// not yet committed leaves no trace.
pub trait ArgumentStore: Send + Sync {
  type Error: StoreError;

  /// Validate and persist a new argument as version 1, returning its fresh ID.
  fn save(
    &self,
    argument: NewArgument,
  ) -> impl Future<Output = Result<ArgumentId, Self::Error>> + Send + '_;

  /// Append a new version to argument `id` and make it live. Returns the new
  /// version number, which is one more than the previous highest.
  ///
  /// Fails with a not-found error if `id` is unknown or deleted; callers should
  /// [`save`](Self::save) instead.
  fn update(
    &self,
    id: ArgumentId,
    argument: NewArgument,
  ) -> impl Future<Output = Result<VersionNumber, Self::Error>> + Send + '_;

  /// Soft-delete an argument and all its versions.
  ///
  /// Fails with a not-found error if the argument does not exist or was
  /// already deleted.
  fn delete(&self, id: ArgumentId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Return the live (most recent) version of an argument.
  fn fetch_live(
    &self,
    id: ArgumentId,
  ) -> impl Future<Output = Result<Argument, Self::Error>> + Send + '_;

  /// Return one specific version of an argument. Deleted arguments hide all
  /// of their versions.
  fn fetch_version(
    &self,
    id: ArgumentId,
    version: VersionNumber,
  ) -> impl Future<Output = Result<Argument, Self::Error>> + Send + '_;

  /// Return the live versions of all arguments matching `options`, in
  /// ascending ID order. No matches is an empty list, never an error.
  fn fetch_some<'a>(
    &'a self,
    options: &'a FetchSomeOptions,
  ) -> impl Future<Output = Result<Vec<Argument>, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn options_deserialize_with_defaults() {
    let opts: FetchSomeOptions =
      serde_json::from_str(r#"{"conclusion_contains_all":["times"],"count":2}"#).unwrap();
    assert_eq!(opts, FetchSomeOptions {
      conclusion_contains_all: vec!["times".into()],
      count: 2,
      ..Default::default()
    });
  }
}
