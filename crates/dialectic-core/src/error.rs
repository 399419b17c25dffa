//! Error types for `dialectic-core`.

use thiserror::Error;

/// A structurally malformed argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("arguments must have a conclusion")]
  MissingConclusion,

  #[error("arguments must have at least 2 premises, got {0}")]
  TooFewPremises(usize),

  #[error("argument premise[{0}] is empty, but must not be")]
  EmptyPremise(usize),
}

#[derive(Debug, Error)]
pub enum Error {
  /// The addressed argument or version does not exist, or was deleted.
  #[error("{0}")]
  NotFound(String),

  #[error("invalid argument: {0}")]
  Invalid(#[from] ValidationError),

  #[error("storage backend error: {0}")]
  Backend(String),
}

impl Error {
  pub fn argument_not_found(id: crate::ArgumentId) -> Self {
    Self::NotFound(format!("argument with id {id} does not exist"))
  }

  pub fn version_not_found(id: crate::ArgumentId, version: crate::VersionNumber) -> Self {
    Self::NotFound(format!("version {version} of argument {id} does not exist"))
  }
}

/// The one distinction every backend error must expose: whether the failure
/// means "no such argument". Everything else is opaque to callers.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
