//! Error type for `dialectic-store-sqlite`.

use dialectic_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] dialectic_core::Error),

  /// The addressed argument or version does not exist, or was deleted.
  #[error("{0}")]
  NotFound(String),

  #[error("{context}: {source}")]
  Database {
    context: String,
    #[source]
    source:  tokio_rusqlite::Error,
  },

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  /// Wrap a database failure with a description of the operation it broke.
  pub(crate) fn database(context: impl Into<String>) -> impl FnOnce(tokio_rusqlite::Error) -> Self {
    let context = context.into();
    move |source| Self::Database { context, source }
  }

  pub(crate) fn argument_not_found(id: dialectic_core::ArgumentId) -> Self {
    Self::NotFound(format!("argument with id {id} does not exist"))
  }

  pub(crate) fn version_not_found(
    id: dialectic_core::ArgumentId,
    version: dialectic_core::VersionNumber,
  ) -> Self {
    Self::NotFound(format!("version {version} of argument {id} does not exist"))
  }
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool {
    match self {
      Self::NotFound(_) => true,
      Self::Core(e) => e.is_not_found(),
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
