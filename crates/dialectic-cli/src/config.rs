//! Runtime configuration, layered from an optional TOML file and
//! `DIALECTIC_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Which [`ArgumentStore`](dialectic_core::ArgumentStore) implementation to
/// open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// Process memory. Nothing persists between runs; for development only.
  Memory,
  #[default]
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
  pub backend: Backend,
  /// SQLite database file. A leading `~/` is expanded.
  pub path:    PathBuf,
}

impl Default for StoreConfig {
  fn default() -> Self { Self { backend: Backend::Sqlite, path: PathBuf::from("dialectic.db") } }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub store: StoreConfig,
}

impl Config {
  /// Read `path` if it exists, then apply overrides such as
  /// `DIALECTIC_STORE__BACKEND=memory`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("DIALECTIC")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise Config")
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store.path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_uses_defaults() {
    let cfg = Config::load(Path::new("/nonexistent/dialectic.toml")).unwrap();
    assert_eq!(cfg.store.backend, Backend::Sqlite);
    assert_eq!(cfg.store.path, PathBuf::from("dialectic.db"));
  }

  #[test]
  fn file_selects_backend() {
    let path = write_temp("dialectic-config", "[store]\nbackend = \"memory\"\n");
    let cfg = Config::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.store.backend, Backend::Memory);
    assert_eq!(cfg.store.path, PathBuf::from("dialectic.db"));
  }

  #[test]
  fn unknown_backend_is_rejected() {
    let path = write_temp("dialectic-bad-config", "[store]\nbackend = \"postgres\"\n");
    let result = Config::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
  }

  #[test]
  fn plain_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("/var/lib/d.db")), PathBuf::from("/var/lib/d.db"));
  }
}
