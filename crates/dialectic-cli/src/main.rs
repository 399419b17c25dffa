//! `dialectic` — command-line access to an argument store.
//!
//! Reads `dialectic.toml` (or the path given with `--config`), opens the
//! configured backend, runs one operation and prints the result as JSON.
//!
//! # Usage
//!
//! ```text
//! dialectic save -c "Socrates is mortal" -p "Socrates is a man" -p "All men are mortal"
//! dialectic update 1 -c "Socrates is mortal" -p "Socrates is a human" -p "All men are mortal"
//! dialectic show 1 --version 1
//! dialectic list --search mortal --count 10
//! dialectic delete 1
//! ```

mod config;

use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use clap::{Args, Parser, Subcommand};
use dialectic_core::{
  ArgumentId, ArgumentStore, FetchSomeOptions, NewArgument, StoreError, VersionNumber,
};
use dialectic_store_memory::MemoryStore;
use dialectic_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use config::{Backend, Config};

#[derive(Parser)]
#[command(author, version, about = "Versioned argument store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "dialectic.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

/// Conclusion and premises shared by `save` and `update`.
#[derive(Args)]
struct ArgumentArgs {
  #[arg(short, long)]
  conclusion: String,

  /// A premise; repeat for each one (at least two).
  #[arg(short = 'p', long = "premise", required = true)]
  premises: Vec<String>,
}

impl ArgumentArgs {
  fn into_argument(self) -> anyhow::Result<NewArgument> {
    let argument = NewArgument::new(self.conclusion, self.premises);
    argument.validate()?;
    Ok(argument)
  }
}

#[derive(Subcommand)]
enum Command {
  /// Store a new argument and print its id.
  Save(ArgumentArgs),

  /// Add a new version to an existing argument and print the version number.
  Update {
    id:       ArgumentId,
    #[command(flatten)]
    argument: ArgumentArgs,
  },

  /// Delete an argument and hide all of its versions.
  Delete { id: ArgumentId },

  /// Print the live version of an argument, or a specific one.
  Show {
    id:      ArgumentId,
    #[arg(long)]
    version: Option<VersionNumber>,
  },

  /// List live arguments in id order.
  List {
    /// Only arguments with exactly this conclusion.
    #[arg(long)]
    conclusion: Option<String>,

    /// Only conclusions containing this text; repeat to require several.
    #[arg(long = "search")]
    search: Vec<String>,

    /// Maximum number of results (0 for no limit).
    #[arg(long, default_value_t = 0)]
    count: usize,

    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Never return this id; repeatable.
    #[arg(long)]
    exclude: Vec<ArgumentId>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays machine-readable.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = Config::load(&cli.config)?;

  let output = match cfg.store.backend {
    Backend::Memory => {
      tracing::warn!("using the memory backend; nothing will be persisted");
      run(&MemoryStore::new(), cli.command).await?
    }
    Backend::Sqlite => {
      let path = cfg.store_path();
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::debug!(?path, "opened sqlite store");
      run(&store, cli.command).await?
    }
  };

  if let Some(output) = output {
    println!("{}", serde_json::to_string_pretty(&output)?);
  }
  Ok(())
}

/// Keep "not found" recognisable in the top-level error report.
fn store_error<E: StoreError>(err: E) -> anyhow::Error {
  if err.is_not_found() { anyhow!("not found: {err}") } else { anyhow::Error::new(err) }
}

/// Execute `command` against `store`. Returns the JSON to print, if any.
async fn run<S: ArgumentStore>(store: &S, command: Command) -> anyhow::Result<Option<Value>> {
  let output = match command {
    Command::Save(args) => {
      let id = store.save(args.into_argument()?).await.map_err(store_error)?;
      tracing::info!(argument_id = id, "saved argument");
      json!({ "id": id })
    }
    Command::Update { id, argument } => {
      let version = store
        .update(id, argument.into_argument()?)
        .await
        .map_err(store_error)?;
      tracing::info!(argument_id = id, version, "updated argument");
      json!({ "version": version })
    }
    Command::Delete { id } => {
      store.delete(id).await.map_err(store_error)?;
      tracing::info!(argument_id = id, "deleted argument");
      return Ok(None);
    }
    Command::Show { id, version } => {
      let argument = match version {
        Some(version) => store.fetch_version(id, version).await,
        None => store.fetch_live(id).await,
      }
      .map_err(store_error)?;
      serde_json::to_value(argument)?
    }
    Command::List { conclusion, search, count, offset, exclude } => {
      let options = FetchSomeOptions {
        conclusion,
        conclusion_contains_all: search,
        count,
        offset,
        exclude,
      };
      let arguments = store.fetch_some(&options).await.map_err(store_error)?;
      json!({ "arguments": arguments })
    }
  };
  Ok(Some(output))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn socrates(premise: &str) -> ArgumentArgs {
    ArgumentArgs {
      conclusion: "Socrates is mortal".into(),
      premises:   vec![premise.into(), "All men are mortal".into()],
    }
  }

  #[tokio::test]
  async fn save_and_update_print_their_numbers() {
    let store = MemoryStore::new();

    let saved = run(&store, Command::Save(socrates("Socrates is a man"))).await.unwrap();
    assert_eq!(saved, Some(json!({ "id": 1 })));

    let command = Command::Update { id: 1, argument: socrates("Socrates is a human") };
    let updated = run(&store, command).await.unwrap();
    assert_eq!(updated, Some(json!({ "version": 2 })));
  }

  #[tokio::test]
  async fn delete_prints_nothing() {
    let store = MemoryStore::new();
    run(&store, Command::Save(socrates("Socrates is a man"))).await.unwrap();

    assert_eq!(run(&store, Command::Delete { id: 1 }).await.unwrap(), None);
    let err = run(&store, Command::Delete { id: 1 }).await.unwrap_err();
    assert!(err.to_string().starts_with("not found: "));
  }

  #[tokio::test]
  async fn show_prints_the_snapshot() {
    let store = MemoryStore::new();
    run(&store, Command::Save(socrates("Socrates is a man"))).await.unwrap();

    let shown = run(&store, Command::Show { id: 1, version: Some(1) }).await.unwrap();
    assert_eq!(
      shown,
      Some(json!({
        "id": 1,
        "version": 1,
        "conclusion": "Socrates is mortal",
        "premises": ["Socrates is a man", "All men are mortal"],
      }))
    );
  }

  #[tokio::test]
  async fn invalid_input_is_rejected_before_the_store() {
    let store = MemoryStore::new();
    let args = ArgumentArgs { conclusion: "c".into(), premises: vec!["lonely".into()] };

    assert!(run(&store, Command::Save(args)).await.is_err());
    assert_eq!(store.claim_count().unwrap(), 0);
  }
}
