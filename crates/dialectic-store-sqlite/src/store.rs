//! [`SqliteStore`] — the SQLite implementation of [`ArgumentStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, Transaction};

use dialectic_core::{
  Argument, ArgumentId, ArgumentStore, Claim, FetchSomeOptions, NewArgument, VersionNumber,
};

use crate::{
  Error, Result,
  encode::{RawClaimRow, RawListedRow, assemble_listing, assemble_snapshot, decode_dt, encode_dt},
  query,
  schema::SCHEMA,
};

// ─── Statements ──────────────────────────────────────────────────────────────

/// Insert-or-fetch in one statement: on conflict the no-op update still
/// reaches `RETURNING`, so exactly one id comes back either way.
const SAVE_CLAIM: &str = "
INSERT INTO claims (claim) VALUES (?1)
    ON CONFLICT (claim) DO UPDATE SET claim = excluded.claim
RETURNING id";

const INSERT_ARGUMENT: &str = "INSERT INTO arguments DEFAULT VALUES RETURNING id";

const INSERT_FIRST_VERSION: &str = "
INSERT INTO argument_versions (argument_id, version_number, conclusion_claim_id)
VALUES (?1, 1, ?2)
RETURNING id";

/// Appends version `max + 1`, computed from committed rows. Inserts nothing
/// (and returns no row) when the argument is unknown or deleted.
const INSERT_NEXT_VERSION: &str = "
INSERT INTO argument_versions (argument_id, version_number, conclusion_claim_id)
SELECT v.argument_id, v.version_number + 1, ?2
  FROM argument_versions v
  JOIN arguments a ON a.id = v.argument_id
 WHERE v.argument_id = ?1
   AND a.deleted_at IS NULL
 ORDER BY v.version_number DESC
 LIMIT 1
RETURNING id, version_number";

const SAVE_PREMISE: &str = "
INSERT INTO argument_premises (argument_version_id, premise_claim_id) VALUES (?1, ?2)";

const DELETE_ARGUMENT: &str = "
UPDATE arguments SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";

/// Conclusion row (position -1) followed by premise rows of one version.
const FETCH_VERSION: &str = "
SELECT v.version_number, c.claim, -1 AS position
  FROM argument_versions v
  JOIN arguments a ON a.id = v.argument_id
  JOIN claims c    ON c.id = v.conclusion_claim_id
 WHERE v.argument_id = ?1
   AND v.version_number = ?2
   AND a.deleted_at IS NULL
UNION ALL
SELECT v.version_number, c.claim, p.id AS position
  FROM argument_versions v
  JOIN arguments a         ON a.id = v.argument_id
  JOIN argument_premises p ON p.argument_version_id = v.id
  JOIN claims c            ON c.id = p.premise_claim_id
 WHERE v.argument_id = ?1
   AND v.version_number = ?2
   AND a.deleted_at IS NULL
 ORDER BY position";

/// As [`FETCH_VERSION`], for whichever version has no newer sibling.
const FETCH_LIVE: &str = "
SELECT v.version_number, c.claim, -1 AS position
  FROM argument_versions v
  JOIN arguments a ON a.id = v.argument_id
  JOIN claims c    ON c.id = v.conclusion_claim_id
  LEFT JOIN argument_versions newer
         ON newer.argument_id = v.argument_id
        AND newer.version_number > v.version_number
 WHERE v.argument_id = ?1
   AND newer.id IS NULL
   AND a.deleted_at IS NULL
UNION ALL
SELECT v.version_number, c.claim, p.id AS position
  FROM argument_versions v
  JOIN arguments a         ON a.id = v.argument_id
  JOIN argument_premises p ON p.argument_version_id = v.id
  JOIN claims c            ON c.id = p.premise_claim_id
  LEFT JOIN argument_versions newer
         ON newer.argument_id = v.argument_id
        AND newer.version_number > v.version_number
 WHERE v.argument_id = ?1
   AND newer.id IS NULL
   AND a.deleted_at IS NULL
 ORDER BY position";

// ─── Statement helpers ───────────────────────────────────────────────────────

fn save_claim(conn: &rusqlite::Connection, claim: &Claim) -> rusqlite::Result<i64> {
  conn.prepare_cached(SAVE_CLAIM)?.query_row([claim.as_str()], |row| row.get(0))
}

fn save_premises(
  conn: &rusqlite::Connection,
  version_id: i64,
  premises: &[Claim],
) -> rusqlite::Result<()> {
  for premise in premises {
    let claim_id = save_claim(conn, premise)?;
    conn
      .prepare_cached(SAVE_PREMISE)?
      .execute(rusqlite::params![version_id, claim_id])?;
  }
  Ok(())
}

/// Insert the argument row and its first version.
fn insert_argument(tx: &Transaction<'_>, argument: &NewArgument) -> rusqlite::Result<ArgumentId> {
  let conclusion_id = save_claim(tx, &argument.conclusion)?;
  let id: ArgumentId = tx.prepare_cached(INSERT_ARGUMENT)?.query_row([], |row| row.get(0))?;
  let version_id: i64 = tx
    .prepare_cached(INSERT_FIRST_VERSION)?
    .query_row(rusqlite::params![id, conclusion_id], |row| row.get(0))?;
  save_premises(tx, version_id, &argument.premises)?;
  Ok(id)
}

/// Append the next version of `id`. `None` if the argument is unknown or
/// deleted.
fn append_version(
  tx: &Transaction<'_>,
  id: ArgumentId,
  argument: &NewArgument,
) -> rusqlite::Result<Option<VersionNumber>> {
  let conclusion_id = save_claim(tx, &argument.conclusion)?;
  let next: Option<(i64, VersionNumber)> = tx
    .prepare_cached(INSERT_NEXT_VERSION)?
    .query_row(rusqlite::params![id, conclusion_id], |row| Ok((row.get(0)?, row.get(1)?)))
    .optional()?;

  let Some((version_id, version)) = next else {
    return Ok(None);
  };
  save_premises(tx, version_id, &argument.premises)?;
  Ok(Some(version))
}

fn rollback(tx: Transaction<'_>) {
  if let Err(err) = tx.rollback() {
    tracing::error!(error = %err, "failed to roll back transaction");
  }
}

fn read_claim_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawClaimRow> {
  Ok(RawClaimRow { version: row.get(0)?, claim: row.get(1)?, position: row.get(2)? })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An argument store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::database("failed to open database"))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::database("failed to open in-memory database"))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::database("failed to initialise schema"))
  }

  /// When argument `id` was soft-deleted, or `None` if it is still live.
  /// Fails with [`Error::NotFound`] if the argument never existed.
  pub async fn deleted_at(&self, id: ArgumentId) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<Option<String>> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT deleted_at FROM arguments WHERE id = ?1",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::database(format!("failed to look up argument {id}")))?;

    match raw {
      Some(deleted_at) => deleted_at.as_deref().map(decode_dt).transpose(),
      None => Err(Error::argument_not_found(id)),
    }
  }

  /// Number of rows in the `claims` table.
  pub async fn claim_count(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM claims", [], |row| row.get(0))?))
      .await
      .map_err(Error::database("failed to count claims"))?;
    Ok(count as usize)
  }

  async fn fetch_snapshot(
    &self,
    id: ArgumentId,
    version: Option<VersionNumber>,
  ) -> Result<Option<Argument>> {
    let rows: Vec<RawClaimRow> = self
      .conn
      .call(move |conn| {
        let rows = match version {
          Some(version) => conn
            .prepare_cached(FETCH_VERSION)?
            .query_map(rusqlite::params![id, version], read_claim_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => conn
            .prepare_cached(FETCH_LIVE)?
            .query_map(rusqlite::params![id], read_claim_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await
      .map_err(Error::database(format!("failed to fetch argument {id}")))?;

    Ok(assemble_snapshot(id, rows))
  }
}

// ─── ArgumentStore impl ──────────────────────────────────────────────────────

impl ArgumentStore for SqliteStore {
  type Error = Error;

  async fn save(&self, argument: NewArgument) -> Result<ArgumentId> {
    argument.validate().map_err(dialectic_core::Error::from)?;

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        match insert_argument(&tx, &argument) {
          Ok(id) => {
            tx.commit()?;
            Ok(id)
          }
          Err(err) => {
            rollback(tx);
            Err(err.into())
          }
        }
      })
      .await
      .map_err(Error::database("failed to save argument"))?;

    tracing::debug!(argument_id = id, "saved argument");
    Ok(id)
  }

  async fn update(&self, id: ArgumentId, argument: NewArgument) -> Result<VersionNumber> {
    argument.validate().map_err(dialectic_core::Error::from)?;

    let version = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        match append_version(&tx, id, &argument) {
          Ok(Some(version)) => {
            tx.commit()?;
            Ok(Some(version))
          }
          Ok(None) => {
            rollback(tx);
            Ok(None)
          }
          Err(err) => {
            rollback(tx);
            Err(err.into())
          }
        }
      })
      .await
      .map_err(Error::database(format!("failed to update argument {id}")))?
      .ok_or_else(|| Error::argument_not_found(id))?;

    tracing::debug!(argument_id = id, version, "updated argument");
    Ok(version)
  }

  async fn delete(&self, id: ArgumentId) -> Result<()> {
    let at_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| Ok(conn.execute(DELETE_ARGUMENT, rusqlite::params![at_str, id])?))
      .await
      .map_err(Error::database(format!("failed to delete argument {id}")))?;

    if affected == 0 {
      return Err(Error::argument_not_found(id));
    }
    tracing::debug!(argument_id = id, "deleted argument");
    Ok(())
  }

  async fn fetch_live(&self, id: ArgumentId) -> Result<Argument> {
    self
      .fetch_snapshot(id, None)
      .await?
      .ok_or_else(|| Error::argument_not_found(id))
  }

  async fn fetch_version(&self, id: ArgumentId, version: VersionNumber) -> Result<Argument> {
    self
      .fetch_snapshot(id, Some(version))
      .await?
      .ok_or_else(|| Error::version_not_found(id, version))
  }

  async fn fetch_some(&self, options: &FetchSomeOptions) -> Result<Vec<Argument>> {
    let (sql, params) = query::fetch_some(options);

    let rows: Vec<RawListedRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawListedRow {
              argument_id: row.get(0)?,
              version:     row.get(1)?,
              conclusion:  row.get(2)?,
              premise:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::database("failed to fetch arguments"))?;

    let found = assemble_listing(rows);
    tracing::debug!(results = found.len(), "fetched arguments");
    Ok(found)
  }
}
