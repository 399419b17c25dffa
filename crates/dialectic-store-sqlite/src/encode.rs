//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Claims are stored as plain text
//! in the `claims` table and referenced by id everywhere else.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dialectic_core::{Argument, ArgumentId, Claim, VersionNumber};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// One row of a single-argument snapshot query.
///
/// The conclusion row comes from a different branch of the query than the
/// premise rows and carries a negative `position`; premise rows carry their
/// `argument_premises.id`, which orders them.
pub struct RawClaimRow {
  pub version:  VersionNumber,
  pub claim:    String,
  pub position: i64,
}

impl RawClaimRow {
  pub fn is_conclusion(&self) -> bool { self.position < 0 }
}

/// Fold the rows of one version into a snapshot. Returns `None` when there
/// are no rows, i.e. the argument or version is unknown or deleted.
pub fn assemble_snapshot(id: ArgumentId, rows: Vec<RawClaimRow>) -> Option<Argument> {
  let mut rows = rows.into_iter();
  let first = rows.next().filter(RawClaimRow::is_conclusion)?;

  Some(Argument {
    id,
    version: first.version,
    conclusion: Claim::from(first.claim),
    premises: rows.map(|row| Claim::from(row.claim)).collect(),
  })
}

/// One row of a multi-argument listing: a live version joined to one of its
/// premises.
pub struct RawListedRow {
  pub argument_id: ArgumentId,
  pub version:     VersionNumber,
  pub conclusion:  String,
  pub premise:     String,
}

/// Group listing rows by argument. The `BTreeMap` yields arguments in
/// ascending id order regardless of the order rows arrived in.
pub fn assemble_listing(rows: Vec<RawListedRow>) -> Vec<Argument> {
  let mut by_id: BTreeMap<ArgumentId, Argument> = BTreeMap::new();
  for row in rows {
    by_id
      .entry(row.argument_id)
      .or_insert_with(|| Argument {
        id:         row.argument_id,
        version:    row.version,
        conclusion: Claim::from(row.conclusion),
        premises:   Vec::new(),
      })
      .premises
      .push(Claim::from(row.premise));
  }
  by_id.into_values().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn listed(argument_id: ArgumentId, premise: &str) -> RawListedRow {
    RawListedRow {
      argument_id,
      version: 1,
      conclusion: format!("conclusion {argument_id}"),
      premise: premise.into(),
    }
  }

  #[test]
  fn listing_is_sorted_by_id() {
    let rows = vec![listed(3, "c1"), listed(1, "a1"), listed(3, "c2"), listed(1, "a2")];
    let args = assemble_listing(rows);

    assert_eq!(args.iter().map(|a| a.id).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(args[0].premises, ["a1", "a2"]);
    assert_eq!(args[1].premises, ["c1", "c2"]);
  }

  #[test]
  fn snapshot_without_conclusion_row_is_missing() {
    assert!(assemble_snapshot(1, vec![]).is_none());
    let premise_only = vec![RawClaimRow { version: 1, claim: "p".into(), position: 4 }];
    assert!(assemble_snapshot(1, premise_only).is_none());
  }

  #[test]
  fn timestamps_roundtrip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
    assert!(decode_dt("yesterday").is_err());
  }
}
