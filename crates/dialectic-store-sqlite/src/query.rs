//! Dynamic query assembly for [`ArgumentStore::fetch_some`].
//!
//! Every filter value becomes a bound parameter. A predicate and its
//! parameters are always added in the same call, so placeholder numbers and
//! the parameter list cannot drift apart.
//!
//! [`ArgumentStore::fetch_some`]: dialectic_core::ArgumentStore::fetch_some

use dialectic_core::FetchSomeOptions;
use rusqlite::types::Value;

/// Accumulates `WHERE` predicates with their bound values.
#[derive(Debug, Default)]
pub struct QueryBuilder {
  predicates: Vec<String>,
  params:     Vec<Value>,
}

impl QueryBuilder {
  /// Bind `value` and return its numbered placeholder (`?1`, `?2`, …).
  fn bind(&mut self, value: impl Into<Value>) -> String {
    self.params.push(value.into());
    format!("?{}", self.params.len())
  }

  /// Add a predicate containing a single `{}` placeholder slot for `value`.
  pub fn filter(&mut self, template: &str, value: impl Into<Value>) -> &mut Self {
    let placeholder = self.bind(value);
    self.predicates.push(template.replacen("{}", &placeholder, 1));
    self
  }

  /// Add `column NOT IN (…)` for every value in `values`. No-op when empty.
  pub fn not_in<V: Into<Value>>(
    &mut self,
    column: &str,
    values: impl IntoIterator<Item = V>,
  ) -> &mut Self {
    let placeholders: Vec<String> = values.into_iter().map(|v| self.bind(v)).collect();
    if !placeholders.is_empty() {
      self.predicates.push(format!("{column} NOT IN ({})", placeholders.join(", ")));
    }
    self
  }

  /// The accumulated predicates joined with `AND`, each prefixed by `AND` so
  /// the result can follow an existing `WHERE` clause.
  pub fn and_clauses(&self) -> String {
    self.predicates.iter().map(|p| format!("\n     AND {p}")).collect()
  }

  /// `LIMIT`/`OFFSET` suffix. SQLite needs a `LIMIT` before any `OFFSET`,
  /// and `LIMIT -1` means no limit.
  ///
  /// Values beyond `i64::MAX` are clamped; SQLite treats a negative bound as
  /// "none", so a wrapped value would invert its meaning.
  pub fn window(&mut self, count: usize, offset: usize) -> String {
    let clamp = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
    match (count, offset) {
      (0, 0) => String::new(),
      (count, 0) => format!("\n   LIMIT {}", self.bind(clamp(count))),
      (0, offset) => format!("\n   LIMIT -1 OFFSET {}", self.bind(clamp(offset))),
      (count, offset) => {
        let limit = self.bind(clamp(count));
        format!("\n   LIMIT {limit} OFFSET {}", self.bind(clamp(offset)))
      }
    }
  }

  pub fn into_params(self) -> Vec<Value> { self.params }
}

// ─── fetch_some query ────────────────────────────────────────────────────────

/// Selects the live version of every non-deleted argument: a version counts
/// as live when no newer version of the same argument exists.
const LIVE_VERSIONS: &str = "
  SELECT a.id             AS argument_id,
         v.id             AS version_id,
         v.version_number AS version_number,
         c.claim          AS conclusion
    FROM arguments a
    JOIN argument_versions v ON v.argument_id = a.id
    JOIN claims c            ON c.id = v.conclusion_claim_id
    LEFT JOIN argument_versions newer
           ON newer.argument_id = v.argument_id
          AND newer.version_number > v.version_number
   WHERE newer.id IS NULL
     AND a.deleted_at IS NULL";

/// Build the SQL text and parameters for `options`.
///
/// The filtered, windowed set of live versions is chosen in a CTE; the outer
/// query then fans each one out into a row per premise.
pub fn fetch_some(options: &FetchSomeOptions) -> (String, Vec<Value>) {
  let mut builder = QueryBuilder::default();

  if let Some(conclusion) = &options.conclusion {
    builder.filter("c.claim = {}", conclusion.clone());
  }
  for term in &options.conclusion_contains_all {
    builder.filter("instr(c.claim, {}) > 0", term.clone());
  }
  builder.not_in("a.id", options.exclude.iter().copied());

  let predicates = builder.and_clauses();
  let window = builder.window(options.count, options.offset);

  let sql = format!(
    "WITH chosen AS ({LIVE_VERSIONS}{predicates}
   ORDER BY a.id{window}
)
SELECT chosen.argument_id, chosen.version_number, chosen.conclusion, pc.claim
  FROM chosen
  JOIN argument_premises p ON p.argument_version_id = chosen.version_id
  JOIN claims pc           ON pc.id = p.premise_claim_id
 ORDER BY chosen.argument_id, p.id"
  );

  (sql, builder.into_params())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_options_means_no_params() {
    let (sql, params) = fetch_some(&FetchSomeOptions::default());
    assert!(params.is_empty());
    assert!(!sql.contains('?'));
    assert!(!sql.contains("LIMIT"));
  }

  #[test]
  fn placeholders_follow_parameter_order() {
    let options = FetchSomeOptions {
      conclusion:              Some("x".into()),
      conclusion_contains_all: vec!["a".into(), "b".into()],
      exclude:                 vec![7, 9],
      count:                   5,
      offset:                  2,
    };
    let (sql, params) = fetch_some(&options);

    assert!(sql.contains("c.claim = ?1"));
    assert!(sql.contains("instr(c.claim, ?2) > 0"));
    assert!(sql.contains("instr(c.claim, ?3) > 0"));
    assert!(sql.contains("a.id NOT IN (?4, ?5)"));
    assert!(sql.contains("LIMIT ?6 OFFSET ?7"));
    assert_eq!(params, vec![
      Value::Text("x".into()),
      Value::Text("a".into()),
      Value::Text("b".into()),
      Value::Integer(7),
      Value::Integer(9),
      Value::Integer(5),
      Value::Integer(2),
    ]);
  }

  #[test]
  fn offset_without_count_is_unbounded() {
    let options = FetchSomeOptions { offset: 3, ..Default::default() };
    let (sql, params) = fetch_some(&options);
    assert!(sql.contains("LIMIT -1 OFFSET ?1"));
    assert_eq!(params, vec![Value::Integer(3)]);
  }

  #[test]
  fn oversized_window_is_clamped() {
    let options = FetchSomeOptions { count: usize::MAX, offset: usize::MAX, ..Default::default() };
    let (_, params) = fetch_some(&options);
    assert_eq!(params, vec![Value::Integer(i64::MAX), Value::Integer(i64::MAX)]);
  }

  #[test]
  fn filter_values_never_reach_the_sql_text() {
    let options = FetchSomeOptions {
      conclusion: Some("'; DROP TABLE claims; --".into()),
      ..Default::default()
    };
    let (sql, _) = fetch_some(&options);
    assert!(!sql.contains("DROP TABLE"));
  }
}
