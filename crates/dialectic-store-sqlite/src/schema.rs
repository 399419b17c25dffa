//! SQL schema for the Dialectic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Each distinct piece of text is stored once and shared by every argument
-- that uses it as a conclusion or premise.
CREATE TABLE IF NOT EXISTS claims (
    id     INTEGER PRIMARY KEY,
    claim  TEXT NOT NULL UNIQUE
);

-- One row per argument. Arguments are soft-deleted: deleted_at is set
-- (RFC 3339 UTC) and every read filters on it. AUTOINCREMENT keeps ids
-- from ever being reused.
CREATE TABLE IF NOT EXISTS arguments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    deleted_at  TEXT
);

-- Versions are strictly append-only. The live version of an argument is
-- the one with the highest version_number; it is never stored separately.
CREATE TABLE IF NOT EXISTS argument_versions (
    id                   INTEGER PRIMARY KEY,
    argument_id          INTEGER NOT NULL REFERENCES arguments(id),
    version_number       INTEGER NOT NULL CHECK (version_number >= 1),
    conclusion_claim_id  INTEGER NOT NULL REFERENCES claims(id),
    UNIQUE (argument_id, version_number)
);

-- Premises of a version, in insertion (id) order.
CREATE TABLE IF NOT EXISTS argument_premises (
    id                   INTEGER PRIMARY KEY,
    argument_version_id  INTEGER NOT NULL REFERENCES argument_versions(id),
    premise_claim_id     INTEGER NOT NULL REFERENCES claims(id)
);

CREATE INDEX IF NOT EXISTS argument_premises_version_idx
    ON argument_premises(argument_version_id);
CREATE INDEX IF NOT EXISTS argument_versions_conclusion_idx
    ON argument_versions(conclusion_claim_id);

PRAGMA user_version = 1;
";
