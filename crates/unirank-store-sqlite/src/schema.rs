//! SQL schema for the unirank SQLite store.
//!
//! Executed once at connection startup. There is no migration path: tables
//! that already exist are left as they are.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

-- Names are unique by convention only: the ingestor looks up before it
-- inserts. There is deliberately no UNIQUE constraint here.
CREATE TABLE IF NOT EXISTS institutions (
    id        INTEGER PRIMARY KEY,
    name      TEXT,
    location  TEXT
);

-- Append-only. Re-ingesting a year appends duplicate rows.
CREATE TABLE IF NOT EXISTS rankings (
    id              INTEGER PRIMARY KEY,
    institution_id  INTEGER REFERENCES institutions(id),
    year            INTEGER,
    rank            INTEGER,
    score           INTEGER
);

CREATE INDEX IF NOT EXISTS institutions_name_idx   ON institutions(name);
CREATE INDEX IF NOT EXISTS rankings_institution_idx ON rankings(institution_id);
";
