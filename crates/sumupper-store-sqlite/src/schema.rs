//! SQL schema for the Sumupper SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Dates are stored as `YYYY-MM-DD` text, so lexical order is calendar order
/// and range queries can use plain `BETWEEN`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per (subject, date, language). Re-uploads update in place.
CREATE TABLE IF NOT EXISTS lessons (
    id          TEXT PRIMARY KEY,
    date        TEXT NOT NULL,
    subject     TEXT NOT NULL,
    language    TEXT,
    title       TEXT,
    html_path   TEXT NOT NULL UNIQUE,
    lesson_key  TEXT NOT NULL,
    created_by  TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lesson_assets (
    id          TEXT PRIMARY KEY,
    lesson_key  TEXT NOT NULL,
    path        TEXT NOT NULL,
    type        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS lessons_date_idx       ON lessons(date);
CREATE INDEX IF NOT EXISTS lessons_key_idx        ON lessons(lesson_key);
CREATE INDEX IF NOT EXISTS lesson_assets_key_idx  ON lesson_assets(lesson_key);

PRAGMA user_version = 1;
";
