//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates are `YYYY-MM-DD` and UUIDs
//! are hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use sumupper_core::{
  Lesson, LessonAsset, LessonKey,
  week::{format_date, parse_date},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { format_date(d) }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  parse_date(s).map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawLesson::from_row`].
pub const LESSON_COLUMNS: &str = "id, date, subject, language, title, html_path, lesson_key, \
                                  created_by, created_at, updated_at";

/// Raw strings read directly from a `lessons` row.
pub struct RawLesson {
  pub id:         String,
  pub date:       String,
  pub subject:    String,
  pub language:   Option<String>,
  pub title:      Option<String>,
  pub html_path:  String,
  pub lesson_key: String,
  pub created_by: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawLesson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      date:       row.get(1)?,
      subject:    row.get(2)?,
      language:   row.get(3)?,
      title:      row.get(4)?,
      html_path:  row.get(5)?,
      lesson_key: row.get(6)?,
      created_by: row.get(7)?,
      created_at: row.get(8)?,
      updated_at: row.get(9)?,
    })
  }

  pub fn into_lesson(self) -> Result<Lesson> {
    Ok(Lesson {
      id:         decode_uuid(&self.id)?,
      date:       decode_date(&self.date)?,
      subject:    self.subject,
      language:   self.language,
      title:      self.title,
      html_path:  self.html_path,
      lesson_key: LessonKey::from_raw(self.lesson_key),
      created_by: self.created_by,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Column list matching [`RawAsset::from_row`].
pub const ASSET_COLUMNS: &str = "id, lesson_key, path, type, created_at";

/// Raw strings read directly from a `lesson_assets` row.
pub struct RawAsset {
  pub id:         String,
  pub lesson_key: String,
  pub path:       String,
  pub asset_type: String,
  pub created_at: String,
}

impl RawAsset {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      lesson_key: row.get(1)?,
      path:       row.get(2)?,
      asset_type: row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_asset(self) -> Result<LessonAsset> {
    Ok(LessonAsset {
      id:         decode_uuid(&self.id)?,
      lesson_key: LessonKey::from_raw(self.lesson_key),
      path:       self.path,
      asset_type: self.asset_type,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
