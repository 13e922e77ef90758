//! Lesson and lesson-asset types.
//!
//! A lesson is a self-contained HTML document published for one subject, one
//! date and one language. Lessons for the same subject and date share a
//! [`LessonKey`], which is how assets are associated with them independently
//! of any single lesson's id.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Language, Result, week::format_date};

// ─── LessonKey ───────────────────────────────────────────────────────────────

/// Stable composite identifier `{subject}_{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonKey(String);

impl LessonKey {
  pub fn new(subject: &str, date: NaiveDate) -> Self {
    Self(format!("{subject}_{}", format_date(date)))
  }

  /// Wrap an already-built key, e.g. one read back from the database.
  pub fn from_raw(raw: impl Into<String>) -> Self { Self(raw.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for LessonKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Storage path of a lesson document: `{subject}/{date}/{language}.html`.
pub fn storage_path(subject: &str, date: NaiveDate, language: Language) -> String {
  format!("{subject}/{}/{}.html", format_date(date), language.code())
}

// ─── Lesson ──────────────────────────────────────────────────────────────────

/// A published lesson, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
  pub id:         Uuid,
  pub date:       NaiveDate,
  /// Lowercase category, e.g. `"historia"`.
  pub subject:    String,
  /// Locale code as stored. `None` (or an unsupported code) hides the lesson
  /// from every language-filtered view.
  pub language:   Option<String>,
  pub title:      Option<String>,
  /// Storage-relative path of the lesson document.
  pub html_path:  String,
  pub lesson_key: LessonKey,
  #[serde(default)]
  pub created_by: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Lesson {
  /// The title, or the subject when no title was given.
  pub fn display_title(&self) -> &str {
    self
      .title
      .as_deref()
      .filter(|t| !t.trim().is_empty())
      .unwrap_or(&self.subject)
  }

  pub fn matches_language(&self, language: Language) -> bool {
    language.matches(self.language.as_deref())
  }

  /// Single-letter badge for compact views; `?` when the subject is empty.
  pub fn subject_initial(&self) -> char {
    self
      .subject
      .chars()
      .next()
      .map(|c| c.to_uppercase().next().unwrap_or(c))
      .unwrap_or('?')
  }
}

// ─── NewLesson ───────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::LessonStore::upsert_lesson`].
///
/// The subject is normalised to lowercase before the storage path and lesson
/// key are derived, so that repeat uploads of the same triple collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
  pub date:       NaiveDate,
  pub subject:    String,
  pub language:   Language,
  pub title:      Option<String>,
  pub created_by: String,
}

impl NewLesson {
  pub fn new(date: NaiveDate, subject: &str, language: Language) -> Result<Self> {
    let subject = subject.trim().to_lowercase();
    if subject.is_empty() {
      return Err(Error::Missing("subject"));
    }
    if subject.contains(['/', '\\']) || subject.contains("..") {
      return Err(Error::InvalidSubject(subject));
    }
    Ok(Self {
      date,
      subject,
      language,
      title: None,
      created_by: "admin".to_owned(),
    })
  }

  /// Attach a title; blank titles are treated as absent.
  pub fn with_title(mut self, title: Option<String>) -> Self {
    self.title = title
      .map(|t| t.trim().to_owned())
      .filter(|t| !t.is_empty());
    self
  }

  pub fn html_path(&self) -> String {
    storage_path(&self.subject, self.date, self.language)
  }

  pub fn lesson_key(&self) -> LessonKey { LessonKey::new(&self.subject, self.date) }
}

// ─── Assets ──────────────────────────────────────────────────────────────────

/// A supplementary file (worksheet, slides, audio…) attached to a lesson key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonAsset {
  pub id:         Uuid,
  pub lesson_key: LessonKey,
  /// Storage-relative path.
  pub path:       String,
  #[serde(rename = "type")]
  pub asset_type: String,
  pub created_at: DateTime<Utc>,
}

impl LessonAsset {
  /// Uppercase label shown on the asset link.
  pub fn badge(&self) -> String { self.asset_type.to_uppercase() }

  /// Resolve the asset path against a public storage root URL.
  pub fn public_url(&self, storage_root: &str) -> String {
    format!(
      "{}/{}",
      storage_root.trim_end_matches('/'),
      self.path.trim_start_matches('/')
    )
  }
}

/// Input to [`crate::store::LessonStore::add_asset`].
#[derive(Debug, Clone)]
pub struct NewAsset {
  pub lesson_key: LessonKey,
  pub path:       String,
  pub asset_type: String,
}

/// A lesson with its assets, as returned by the single-lesson endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonWithAssets {
  #[serde(flatten)]
  pub lesson: Lesson,
  #[serde(default)]
  pub assets: Vec<LessonAsset>,
}
