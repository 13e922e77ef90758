//! The `LessonStore` trait and the week query built on it.
//!
//! The trait is implemented by storage backends (e.g. `sumupper-store-sqlite`).
//! Higher layers (`sumupper-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Lesson, LessonAsset, LessonKey, NewLesson, Week,
  lesson::NewAsset,
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the lesson database.
///
/// Lessons are never deleted. Writes are upserts keyed on the lesson's
/// storage path, so re-uploading the same `(subject, date, language)` updates
/// the existing row instead of adding a second one.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LessonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a lesson, or update the one already stored at the same
  /// `html_path`. The returned lesson keeps the original id on update.
  fn upsert_lesson(
    &self,
    input: NewLesson,
  ) -> impl Future<Output = Result<Lesson, Self::Error>> + Send + '_;

  /// Attach an asset to a lesson key.
  fn add_asset(
    &self,
    input: NewAsset,
  ) -> impl Future<Output = Result<LessonAsset, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a lesson by id. Returns `None` if not found.
  fn get_lesson(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Lesson>, Self::Error>> + Send + '_;

  /// Every lesson with `start <= date <= end`, ascending by date.
  fn lessons_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Lesson>, Self::Error>> + Send + '_;

  /// Every lesson, newest date first.
  fn list_lessons(&self) -> impl Future<Output = Result<Vec<Lesson>, Self::Error>> + Send + '_;

  /// Assets for `key`, oldest first.
  fn assets_for<'a>(
    &'a self,
    key: &'a LessonKey,
  ) -> impl Future<Output = Result<Vec<LessonAsset>, Self::Error>> + Send + 'a;
}

// ─── Week query ──────────────────────────────────────────────────────────────

/// All lessons in `week`, ascending by date, in one response.
///
/// The backend's range result is re-checked against the window so that the
/// contract holds regardless of how the backend compares dates. Any backend
/// failure is returned as-is; no partial results are produced.
pub async fn week_lessons<S: LessonStore>(store: &S, week: Week) -> Result<Vec<Lesson>, S::Error> {
  let mut lessons = store.lessons_between(week.start(), week.end()).await?;
  lessons.retain(|l| week.contains(l.date));
  lessons.sort_by_key(|l| l.date);
  Ok(lessons)
}
