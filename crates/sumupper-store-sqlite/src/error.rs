//! Error type for `sumupper-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] sumupper_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An asset was attached to a lesson key with no stored lesson.
  #[error("no lesson with key {0}")]
  UnknownLessonKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
