//! Error types for `sumupper-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing {0}")]
  Missing(&'static str),

  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("unsupported language: {0:?}")]
  UnsupportedLanguage(String),

  #[error("invalid subject: {0:?}")]
  InvalidSubject(String),

  #[error("invalid storage path: {0:?}")]
  InvalidPath(String),

  #[error("unrecognised frame message: {0}")]
  UnknownFrameMessage(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
