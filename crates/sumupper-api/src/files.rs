//! `GET /public/lesson-file?path=<path>`: a stored lesson document, prepared
//! for the viewer frame.

use axum::{
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use serde::Deserialize;
use sumupper_core::{
  blob::{BlobStore, validate_storage_path},
  store::LessonStore,
  viewer::prepare_lesson_document,
};

use crate::{AppState, error::ApiError};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Lesson documents carry their own inline styles and scripts.
pub const LESSON_CSP: &str =
  "default-src *; style-src 'self' 'unsafe-inline'; script-src 'self' 'unsafe-inline' 'unsafe-eval'";

#[derive(Debug, Deserialize)]
pub struct FileParams {
  pub path: Option<String>,
}

pub async fn lesson_file<S, B>(
  State(state): State<AppState<S, B>>,
  Query(params): Query<FileParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LessonStore,
  B: BlobStore,
{
  let path = params
    .path
    .filter(|p| !p.is_empty())
    .ok_or_else(|| ApiError::InvalidArgument("Missing path".into()))?;
  validate_storage_path(&path)?;

  let bytes = state
    .blobs
    .get(&path)
    .await
    .map_err(ApiError::upstream)?
    .ok_or_else(|| ApiError::NotFound(format!("no lesson file at {path}")))?;

  let html = prepare_lesson_document(&String::from_utf8_lossy(&bytes));

  Ok((
    [
      (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
      (header::CONTENT_SECURITY_POLICY, LESSON_CSP),
    ],
    html,
  ))
}
