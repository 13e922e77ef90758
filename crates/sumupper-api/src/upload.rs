//! `POST /admin/upload-lesson`: publish (or replace) one lesson document.
//!
//! Multipart fields: `date`, `subject`, `language`, optional `title`, and one
//! file part. The `x-admin-key` header is checked before the body is read.

use axum::{
  Json,
  http::StatusCode,
  extract::{
    Multipart, State,
    multipart::{MultipartError, MultipartRejection},
  },
};
use serde::Serialize;
use sumupper_core::{
  Language, Lesson, NewLesson, blob::BlobStore, store::LessonStore, week::parse_date,
};

use crate::{AppState, auth::Admin, error::ApiError, files::HTML_CONTENT_TYPE};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub lesson: Lesson,
}

/// Fields collected from the multipart body.
#[derive(Debug, Default)]
struct UploadForm {
  date:     Option<String>,
  subject:  Option<String>,
  language: Option<String>,
  title:    Option<String>,
  file:     Option<Vec<u8>>,
}

impl UploadForm {
  async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
    let mut form = Self::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
      if field.file_name().is_some() {
        form.file = Some(field.bytes().await.map_err(malformed)?.to_vec());
        continue;
      }
      let name = field.name().unwrap_or_default().to_owned();
      let value = field.text().await.map_err(malformed)?;
      match name.as_str() {
        "date" => form.date = Some(value),
        "subject" => form.subject = Some(value),
        "language" => form.language = Some(value),
        "title" => form.title = Some(value),
        _ => {}
      }
    }
    Ok(form)
  }

  fn into_new_lesson(self) -> Result<(NewLesson, Vec<u8>), ApiError> {
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(date), Some(subject), Some(language), Some(file)) = (
      present(self.date),
      present(self.subject),
      present(self.language),
      self.file,
    ) else {
      return Err(ApiError::InvalidArgument("Missing required fields or file".into()));
    };

    let date = parse_date(date.trim())?;
    let language = Language::parse(&language)?;
    let input = NewLesson::new(date, &subject, language)?.with_title(self.title);
    Ok((input, file))
  }
}

fn malformed(e: MultipartError) -> ApiError {
  if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
    return ApiError::PayloadTooLarge(e.body_text());
  }
  ApiError::InvalidArgument(format!("malformed upload: {}", e.body_text()))
}

pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  _admin: Admin,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError>
where
  S: LessonStore,
  B: BlobStore,
{
  let multipart =
    multipart.map_err(|e| ApiError::InvalidArgument(format!("expected multipart body: {e}")))?;
  let (input, file) = UploadForm::read(multipart).await?.into_new_lesson()?;
  let path = input.html_path();

  state
    .blobs
    .put(&path, file, HTML_CONTENT_TYPE)
    .await
    .map_err(ApiError::upstream)?;

  let lesson = state
    .store
    .upsert_lesson(input)
    .await
    .map_err(ApiError::upstream)?;

  tracing::info!(id = %lesson.id, path = %lesson.html_path, "lesson uploaded");
  Ok(Json(UploadResponse { lesson }))
}
