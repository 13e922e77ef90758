//! Handlers for lesson metadata.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/public/lessons` | Archive listing, newest date first |
//! | `GET`  | `/public/lesson?id=<uuid>` | Lesson plus its assets; 404 if unknown |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use sumupper_core::{Lesson, LessonWithAssets, blob::BlobStore, store::LessonStore};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Archive ─────────────────────────────────────────────────────────────────

/// `GET /public/lessons`
pub async fn archive<S, B>(
  State(state): State<AppState<S, B>>,
) -> Result<Json<Vec<Lesson>>, ApiError>
where
  S: LessonStore,
  B: BlobStore,
{
  let lessons = state.store.list_lessons().await.map_err(ApiError::upstream)?;
  Ok(Json(lessons))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LessonParams {
  pub id: Option<String>,
}

/// `GET /public/lesson?id=<uuid>`
///
/// A failed asset lookup is logged and answered with an empty asset list.
pub async fn get_one<S, B>(
  State(state): State<AppState<S, B>>,
  Query(params): Query<LessonParams>,
) -> Result<Json<LessonWithAssets>, ApiError>
where
  S: LessonStore,
  B: BlobStore,
{
  let raw = params
    .id
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::InvalidArgument("Missing lesson id".into()))?;
  let id = Uuid::parse_str(&raw)
    .map_err(|_| ApiError::InvalidArgument(format!("invalid lesson id: {raw:?}")))?;

  let lesson = state
    .store
    .get_lesson(id)
    .await
    .map_err(ApiError::upstream)?
    .ok_or_else(|| ApiError::NotFound(format!("lesson {id} not found")))?;

  let assets = match state.store.assets_for(&lesson.lesson_key).await {
    Ok(assets) => assets,
    Err(e) => {
      tracing::warn!(key = %lesson.lesson_key, error = %e, "asset lookup failed");
      Vec::new()
    }
  };

  Ok(Json(LessonWithAssets { lesson, assets }))
}
