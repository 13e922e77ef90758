//! `GET /public/weeks?start=YYYY-MM-DD`: every lesson in one 7-day window.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use sumupper_core::{
  Lesson,
  blob::BlobStore,
  store::{LessonStore, week_lessons},
  week::parse_week_start,
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct WeekParams {
  pub start: Option<String>,
}

/// Lessons with `start <= date <= start + 6 days`, ascending by date. The
/// response is unfiltered by language; clients aggregate per language.
pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Query(params): Query<WeekParams>,
) -> Result<Json<Vec<Lesson>>, ApiError>
where
  S: LessonStore,
  B: BlobStore,
{
  let week = parse_week_start(params.start.as_deref())?;
  let lessons = week_lessons(state.store.as_ref(), week)
    .await
    .map_err(ApiError::upstream)?;
  Ok(Json(lessons))
}
