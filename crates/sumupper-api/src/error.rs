//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or malformed request input.
  #[error("{0}")]
  InvalidArgument(String),

  /// The admin key was absent or wrong. Never carries detail.
  #[error("Unauthorized")]
  Unauthorized,

  #[error("{0}")]
  NotFound(String),

  /// The request body exceeded the configured upload limit.
  #[error("{0}")]
  PayloadTooLarge(String),

  /// The database or blob store failed.
  #[error("{0}")]
  UpstreamUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn upstream(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::UpstreamUnavailable(Box::new(e))
  }
}

impl From<sumupper_core::Error> for ApiError {
  fn from(e: sumupper_core::Error) -> Self { Self::InvalidArgument(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::UpstreamUnavailable(e) => {
        tracing::error!(error = %e, "upstream failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
