//! JSON/HTML API for Sumupper.
//!
//! Exposes an axum [`Router`] backed by any [`LessonStore`] and [`BlobStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sumupper_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod files;
pub mod lessons;
pub mod upload;
pub mod weeks;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use sumupper_core::{blob::BlobStore, store::LessonStore};

pub use auth::AdminKey;
pub use error::ApiError;

/// Default cap on an upload request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, B> {
  pub store:            Arc<S>,
  pub blobs:            Arc<B>,
  pub admin_key:        Arc<AdminKey>,
  pub max_upload_bytes: usize,
}

impl<S, B> AppState<S, B> {
  pub fn new(store: S, blobs: B, admin_key: AdminKey) -> Self {
    Self {
      store:            Arc::new(store),
      blobs:            Arc::new(blobs),
      admin_key:        Arc::new(admin_key),
      max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
  }

  pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
    self.max_upload_bytes = bytes;
    self
  }
}

impl<S, B> Clone for AppState<S, B> {
  fn clone(&self) -> Self {
    Self {
      store:            Arc::clone(&self.store),
      blobs:            Arc::clone(&self.blobs),
      admin_key:        Arc::clone(&self.admin_key),
      max_upload_bytes: self.max_upload_bytes,
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, B>(state: AppState<S, B>) -> Router<()>
where
  S: LessonStore + 'static,
  B: BlobStore + 'static,
{
  let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);
  Router::new()
    // Public
    .route("/public/weeks", get(weeks::handler::<S, B>))
    .route("/public/lessons", get(lessons::archive::<S, B>))
    .route("/public/lesson", get(lessons::get_one::<S, B>))
    .route("/public/lesson-file", get(files::lesson_file::<S, B>))
    // Admin
    .route(
      "/admin/upload-lesson",
      post(upload::handler::<S, B>).layer(upload_limit),
    )
    .with_state(state)
}
