//! Sumupper HTTP server: configuration, filesystem blob storage and the
//! top-level router.

pub mod fs_blob;

pub use fs_blob::FsBlobStore;

use std::path::PathBuf;

use axum::{Router, routing::get};
use serde::Deserialize;
use sumupper_api::{AppState, api_router};
use sumupper_core::{blob::BlobStore, store::LessonStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SUMUPPER_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  #[serde(default = "default_blob_root")]
  pub blob_root:        PathBuf,
  /// argon2 PHC string of the shared admin key.
  pub admin_key_hash:   String,
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes: usize,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("sumupper.db") }

fn default_blob_root() -> PathBuf { PathBuf::from("lessons") }

fn default_max_upload_bytes() -> usize { sumupper_api::DEFAULT_MAX_UPLOAD_BYTES }

// ─── Router ──────────────────────────────────────────────────────────────────

/// The full application: `/health` plus the API nested under `/api`, traced.
pub fn app<S, B>(state: AppState<S, B>) -> Router
where
  S: LessonStore + 'static,
  B: BlobStore + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use sumupper_api::{AdminKey, auth::hash_admin_key};
  use sumupper_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_app(blob_root: &std::path::Path) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let state = AppState::new(store, FsBlobStore::new(blob_root), AdminKey {
      hash: hash_admin_key("k").unwrap(),
    });
    app(state)
  }

  #[tokio::test]
  async fn health_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let resp = make_app(dir.path())
      .await
      .oneshot(Request::get("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_is_nested() {
    let dir = tempfile::tempdir().unwrap();
    let resp = make_app(dir.path())
      .await
      .oneshot(Request::get("/api/public/weeks?start=2024-01-01").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[test]
  fn config_defaults_fill_in() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("admin_key_hash", "$argon2id$stub")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.blob_root, PathBuf::from("lessons"));
    assert_eq!(cfg.max_upload_bytes, 8 * 1024 * 1024);
  }
}
