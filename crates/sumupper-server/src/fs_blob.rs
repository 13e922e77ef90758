//! [`FsBlobStore`]: lesson documents as plain files under a root directory.

use std::{
  io::{self, Write},
  path::{Path, PathBuf},
};

use sumupper_core::blob::{BlobStore, validate_storage_path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
  #[error(transparent)]
  Path(#[from] sumupper_core::Error),

  #[error("blob i/o error: {0}")]
  Io(#[from] io::Error),
}

/// Stores each blob at `root/<path>`. Content types are not persisted; the
/// lesson-file route always serves HTML.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
  root: PathBuf,
}

impl FsBlobStore {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  fn resolve(&self, path: &str) -> Result<PathBuf, BlobError> {
    Ok(self.root.join(validate_storage_path(path)?))
  }
}

impl BlobStore for FsBlobStore {
  type Error = BlobError;

  async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BlobError> {
    let target = self.resolve(path)?;
    let parent = target.parent().map_or_else(|| self.root.clone(), Path::to_path_buf);
    tokio::fs::create_dir_all(&parent).await?;

    // Each put stages into its own temp file, then renames over the target.
    // The temp file is removed on drop if any step fails.
    let len = bytes.len();
    tokio::task::spawn_blocking(move || -> Result<(), BlobError> {
      let mut staging = tempfile::NamedTempFile::new_in(&parent)?;
      staging.write_all(&bytes)?;
      staging.as_file().sync_all()?;
      staging.persist(&target).map_err(|e| e.error)?;
      Ok(())
    })
    .await
    .map_err(io::Error::other)??;

    tracing::debug!(path, content_type, len, "blob stored");
    Ok(())
  }

  async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, BlobError> {
    let target = self.resolve(path)?;
    match tokio::fs::read(&target).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn put_creates_directories_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path());

    store.put("historia/2024-01-01/en.html", b"one".to_vec(), "text/html").await.unwrap();
    store.put("historia/2024-01-01/en.html", b"two".to_vec(), "text/html").await.unwrap();

    let on_disk = std::fs::read(dir.path().join("historia/2024-01-01/en.html")).unwrap();
    assert_eq!(on_disk, b"two");
    assert_eq!(store.get("historia/2024-01-01/en.html").await.unwrap().unwrap(), b"two");
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_puts_to_one_path_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path());
    let payloads: Vec<Vec<u8>> = (0..8u8).map(|i| vec![b'a' + i; 64 * 1024]).collect();

    let mut handles = Vec::new();
    for payload in payloads.clone() {
      let store = store.clone();
      handles.push(tokio::spawn(async move {
        for _ in 0..5 {
          store.put("historia/2024-01-01/en.html", payload.clone(), "text/html").await?;
        }
        Ok::<_, BlobError>(())
      }));
    }
    for handle in handles {
      handle.await.unwrap().unwrap();
    }

    let stored = store.get("historia/2024-01-01/en.html").await.unwrap().unwrap();
    assert!(payloads.contains(&stored));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("historia/2024-01-01"))
      .unwrap()
      .map(|entry| entry.unwrap().file_name())
      .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("en.html")]);
  }

  #[tokio::test]
  async fn missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path());
    assert!(store.get("fizyka/2024-01-01/en.html").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn traversal_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path().join("root"));
    let err = store.put("../escape.html", b"x".to_vec(), "text/html").await;
    assert!(matches!(err, Err(BlobError::Path(_))));
    assert!(!dir.path().join("escape.html").exists());
  }
}
