//! Blob storage for lesson documents.
//!
//! Blobs are addressed by storage-relative paths such as
//! `historia/2024-01-01/en.html`. Writes overwrite.

use std::{
  collections::HashMap,
  future::Future,
  sync::{Mutex, PoisonError},
};

use crate::{Error, Result};

/// Abstraction over the file storage backend.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `bytes` at `path`, replacing anything already there.
  fn put<'a>(
    &'a self,
    path: &'a str,
    bytes: Vec<u8>,
    content_type: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Fetch the blob at `path`. Returns `None` if nothing is stored there.
  fn get<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send + 'a;
}

/// Reject paths that could escape the storage root.
pub fn validate_storage_path(path: &str) -> Result<&str> {
  let bad = path.is_empty()
    || path.starts_with('/')
    || path.contains('\\')
    || path.contains('\0')
    || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
  if bad {
    return Err(Error::InvalidPath(path.to_owned()));
  }
  Ok(path)
}

// ─── In-memory backend ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct StoredBlob {
  bytes:        Vec<u8>,
  content_type: String,
}

/// A [`BlobStore`] that keeps everything in memory, for tests.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
  blobs: Mutex<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
  pub fn new() -> Self { Self::default() }

  /// Content type recorded for `path`, if any.
  pub fn content_type(&self, path: &str) -> Option<String> {
    let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
    blobs.get(path).map(|b| b.content_type.clone())
  }

  pub fn len(&self) -> usize {
    self.blobs.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl BlobStore for MemoryBlobStore {
  type Error = Error;

  async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
    let path = validate_storage_path(path)?;
    let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
    blobs.insert(path.to_owned(), StoredBlob {
      bytes,
      content_type: content_type.to_owned(),
    });
    Ok(())
  }

  async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
    let path = validate_storage_path(path)?;
    let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(blobs.get(path).map(|b| b.bytes.clone()))
  }
}
