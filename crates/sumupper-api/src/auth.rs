//! Shared admin key: an argon2 PHC hash checked against `x-admin-key`.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::{self, SaltString},
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use rand_core::OsRng;
use sumupper_core::{blob::BlobStore, store::LessonStore};

use crate::{AppState, error::ApiError};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// The configured admin secret.
#[derive(Clone)]
pub struct AdminKey {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub hash: String,
}

/// Hash `key` into a PHC string suitable for [`AdminKey::hash`].
pub fn hash_admin_key(key: &str) -> Result<String, password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(key.as_bytes(), &salt)?.to_string())
}

/// Marker: present in the handler means the request carried the admin key.
pub struct Admin;

/// Verify the admin key header. Headers only, so a bad key is rejected before
/// any of the body is read.
pub fn verify_admin_key(headers: &HeaderMap, key: &AdminKey) -> Result<(), ApiError> {
  let presented = headers
    .get(ADMIN_KEY_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let parsed = PasswordHash::new(&key.hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(presented.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)
}

impl<S, B> FromRequestParts<AppState<S, B>> for Admin
where
  S: LessonStore + 'static,
  B: BlobStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, B>,
  ) -> Result<Self, Self::Rejection> {
    verify_admin_key(&parts.headers, &state.admin_key)?;
    Ok(Admin)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  fn key(secret: &str) -> AdminKey {
    AdminKey { hash: hash_admin_key(secret).unwrap() }
  }

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ADMIN_KEY_HEADER, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn correct_key() {
    assert!(verify_admin_key(&headers("s3cret"), &key("s3cret")).is_ok());
  }

  #[test]
  fn wrong_key() {
    assert!(matches!(
      verify_admin_key(&headers("guess"), &key("s3cret")),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn missing_header() {
    assert!(matches!(
      verify_admin_key(&HeaderMap::new(), &key("s3cret")),
      Err(ApiError::Unauthorized)
    ));
  }

  #[test]
  fn malformed_hash_rejects_everything() {
    let broken = AdminKey { hash: "not-a-phc-string".into() };
    assert!(verify_admin_key(&headers("anything"), &broken).is_err());
  }
}
