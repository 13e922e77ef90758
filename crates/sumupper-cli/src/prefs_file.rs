//! Preferences persisted as a flat TOML table.

use std::{
  collections::BTreeMap,
  io,
  path::{Path, PathBuf},
};

use sumupper_core::prefs::KeyValueStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
  #[error("preferences i/o error: {0}")]
  Io(#[from] io::Error),

  #[error("preferences encode error: {0}")]
  Encode(#[from] toml::ser::Error),

  #[error("preferences parse error: {0}")]
  Decode(#[from] toml::de::Error),
}

/// A [`KeyValueStore`] backed by a TOML file. Every `set` rewrites the file.
#[derive(Debug)]
pub struct TomlKv {
  path:    PathBuf,
  entries: BTreeMap<String, String>,
}

impl TomlKv {
  /// Load `path`; a missing file is an empty store.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
    let path = path.into();
    let entries = match std::fs::read_to_string(&path) {
      Ok(raw) => toml::from_str(&raw)?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => return Err(e.into()),
    };
    Ok(Self { path, entries })
  }

  pub fn path(&self) -> &Path { &self.path }

  fn save(&self) -> Result<(), PrefsError> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&self.path, toml::to_string(&self.entries)?)?;
    Ok(())
  }
}

impl KeyValueStore for TomlKv {
  type Error = PrefsError;

  fn get(&self, key: &str) -> Option<String> { self.entries.get(key).cloned() }

  fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
    self.entries.insert(key.to_owned(), value.to_owned());
    self.save()
  }
}

/// `~/.config/sumupper/prefs.toml`, honouring `XDG_CONFIG_HOME`.
pub fn default_prefs_path() -> PathBuf {
  let base = std::env::var_os("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    .unwrap_or_else(|| PathBuf::from("."));
  base.join("sumupper").join("prefs.toml")
}
