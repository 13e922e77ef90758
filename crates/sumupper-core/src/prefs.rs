//! Client preferences and their persistence seam.
//!
//! The selected language and theme live in an explicit [`Preferences`] value
//! owned by the front-end. Persistence goes through an injected
//! [`KeyValueStore`], so the same logic works against a file, a browser's
//! local storage, or an in-memory map in tests.

use std::{collections::HashMap, convert::Infallible};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::Language;

pub const LANGUAGE_KEY: &str = "selected_language";
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Minimal persistent string map.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get(&self, key: &str) -> Option<String>;

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// An in-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
  entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryKv {
  type Error = Infallible;

  fn get(&self, key: &str) -> Option<String> { self.entries.get(key).cloned() }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}

/// Light or dark presentation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn is_dark(self) -> bool { self == Self::Dark }

  pub fn toggled(self) -> Self {
    match self {
      Self::Light => Self::Dark,
      Self::Dark => Self::Light,
    }
  }
}

/// The viewer's persisted choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
  pub language: Language,
  pub theme:    Theme,
}

impl Preferences {
  /// Read preferences back, falling back to defaults for missing or
  /// unrecognised values.
  pub fn load(kv: &impl KeyValueStore) -> Self {
    let language = kv
      .get(LANGUAGE_KEY)
      .and_then(|s| Language::parse(&s).ok())
      .unwrap_or_default();
    let theme = match kv.get(DARK_MODE_KEY).as_deref() {
      Some("true") => Theme::Dark,
      _ => Theme::Light,
    };
    Self { language, theme }
  }

  pub fn set_language<K: KeyValueStore>(
    &mut self,
    kv: &mut K,
    language: Language,
  ) -> Result<(), K::Error> {
    self.language = language;
    kv.set(LANGUAGE_KEY, language.code())
  }

  /// Flip the theme and persist it; returns the new theme.
  pub fn toggle_theme<K: KeyValueStore>(&mut self, kv: &mut K) -> Result<Theme, K::Error> {
    self.theme = self.theme.toggled();
    kv.set(DARK_MODE_KEY, if self.theme.is_dark() { "true" } else { "false" })?;
    Ok(self.theme)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_when_empty() {
    let kv = MemoryKv::default();
    assert_eq!(Preferences::load(&kv), Preferences::default());
  }

  #[test]
  fn changes_survive_reload() {
    let mut kv = MemoryKv::default();
    let mut prefs = Preferences::load(&kv);
    prefs.set_language(&mut kv, Language::Fr).unwrap();
    assert_eq!(prefs.toggle_theme(&mut kv).unwrap(), Theme::Dark);

    let reloaded = Preferences::load(&kv);
    assert_eq!(reloaded.language, Language::Fr);
    assert_eq!(reloaded.theme, Theme::Dark);
  }

  #[test]
  fn garbage_values_fall_back() {
    let mut kv = MemoryKv::default();
    kv.set(LANGUAGE_KEY, "klingon").unwrap();
    kv.set(DARK_MODE_KEY, "maybe").unwrap();
    assert_eq!(Preferences::load(&kv), Preferences::default());
  }
}
