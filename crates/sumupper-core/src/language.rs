//! Supported UI / lesson languages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _};

use crate::{Error, Result};

/// A locale code a lesson can be published in and a viewer can select.
///
/// Lessons are language-exclusive: a lesson is shown only to viewers whose
/// selected language equals the lesson's `language` field.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
  #[default]
  En,
  Pl,
  Fr,
}

impl Language {
  /// The lowercase code stored in the `language` column.
  pub fn code(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Pl => "pl",
      Self::Fr => "fr",
    }
  }

  /// Human-readable name, in the language itself.
  pub fn label(self) -> &'static str {
    match self {
      Self::En => "English",
      Self::Pl => "Polski",
      Self::Fr => "Français",
    }
  }

  /// Parse a user-supplied code, case-insensitively.
  pub fn parse(raw: &str) -> Result<Self> {
    raw
      .trim()
      .parse()
      .map_err(|_| Error::UnsupportedLanguage(raw.to_owned()))
  }

  /// The next language in declaration order, wrapping around.
  pub fn cycle(self) -> Self {
    let all: Vec<Self> = Self::iter().collect();
    let idx = all.iter().position(|l| *l == self).unwrap_or(0);
    all[(idx + 1) % all.len()]
  }

  /// Whether a stored `language` value selects this language.
  ///
  /// Missing values never match.
  pub fn matches(self, stored: Option<&str>) -> bool {
    stored.is_some_and(|s| s.to_lowercase() == self.code())
  }
}
