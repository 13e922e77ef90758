//! The single subject → color table shared by every view.

use serde::{Deserialize, Serialize};

/// Color family associated with a subject. Front-ends map these to concrete
/// colors for their medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectColor {
  Amber,
  Blue,
  Purple,
  Green,
  Emerald,
  Cyan,
  Red,
  /// Subjects without a dedicated entry.
  Default,
}

const PALETTE: &[(&str, SubjectColor)] = &[
  ("historia", SubjectColor::Amber),
  ("matematyka", SubjectColor::Blue),
  ("fizyka", SubjectColor::Purple),
  ("chemia", SubjectColor::Green),
  ("biologia", SubjectColor::Emerald),
  ("geografia", SubjectColor::Cyan),
  ("polski", SubjectColor::Red),
];

/// Look up the color for `subject`, case-insensitively.
pub fn subject_color(subject: &str) -> SubjectColor {
  let key = subject.trim().to_lowercase();
  PALETTE
    .iter()
    .find(|(name, _)| *name == key)
    .map_or(SubjectColor::Default, |(_, color)| *color)
}
