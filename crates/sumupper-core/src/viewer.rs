//! Lesson viewer: document preparation and the parent/child theme protocol.
//!
//! A lesson document is rendered in an isolated frame. Two messages cross the
//! boundary:
//!
//! | Direction      | Wire shape                     | Variant |
//! |----------------|--------------------------------|---------|
//! | child → parent | `{"type":"LESSON_LOADED"}`     | [`FrameMessage::LoadedNotice`] |
//! | parent → child | `{"darkMode":true\|false}`     | [`FrameMessage::ThemeUpdate`] |
//!
//! There is no acknowledgement or retry. A dropped message leaves the child on
//! its default light theme until the next theme change.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const LOADED_TAG: &str = "LESSON_LOADED";

static DARK_TOGGLE: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r#"<button[^>]*class="dark-toggle"[^>]*>.*?</button>"#)
    .case_insensitive(true)
    .build()
    .expect("dark-toggle pattern should compile")
});

// ─── Messages ────────────────────────────────────────────────────────────────

/// A validated cross-frame message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub enum FrameMessage {
  /// The child finished loading and is ready for a theme.
  LoadedNotice,
  /// The parent's current theme.
  ThemeUpdate { dark_mode: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireMessage {
  Tagged {
    #[serde(rename = "type")]
    kind: String,
  },
  Theme {
    #[serde(rename = "darkMode")]
    dark_mode: bool,
  },
}

impl TryFrom<WireMessage> for FrameMessage {
  type Error = Error;

  fn try_from(wire: WireMessage) -> Result<Self> {
    match wire {
      WireMessage::Tagged { kind } if kind == LOADED_TAG => Ok(Self::LoadedNotice),
      WireMessage::Tagged { kind } => Err(Error::UnknownFrameMessage(kind)),
      WireMessage::Theme { dark_mode } => Ok(Self::ThemeUpdate { dark_mode }),
    }
  }
}

impl From<FrameMessage> for WireMessage {
  fn from(msg: FrameMessage) -> Self {
    match msg {
      FrameMessage::LoadedNotice => Self::Tagged { kind: LOADED_TAG.to_owned() },
      FrameMessage::ThemeUpdate { dark_mode } => Self::Theme { dark_mode },
    }
  }
}

impl FrameMessage {
  /// Validate an untrusted JSON message.
  pub fn parse(raw: &str) -> Result<Self> {
    serde_json::from_str(raw).map_err(|e| Error::UnknownFrameMessage(e.to_string()))
  }

  pub fn to_json(self) -> Result<String> { Ok(serde_json::to_string(&self)?) }
}

// ─── Parent side ─────────────────────────────────────────────────────────────

/// Parent-side theme synchroniser.
///
/// Feed it inbound messages and theme changes; it returns the message to post
/// to the child, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSync {
  dark_mode: bool,
}

impl ThemeSync {
  pub fn new(dark_mode: bool) -> Self { Self { dark_mode } }

  pub fn dark_mode(&self) -> bool { self.dark_mode }

  /// Handle a message from the child. Only the load notice is answered.
  pub fn on_message(&mut self, msg: FrameMessage) -> Option<FrameMessage> {
    match msg {
      FrameMessage::LoadedNotice => Some(self.current()),
      FrameMessage::ThemeUpdate { .. } => None,
    }
  }

  /// Handle a change of the parent's theme attribute. Every mutation is
  /// forwarded, even when the value is unchanged.
  pub fn on_theme_change(&mut self, dark_mode: bool) -> FrameMessage {
    self.dark_mode = dark_mode;
    self.current()
  }

  fn current(&self) -> FrameMessage { FrameMessage::ThemeUpdate { dark_mode: self.dark_mode } }
}

// ─── Child side ──────────────────────────────────────────────────────────────

/// Script injected into every served lesson document. Applies `darkMode`
/// updates to the body class and announces readiness once.
pub const SYNC_SCRIPT: &str = r#"
<script>
  window.addEventListener('message', function (e) {
    if (e.data && typeof e.data === 'object' && typeof e.data.darkMode === 'boolean') {
      document.body.classList.toggle('dark-mode', e.data.darkMode);
    }
  });
  window.parent.postMessage({ type: 'LESSON_LOADED' }, '*');
</script>
"#;

/// Prepare a stored lesson document for the viewer frame.
///
/// Removes the first built-in `dark-toggle` button (the parent owns theming)
/// and injects [`SYNC_SCRIPT`] before the first `</body>`. Documents without a
/// closing body tag are returned without the script.
pub fn prepare_lesson_document(html: &str) -> String {
  let stripped = DARK_TOGGLE.replacen(html, 1, "");
  stripped.replacen("</body>", &format!("{SYNC_SCRIPT}</body>"), 1)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_both_wire_shapes() {
    assert_eq!(
      FrameMessage::parse(r#"{"type":"LESSON_LOADED"}"#).unwrap(),
      FrameMessage::LoadedNotice
    );
    assert_eq!(
      FrameMessage::parse(r#"{"darkMode":true}"#).unwrap(),
      FrameMessage::ThemeUpdate { dark_mode: true }
    );
  }

  #[test]
  fn rejects_unknown_shapes() {
    assert!(FrameMessage::parse(r#"{"type":"OTHER"}"#).is_err());
    assert!(FrameMessage::parse(r#"{"darkMode":"yes"}"#).is_err());
    assert!(FrameMessage::parse("42").is_err());
    assert!(FrameMessage::parse("not json").is_err());
  }

  #[test]
  fn serialises_to_wire_shapes() {
    assert_eq!(FrameMessage::LoadedNotice.to_json().unwrap(), r#"{"type":"LESSON_LOADED"}"#);
    assert_eq!(
      FrameMessage::ThemeUpdate { dark_mode: false }.to_json().unwrap(),
      r#"{"darkMode":false}"#
    );
  }

  #[test]
  fn load_notice_is_answered_with_current_theme() {
    let mut sync = ThemeSync::new(true);
    assert_eq!(
      sync.on_message(FrameMessage::LoadedNotice),
      Some(FrameMessage::ThemeUpdate { dark_mode: true })
    );
    assert_eq!(sync.on_message(FrameMessage::ThemeUpdate { dark_mode: false }), None);
  }

  #[test]
  fn every_theme_change_is_forwarded() {
    let mut sync = ThemeSync::new(false);
    assert_eq!(sync.on_theme_change(true), FrameMessage::ThemeUpdate { dark_mode: true });
    assert_eq!(sync.on_theme_change(true), FrameMessage::ThemeUpdate { dark_mode: true });
    assert!(sync.dark_mode());
  }

  #[test]
  fn prepare_strips_toggle_and_injects_script() {
    let html = r#"<html><body><BUTTON id="t" class="dark-toggle">🌙</BUTTON><p>x</p></body></html>"#;
    let out = prepare_lesson_document(html);
    assert!(!out.to_lowercase().contains("dark-toggle"));
    assert!(out.contains("LESSON_LOADED"));
    let script_at = out.find("<script>").unwrap();
    let body_end = out.find("</body>").unwrap();
    assert!(script_at < body_end);
    assert!(out.contains("<p>x</p>"));
  }

  #[test]
  fn prepare_without_body_leaves_document_unchanged() {
    let html = "<p>fragment</p>";
    assert_eq!(prepare_lesson_document(html), html);
  }
}
