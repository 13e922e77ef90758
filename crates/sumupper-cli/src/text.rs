//! Plain-text rendering of lesson documents for the terminal viewer.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

static HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r"<(script|style|head)\b.*?</(script|style|head)>")
    .case_insensitive(true)
    .dot_matches_new_line(true)
    .build()
    .expect("hidden-element pattern should compile")
});

static BREAKS: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r"<(br|/p|/div|/h[1-6]|/li|/tr|hr)\b[^>]*>")
    .case_insensitive(true)
    .build()
    .expect("line-break pattern should compile")
});

static BULLETS: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r"<li\b[^>]*>")
    .case_insensitive(true)
    .build()
    .expect("list-item pattern should compile")
});

static TAGS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern should compile"));

/// Crude HTML → text conversion: scripts and styles dropped, block elements
/// become line breaks, remaining tags stripped, common entities decoded.
pub fn document_lines(html: &str) -> Vec<String> {
  let text = HIDDEN.replace_all(html, "");
  let text = BREAKS.replace_all(&text, "\n");
  let text = BULLETS.replace_all(&text, "• ");
  let text = TAGS.replace_all(&text, "");
  let text = decode_entities(&text);

  let mut lines = Vec::new();
  let mut blank = true;
  for line in text.lines().map(|l| l.split_whitespace().collect::<Vec<_>>().join(" ")) {
    if line.is_empty() {
      if !blank {
        lines.push(String::new());
      }
      blank = true;
    } else {
      lines.push(line);
      blank = false;
    }
  }
  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }
  lines
}

fn decode_entities(s: &str) -> String {
  s.replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_markup_and_scripts() {
    let html = "<html><head><title>x</title></head><body>\
                <h1>Bitwa</h1><p>Rok&nbsp;1410 &amp; później</p>\
                <ul><li>one</li><li>two</li></ul>\
                <script>window.parent.postMessage({})</script></body></html>";
    let lines = document_lines(html);
    assert_eq!(lines, ["Bitwa", "Rok 1410 & później", "• one", "• two"]);
  }

  #[test]
  fn collapses_blank_runs() {
    let lines = document_lines("<p>a</p><p></p><p></p><p>b</p>");
    assert_eq!(lines, ["a", "", "b"]);
  }
}
