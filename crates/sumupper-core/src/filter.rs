//! Day-detail sorting and archive filtering.

use std::{cmp::Ordering, collections::HashSet};

use crate::{Language, Lesson};

// ─── Collation ───────────────────────────────────────────────────────────────

/// Fold a character to its base letter for primary comparison.
///
/// Covers the Latin letters used by the supported languages; anything else is
/// only lowercased.
fn fold_char(c: char, out: &mut String) {
  let base = match c {
    'ą' | 'à' | 'â' | 'ä' | 'á' => 'a',
    'ć' | 'ç' => 'c',
    'ę' | 'é' | 'è' | 'ê' | 'ë' => 'e',
    'î' | 'ï' | 'í' => 'i',
    'ł' => 'l',
    'ń' => 'n',
    'ó' | 'ô' | 'ö' => 'o',
    'ś' => 's',
    'ù' | 'û' | 'ü' | 'ú' => 'u',
    'ÿ' => 'y',
    'ź' | 'ż' => 'z',
    'œ' => {
      out.push_str("oe");
      return;
    }
    'æ' => {
      out.push_str("ae");
      return;
    }
    other => other,
  };
  out.push(base);
}

fn primary_key(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars().flat_map(char::to_lowercase) {
    fold_char(c, &mut out);
  }
  out
}

/// Locale-aware string comparison: accents and case only break ties.
pub fn collate(a: &str, b: &str) -> Ordering {
  primary_key(a)
    .cmp(&primary_key(b))
    .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    .then_with(|| a.cmp(b))
}

/// Sort lessons ascending by subject, stable for equal subjects.
pub fn sorted_by_subject<'a>(lessons: impl IntoIterator<Item = &'a Lesson>) -> Vec<&'a Lesson> {
  let mut out: Vec<&Lesson> = lessons.into_iter().collect();
  out.sort_by(|a, b| collate(&a.subject, &b.subject));
  out
}

// ─── Archive ─────────────────────────────────────────────────────────────────

/// The archive's subject selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubjectFacet {
  #[default]
  All,
  Exact(String),
}

impl SubjectFacet {
  /// `"all"` selects everything; anything else is an exact subject.
  pub fn parse(raw: &str) -> Self {
    if raw == "all" { Self::All } else { Self::Exact(raw.to_owned()) }
  }

  pub fn matches(&self, subject: &str) -> bool {
    match self {
      Self::All => true,
      Self::Exact(s) => s == subject,
    }
  }
}

/// Archive view predicates, applied conjunctively with the language filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilter {
  pub subject: SubjectFacet,
  /// Case-insensitive substring over the display title; empty matches all.
  pub search:  String,
}

impl ArchiveFilter {
  pub fn matches(&self, lesson: &Lesson, language: Language) -> bool {
    if !lesson.matches_language(language) || !self.subject.matches(&lesson.subject) {
      return false;
    }
    self.search.is_empty()
      || lesson
        .display_title()
        .to_lowercase()
        .contains(&self.search.to_lowercase())
  }

  pub fn apply<'a>(&self, lessons: &'a [Lesson], language: Language) -> Vec<&'a Lesson> {
    lessons.iter().filter(|l| self.matches(l, language)).collect()
  }
}

/// Distinct subjects present among the lessons visible in `language`, in
/// first-seen order.
pub fn subject_facets(lessons: &[Lesson], language: Language) -> Vec<String> {
  let mut seen = HashSet::new();
  lessons
    .iter()
    .filter(|l| l.matches_language(language) && !l.subject.is_empty())
    .filter(|l| seen.insert(l.subject.as_str()))
    .map(|l| l.subject.clone())
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::{LessonKey, week::parse_date};

  fn lesson(subject: &str, title: Option<&str>, language: &str) -> Lesson {
    let date = parse_date("2024-01-01").unwrap();
    Lesson {
      id: Uuid::new_v4(),
      date,
      subject: subject.into(),
      language: Some(language.into()),
      title: title.map(str::to_owned),
      html_path: format!("{subject}/2024-01-01/{language}.html"),
      lesson_key: LessonKey::new(subject, date),
      created_by: None,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  #[test]
  fn archive_filter_is_conjunctive() {
    let lessons = vec![
      lesson("historia", Some("WWII"), "en"),
      lesson("math", Some("Algebra"), "en"),
    ];
    let mut filter = ArchiveFilter {
      subject: SubjectFacet::parse("historia"),
      search:  "ww".into(),
    };
    let hits = filter.apply(&lessons, Language::En);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].subject, "historia");
    assert_eq!(hits[0].title.as_deref(), Some("WWII"));

    filter.search = "zzz".into();
    assert!(filter.apply(&lessons, Language::En).is_empty());
  }

  #[test]
  fn search_is_a_plain_substring() {
    let lessons = vec![
      lesson("historia", Some("WWII"), "en"),
      lesson("historia", Some("World War"), "en"),
    ];
    let titles = |search: &str| {
      let filter = ArchiveFilter { subject: SubjectFacet::All, search: search.into() };
      filter
        .apply(&lessons, Language::En)
        .into_iter()
        .map(|l| l.display_title().to_owned())
        .collect::<Vec<_>>()
    };

    assert!(titles("   ").is_empty());
    assert!(titles(" ww").is_empty());
    assert_eq!(titles(" war"), ["World War"]);
    assert_eq!(titles(""), ["WWII", "World War"]);
  }

  #[test]
  fn archive_filter_respects_language() {
    let lessons = vec![lesson("historia", Some("WWII"), "pl")];
    let filter = ArchiveFilter::default();
    assert!(filter.apply(&lessons, Language::En).is_empty());
    assert_eq!(filter.apply(&lessons, Language::Pl).len(), 1);
  }

  #[test]
  fn search_falls_back_to_subject_when_untitled() {
    let lessons = vec![lesson("chemia", None, "pl")];
    let filter = ArchiveFilter { subject: SubjectFacet::All, search: "CHEM".into() };
    assert_eq!(filter.apply(&lessons, Language::Pl).len(), 1);
  }

  #[test]
  fn facets_come_from_language_filtered_lessons() {
    let lessons = vec![
      lesson("historia", None, "en"),
      lesson("fizyka", None, "pl"),
      lesson("historia", None, "EN"),
      lesson("chemia", None, "en"),
    ];
    assert_eq!(subject_facets(&lessons, Language::En), ["historia", "chemia"]);
    assert_eq!(subject_facets(&lessons, Language::Pl), ["fizyka"]);
  }

  #[test]
  fn sorts_by_subject_with_accent_folding() {
    let lessons = vec![
      lesson("polski", None, "pl"),
      lesson("łacina", None, "pl"),
      lesson("biologia", None, "pl"),
      lesson("Matematyka", None, "pl"),
    ];
    let sorted: Vec<_> = sorted_by_subject(&lessons)
      .into_iter()
      .map(|l| l.subject.as_str())
      .collect();
    assert_eq!(sorted, ["biologia", "łacina", "Matematyka", "polski"]);
  }

  #[test]
  fn collate_breaks_ties_deterministically() {
    assert_eq!(collate("ecole", "école"), Ordering::Less);
    assert_eq!(collate("abc", "abc"), Ordering::Equal);
    assert_eq!(collate("a", "B"), Ordering::Less);
  }
}
