//! Grouping a week's lessons by day for the calendar grid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Language, Lesson, Week};

/// A week's lessons grouped by date, already filtered to one language.
///
/// Every date of the week has an entry; dates without matching lessons map to
/// an empty list rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekAggregate {
  week:     Week,
  language: Language,
  days:     BTreeMap<NaiveDate, Vec<Lesson>>,
}

/// Group `lessons` by date for `week`, keeping only those whose language
/// matches `language` (case-insensitively). Lessons without a language and
/// lessons outside the week are dropped. Order within a day is the input
/// order.
pub fn aggregate_week(week: Week, lessons: &[Lesson], language: Language) -> WeekAggregate {
  let mut days: BTreeMap<NaiveDate, Vec<Lesson>> =
    week.days().map(|d| (d, Vec::new())).collect();

  for lesson in lessons.iter().filter(|l| l.matches_language(language)) {
    if let Some(bucket) = days.get_mut(&lesson.date) {
      bucket.push(lesson.clone());
    }
  }

  WeekAggregate { week, language, days }
}

impl WeekAggregate {
  pub fn week(&self) -> Week { self.week }

  pub fn language(&self) -> Language { self.language }

  /// Lessons on `date`; empty for dates outside the week.
  pub fn day(&self, date: NaiveDate) -> &[Lesson] {
    self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
  }

  /// Number of lessons shown for `date`.
  pub fn count(&self, date: NaiveDate) -> usize { self.day(date).len() }

  /// `(date, lessons)` pairs in calendar order, always seven of them.
  pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Lesson])> {
    self.days.iter().map(|(d, ls)| (*d, ls.as_slice()))
  }

  /// All lessons in date order, flattened.
  pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
    self.days.values().flatten()
  }

  pub fn total(&self) -> usize { self.days.values().map(Vec::len).sum() }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::{LessonKey, week::parse_date};

  fn lesson(date: &str, subject: &str, language: Option<&str>) -> Lesson {
    let date = parse_date(date).unwrap();
    Lesson {
      id: Uuid::new_v4(),
      date,
      subject: subject.into(),
      language: language.map(str::to_owned),
      title: None,
      html_path: format!("{subject}/{date}/x.html"),
      lesson_key: LessonKey::new(subject, date),
      created_by: None,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  fn week() -> Week { Week::starting(parse_date("2024-01-01").unwrap()) }

  #[test]
  fn every_day_has_an_entry() {
    let agg = aggregate_week(week(), &[], Language::En);
    assert_eq!(agg.days().count(), 7);
    assert!(agg.days().all(|(_, ls)| ls.is_empty()));
    assert_eq!(agg.total(), 0);
  }

  #[test]
  fn filters_by_language_case_insensitively() {
    let lessons = vec![
      lesson("2024-01-01", "historia", Some("EN")),
      lesson("2024-01-01", "fizyka", Some("pl")),
      lesson("2024-01-02", "chemia", None),
      lesson("2024-01-02", "biologia", Some("en")),
    ];
    let agg = aggregate_week(week(), &lessons, Language::En);
    assert_eq!(agg.total(), 2);
    assert!(agg.lessons().all(|l| l.language.as_deref().unwrap().to_lowercase() == "en"));
    assert_eq!(agg.count(parse_date("2024-01-01").unwrap()), 1);
    assert_eq!(agg.count(parse_date("2024-01-02").unwrap()), 1);
  }

  #[test]
  fn missing_language_never_appears() {
    let lessons = vec![lesson("2024-01-03", "historia", None)];
    for lang in [Language::En, Language::Pl, Language::Fr] {
      assert_eq!(aggregate_week(week(), &lessons, lang).total(), 0);
    }
  }

  #[test]
  fn preserves_insertion_order_within_a_day() {
    let lessons = vec![
      lesson("2024-01-04", "polski", Some("pl")),
      lesson("2024-01-04", "chemia", Some("pl")),
      lesson("2024-01-04", "biologia", Some("pl")),
    ];
    let agg = aggregate_week(week(), &lessons, Language::Pl);
    let subjects: Vec<_> = agg
      .day(parse_date("2024-01-04").unwrap())
      .iter()
      .map(|l| l.subject.as_str())
      .collect();
    assert_eq!(subjects, ["polski", "chemia", "biologia"]);
  }

  #[test]
  fn drops_lessons_outside_the_week() {
    let lessons = vec![
      lesson("2023-12-31", "historia", Some("en")),
      lesson("2024-01-08", "historia", Some("en")),
    ];
    let agg = aggregate_week(week(), &lessons, Language::En);
    assert_eq!(agg.total(), 0);
    assert!(agg.day(parse_date("2024-01-08").unwrap()).is_empty());
  }

  #[test]
  fn re_aggregating_is_idempotent() {
    let lessons = vec![
      lesson("2024-01-01", "historia", Some("en")),
      lesson("2024-01-05", "fizyka", Some("en")),
      lesson("2024-01-05", "chemia", Some("fr")),
      lesson("2024-01-07", "polski", Some("En")),
    ];
    let first = aggregate_week(week(), &lessons, Language::En);
    let flattened: Vec<Lesson> = first.lessons().cloned().collect();
    let second = aggregate_week(week(), &flattened, Language::En);
    assert_eq!(first, second);
  }
}
