//! UI string tables for the supported languages.

use chrono::{Datelike, NaiveDate};

use crate::Language;

/// Every user-visible string the front-end needs, for one language.
#[derive(Debug)]
pub struct Strings {
  pub lesson_calendar:      &'static str,
  pub calendar:             &'static str,
  pub archive:              &'static str,
  pub settings:             &'static str,
  pub theme:                &'static str,
  pub language:             &'static str,
  pub dark:                 &'static str,
  pub light:                &'static str,
  pub no_lessons:           &'static str,
  pub loading:              &'static str,
  pub failed_to_load:       &'static str,
  pub previous_week:        &'static str,
  pub next_week:            &'static str,
  pub no_lessons_scheduled: &'static str,
  pub lesson:               &'static str,
  pub lessons:              &'static str,
  pub back:                 &'static str,
  pub all_subjects:         &'static str,
  pub search_lessons:       &'static str,
  pub no_lessons_found:     &'static str,
  pub view_lesson:          &'static str,
  /// Abbreviated weekday names, Sunday first.
  pub weekdays:             [&'static str; 7],
}

const EN: Strings = Strings {
  lesson_calendar:      "Lesson Calendar",
  calendar:             "Calendar",
  archive:              "Archive",
  settings:             "Settings",
  theme:                "Theme",
  language:             "Language",
  dark:                 "Dark",
  light:                "Light",
  no_lessons:           "No lessons for this day.",
  loading:              "Loading...",
  failed_to_load:       "Failed to load lesson",
  previous_week:        "← Previous Week",
  next_week:            "Next Week →",
  no_lessons_scheduled: "No lessons scheduled",
  lesson:               "lesson",
  lessons:              "lessons",
  back:                 "← Back",
  all_subjects:         "All Subjects",
  search_lessons:       "Search lessons...",
  no_lessons_found:     "No lessons found",
  view_lesson:          "View lesson",
  weekdays:             ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

const PL: Strings = Strings {
  lesson_calendar:      "Kalendarz Lekcji",
  calendar:             "Kalendarz",
  archive:              "Archiwum",
  settings:             "Ustawienia",
  theme:                "Motyw",
  language:             "Język",
  dark:                 "Ciemny",
  light:                "Jasny",
  no_lessons:           "Brak lekcji na ten dzień.",
  loading:              "Ładowanie...",
  failed_to_load:       "Nie udało się załadować lekcji",
  previous_week:        "← Poprzedni Tydzień",
  next_week:            "Następny Tydzień →",
  no_lessons_scheduled: "Brak zaplanowanych lekcji",
  lesson:               "lekcja",
  lessons:              "lekcji",
  back:                 "← Wstecz",
  all_subjects:         "Wszystkie Przedmioty",
  search_lessons:       "Szukaj lekcji...",
  no_lessons_found:     "Nie znaleziono lekcji",
  view_lesson:          "Zobacz lekcję",
  weekdays:             ["Nie", "Pon", "Wt", "Śr", "Czw", "Pt", "Sob"],
};

const FR: Strings = Strings {
  lesson_calendar:      "Calendrier des Cours",
  calendar:             "Calendrier",
  archive:              "Archive",
  settings:             "Paramètres",
  theme:                "Thème",
  language:             "Langue",
  dark:                 "Sombre",
  light:                "Clair",
  no_lessons:           "Pas de leçons pour ce jour.",
  loading:              "Chargement...",
  failed_to_load:       "Échec du chargement de la leçon",
  previous_week:        "← Semaine Précédente",
  next_week:            "Semaine Suivante →",
  no_lessons_scheduled: "Aucun cours prévu",
  lesson:               "cours",
  lessons:              "cours",
  back:                 "← Retour",
  all_subjects:         "Toutes les Matières",
  search_lessons:       "Rechercher des leçons...",
  no_lessons_found:     "Aucune leçon trouvée",
  view_lesson:          "Voir la leçon",
  weekdays:             ["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"],
};

impl Language {
  /// The string table for this language.
  pub fn strings(self) -> &'static Strings {
    match self {
      Self::En => &EN,
      Self::Pl => &PL,
      Self::Fr => &FR,
    }
  }
}

/// `"1 lesson"`, `"3 lessons"`, localized.
pub fn lesson_count(language: Language, n: usize) -> String {
  let s = language.strings();
  let noun = if n == 1 { s.lesson } else { s.lessons };
  format!("{n} {noun}")
}

/// Abbreviated weekday name of `date`.
pub fn weekday_abbrev(language: Language, date: NaiveDate) -> &'static str {
  let idx = date.weekday().num_days_from_sunday() as usize;
  language.strings().weekdays[idx % 7]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::week::parse_date;

  #[test]
  fn lesson_count_pluralises() {
    assert_eq!(lesson_count(Language::En, 1), "1 lesson");
    assert_eq!(lesson_count(Language::En, 0), "0 lessons");
    assert_eq!(lesson_count(Language::Pl, 1), "1 lekcja");
  }

  #[test]
  fn weekday_names_are_sunday_first() {
    let monday = parse_date("2024-01-01").unwrap();
    let sunday = parse_date("2024-01-07").unwrap();
    assert_eq!(weekday_abbrev(Language::En, monday), "Mon");
    assert_eq!(weekday_abbrev(Language::Fr, sunday), "Dim");
  }
}
