//! Week windows and week-to-week paging.
//!
//! A week is always seven consecutive calendar days starting at `start`. The
//! calendar opens on the Monday of the current real-world week and pages by
//! whole weeks in either direction without bound.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Canonical on-the-wire date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Parse a canonical `YYYY-MM-DD` date.
///
/// Non-canonical spellings such as `2024-1-1` are rejected so that stored
/// dates stay comparable as plain strings.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
  let trimmed = raw.trim();
  let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(raw.to_owned()))?;
  if format_date(date) != trimmed {
    return Err(Error::InvalidDate(raw.to_owned()));
  }
  Ok(date)
}

/// Format a date in the canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// The Monday of the week containing `date`.
///
/// Sunday belongs to the week that started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
  let back = u64::from(date.weekday().num_days_from_monday());
  date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

// ─── Week ────────────────────────────────────────────────────────────────────

/// An inclusive seven-day window `[start, start + 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
  start: NaiveDate,
}

impl Week {
  /// Number of days in a week window.
  pub const LENGTH: u64 = 7;

  /// The window starting on `start`. `start` need not be a Monday.
  pub fn starting(start: NaiveDate) -> Self { Self { start } }

  /// The Monday-based week containing `date`.
  pub fn containing(date: NaiveDate) -> Self { Self::starting(monday_of(date)) }

  pub fn start(&self) -> NaiveDate { self.start }

  /// The last day of the window, `start + 6`.
  pub fn end(&self) -> NaiveDate {
    self
      .start
      .checked_add_days(Days::new(Self::LENGTH - 1))
      .unwrap_or(NaiveDate::MAX)
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date <= self.end()
  }

  /// The seven dates of the window, in order.
  pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
    self.start.iter_days().take(Self::LENGTH as usize)
  }

  /// The window seven days earlier. Saturates at the calendar minimum.
  pub fn prev(&self) -> Self {
    self
      .start
      .checked_sub_days(Days::new(Self::LENGTH))
      .map_or(*self, Self::starting)
  }

  /// The window seven days later. Saturates at the calendar maximum.
  pub fn next(&self) -> Self {
    self
      .start
      .checked_add_days(Days::new(Self::LENGTH))
      .map_or(*self, Self::starting)
  }
}

/// Validate the `start` query parameter of a week request.
pub fn parse_week_start(raw: Option<&str>) -> Result<Week> {
  let raw = raw
    .filter(|s| !s.trim().is_empty())
    .ok_or(Error::Missing("start date"))?;
  Ok(Week::starting(parse_date(raw)?))
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// A paging transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
  Prev,
  Next,
}

/// The calendar's navigation state: which week is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekPager {
  week: Week,
}

impl WeekPager {
  /// Start on the Monday of the week containing `today`.
  pub fn new(today: NaiveDate) -> Self {
    Self { week: Week::containing(today) }
  }

  pub fn week(&self) -> Week { self.week }

  /// Apply a transition and return the newly current week.
  pub fn apply(&mut self, mv: PageMove) -> Week {
    self.week = match mv {
      PageMove::Prev => self.week.prev(),
      PageMove::Next => self.week.next(),
    };
    self.week
  }
}
