//! Week grid: navigation row above seven day columns.

use chrono::Datelike;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Position, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use sumupper_core::{
  i18n::{lesson_count, weekday_abbrev},
  week::{PageMove, format_date},
};

use super::{Colors, lesson_line};
use crate::app::App;

const CONTROL_WIDTH: u16 = 3;

/// Where everything on the week screen sits. Drawing and mouse hit-testing
/// both go through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekLayout {
  pub nav:  Rect,
  pub prev: Rect,
  pub next: Rect,
  pub days: [Rect; 7],
}

pub fn layout(body: Rect) -> WeekLayout {
  let [nav, grid] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
  let prev = Rect { width: CONTROL_WIDTH.min(nav.width), ..nav };
  let next = Rect {
    x: nav.right().saturating_sub(CONTROL_WIDTH),
    width: CONTROL_WIDTH.min(nav.width),
    ..nav
  };
  let days = Layout::horizontal([Constraint::Ratio(1, 7); 7]).areas(grid);
  WeekLayout { nav, prev, next, days }
}

impl WeekLayout {
  /// The paging control at a terminal cell, if any.
  pub fn control_at(&self, column: u16, row: u16) -> Option<PageMove> {
    let pos = Position::new(column, row);
    if self.prev.contains(pos) {
      Some(PageMove::Prev)
    } else if self.next.contains(pos) {
      Some(PageMove::Next)
    } else {
      None
    }
  }

  /// Index (0 = Monday) of the day column at a terminal cell, if any.
  pub fn day_at(&self, column: u16, row: u16) -> Option<usize> {
    let pos = Position::new(column, row);
    self.days.iter().position(|r| r.contains(pos))
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App, colors: Colors) {
  let s = app.strings();
  let lay = layout(area);
  let week = app.week();

  let control = Style::default().fg(colors.accent).add_modifier(Modifier::BOLD);
  f.render_widget(Paragraph::new("[◀]").style(control), lay.prev);
  f.render_widget(Paragraph::new("[▶]").style(control), lay.next);
  let range = format!(
    "{} – {}  ({})",
    format_date(week.start()),
    format_date(week.end()),
    lesson_count(app.language(), app.aggregate.total()),
  );
  let title_area = Rect {
    x: lay.prev.right(),
    width: lay.nav.width.saturating_sub(2 * CONTROL_WIDTH),
    ..lay.nav
  };
  f.render_widget(
    Paragraph::new(Line::from(range).centered()).style(colors.base()),
    title_area,
  );

  for (idx, (date, cell)) in week.days().zip(lay.days).enumerate() {
    let lessons = app.aggregate.day(date);
    let selected = idx == app.day_cursor;
    let is_today = date == app.today;

    let border = if selected {
      Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
    } else {
      colors.dimmed()
    };
    let mut heading = Style::default().fg(colors.fg).add_modifier(Modifier::BOLD);
    if is_today {
      heading = heading.fg(colors.accent);
    }

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(border)
      .title(Span::styled(
        format!(" {} {} ", weekday_abbrev(app.language(), date), date.day()),
        heading,
      ));
    let inner = block.inner(cell);
    f.render_widget(block, cell);

    let mut lines = vec![Line::styled(lesson_count(app.language(), lessons.len()), colors.dimmed())];
    if lessons.is_empty() {
      lines.push(Line::styled(s.no_lessons_scheduled, colors.dimmed()));
    } else {
      lines.extend(lessons.iter().map(|l| lesson_line(l, colors)));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
  }
}
