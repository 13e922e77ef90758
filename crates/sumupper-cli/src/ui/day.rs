//! One day's lessons, sorted by subject.

use chrono::Datelike;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Modifier, Style},
  text::Line,
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use sumupper_core::{
  i18n::{lesson_count, weekday_abbrev},
  week::format_date,
};

use super::{Colors, lesson_line};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App, colors: Colors) {
  let s = app.strings();
  let date = app.selected_date();
  let lessons = app.day_lessons();

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(colors.accent))
    .title(format!(
      " {} {}  {}  ({}) ",
      weekday_abbrev(app.language(), date),
      date.day(),
      format_date(date),
      lesson_count(app.language(), lessons.len()),
    ));

  if lessons.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(Line::styled(s.no_lessons, colors.dimmed())), inner);
    return;
  }

  let items: Vec<ListItem> = lessons
    .iter()
    .map(|l| ListItem::new(lesson_line(l, colors)))
    .collect();
  let list = List::new(items)
    .block(block)
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ");

  let mut state = ListState::default().with_selected(Some(app.list_cursor));
  f.render_stateful_widget(list, area, &mut state);
}
