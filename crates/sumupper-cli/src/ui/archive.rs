//! Archive: every lesson in the active language, filterable.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use sumupper_core::{filter::SubjectFacet, week::format_date};

use super::{Colors, subject_style};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App, colors: Colors) {
  let s = app.strings();
  let [filters, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

  // Facet chips and the search box.
  let mut chips = vec![chip(s.all_subjects, app.archive_filter.subject == SubjectFacet::All, colors)];
  for subject in app.facets() {
    let active = app.archive_filter.subject == SubjectFacet::Exact(subject.clone());
    chips.push(Span::raw(" "));
    chips.push(chip(&subject, active, colors));
  }
  let query = if app.archive_filter.search.is_empty() && !app.search_active {
    Span::styled(s.search_lessons, colors.dimmed())
  } else {
    let cursor = if app.search_active { "█" } else { "" };
    Span::styled(format!("{}{cursor}", app.archive_filter.search), colors.base())
  };
  let filter_block = Block::default()
    .borders(Borders::ALL)
    .border_style(if app.search_active {
      Style::default().fg(colors.accent)
    } else {
      colors.dimmed()
    })
    .title(format!(" {} ", s.archive));
  let inner = filter_block.inner(filters);
  f.render_widget(filter_block, filters);
  let [chip_row, search_row] =
    Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(inner);
  f.render_widget(Paragraph::new(Line::from(chips)), chip_row);
  f.render_widget(Paragraph::new(Line::from(vec![Span::raw("/ "), query])), search_row);

  // Results.
  let lessons = app.visible_archive();
  let list_block = Block::default().borders(Borders::ALL).border_style(colors.dimmed());
  if lessons.is_empty() {
    let inner = list_block.inner(body);
    f.render_widget(list_block, body);
    f.render_widget(Paragraph::new(Line::styled(s.no_lessons_found, colors.dimmed())), inner);
    return;
  }

  let items: Vec<ListItem> = lessons
    .iter()
    .map(|l| {
      ListItem::new(Line::from(vec![
        Span::styled(format!("{}  ", format_date(l.date)), colors.dimmed()),
        Span::styled(format!("{:<12}", l.subject), subject_style(&l.subject)),
        Span::styled(l.display_title(), Style::default().fg(colors.fg)),
      ]))
    })
    .collect();
  let list = List::new(items)
    .block(list_block)
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ");
  let mut state = ListState::default().with_selected(Some(app.list_cursor));
  f.render_stateful_widget(list, body, &mut state);
}

fn chip<'a>(label: &str, active: bool, colors: Colors) -> Span<'a> {
  let style = if active {
    Style::default().fg(colors.bg).bg(colors.accent).add_modifier(Modifier::BOLD)
  } else {
    colors.dimmed()
  };
  Span::styled(format!(" {label} "), style)
}
