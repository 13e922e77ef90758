//! Lesson viewer: metadata, assets and the document text.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use sumupper_core::week::format_date;

use super::{Colors, subject_style};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(detail) = &app.lesson else {
    return;
  };
  let lesson = &detail.lesson;
  let page = Colors::for_dark(app.document_dark);

  let meta_height = if detail.assets.is_empty() { 3 } else { 4 };
  let [meta, doc] =
    Layout::vertical([Constraint::Length(meta_height), Constraint::Min(0)]).areas(area);

  let mut meta_lines = vec![Line::from(vec![
    Span::styled(lesson.display_title(), Style::default().add_modifier(Modifier::BOLD)),
    Span::raw("  "),
    Span::styled(lesson.subject.as_str(), subject_style(&lesson.subject)),
    Span::raw("  "),
    Span::raw(format_date(lesson.date)),
  ])];
  if !detail.assets.is_empty() {
    let mut spans = Vec::new();
    for asset in &detail.assets {
      spans.push(Span::styled(format!("[{}]", asset.badge()), Style::default().fg(page.accent)));
      spans.push(Span::raw(format!(" {}  ", asset.path)));
    }
    meta_lines.push(Line::from(spans));
  }
  let meta_block = Block::default()
    .borders(Borders::ALL)
    .title(format!(" {} ", app.strings().view_lesson));
  f.render_widget(Paragraph::new(meta_lines).block(meta_block), meta);

  let lines: Vec<Line> = app
    .document
    .iter()
    .skip(app.lesson_scroll)
    .map(|l| Line::raw(l.as_str()))
    .collect();
  let doc_block = Block::default()
    .borders(Borders::ALL)
    .border_style(page.dimmed())
    .title(format!(" {} ", lesson.html_path));
  f.render_widget(
    Paragraph::new(lines)
      .block(doc_block)
      .style(page.base())
      .wrap(Wrap { trim: false }),
    doc,
  );
}
