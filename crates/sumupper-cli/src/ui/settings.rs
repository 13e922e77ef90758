//! Theme and language settings.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::Colors;
use crate::app::{App, SETTINGS_ROWS, SettingsRow};

pub fn draw(f: &mut Frame, area: Rect, app: &App, colors: Colors) {
  let s = app.strings();
  let items: Vec<ListItem> = SETTINGS_ROWS
    .iter()
    .map(|row| {
      let (label, value) = match row {
        SettingsRow::Theme => (s.theme, if app.prefs.theme.is_dark() { s.dark } else { s.light }),
        SettingsRow::Language => (s.language, app.language().label()),
      };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{label:<12}"), colors.dimmed()),
        Span::styled(value, Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)),
      ]))
    })
    .collect();

  let list = List::new(items)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .border_style(colors.dimmed())
        .title(format!(" {} ", s.settings)),
    )
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ");
  let [rows, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
  let mut state = ListState::default().with_selected(Some(app.settings_cursor));
  f.render_stateful_widget(list, rows, &mut state);
  f.render_widget(
    Paragraph::new(Line::styled(format!(" {}", app.prefs_path().display()), colors.dimmed())),
    footer,
  );
}
