//! TUI rendering: header, the active screen, status bar.

pub mod archive;
pub mod day;
pub mod lesson;
pub mod settings;
pub mod week;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use sumupper_core::{Lesson, palette::SubjectColor, prefs::Theme};

use crate::app::{App, Screen};

// ─── Layout ───────────────────────────────────────────────────────────────────

fn rows(area: Rect) -> [Rect; 3] {
  Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .areas(area)
}

/// The body row for a frame of size `area`. Shared with mouse hit-testing.
pub fn body_area(area: Rect) -> Rect { rows(area)[1] }

// ─── Colors ───────────────────────────────────────────────────────────────────

/// Foreground/background pair for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
  pub fg:     Color,
  pub bg:     Color,
  pub dim:    Color,
  pub accent: Color,
}

impl Colors {
  pub fn for_theme(theme: Theme) -> Self { Self::for_dark(theme.is_dark()) }

  pub fn for_dark(dark: bool) -> Self {
    if dark {
      Self { fg: Color::Gray, bg: Color::Black, dim: Color::DarkGray, accent: Color::Cyan }
    } else {
      Self { fg: Color::Black, bg: Color::White, dim: Color::Gray, accent: Color::Blue }
    }
  }

  pub fn base(&self) -> Style { Style::default().fg(self.fg).bg(self.bg) }

  pub fn dimmed(&self) -> Style { Style::default().fg(self.dim).bg(self.bg) }
}

/// Terminal color for a subject's palette entry.
pub fn subject_style(subject: &str) -> Style {
  let color = match sumupper_core::palette::subject_color(subject) {
    SubjectColor::Amber => Color::Yellow,
    SubjectColor::Blue => Color::Blue,
    SubjectColor::Purple => Color::Magenta,
    SubjectColor::Green => Color::Green,
    SubjectColor::Emerald => Color::LightGreen,
    SubjectColor::Cyan => Color::Cyan,
    SubjectColor::Red => Color::Red,
    SubjectColor::Default => Color::DarkGray,
  };
  Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// `[H] historia  Title` as one line.
pub fn lesson_line<'a>(lesson: &'a Lesson, colors: Colors) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("[{}] ", lesson.subject_initial()), subject_style(&lesson.subject)),
    Span::styled(lesson.subject.as_str(), subject_style(&lesson.subject)),
    Span::raw("  "),
    Span::styled(lesson.display_title(), Style::default().fg(colors.fg)),
  ])
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let [header, body, status] = rows(f.area());
  let colors = Colors::for_theme(app.prefs.theme);
  f.render_widget(Block::default().style(colors.base()), f.area());

  draw_header(f, header, app);
  match app.screen {
    Screen::Week => week::draw(f, body, app, colors),
    Screen::Day => day::draw(f, body, app, colors),
    Screen::Archive => archive::draw(f, body, app, colors),
    Screen::Lesson => lesson::draw(f, body, app),
    Screen::Settings => settings::draw(f, body, app, colors),
  }
  draw_status(f, status, app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let s = app.strings();
  let tab = |label: &str, active: bool| {
    let style = if active {
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::White)
    };
    Span::styled(format!(" {label} "), style)
  };

  let left = Span::styled(
    format!(" {} ", s.lesson_calendar),
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{}  {} ", app.client.base_url(), app.language().label()),
    Style::default().fg(Color::Gray),
  );

  let on_calendar = matches!(app.screen, Screen::Week | Screen::Day);
  let mut spans = vec![
    left,
    Span::raw(" "),
    tab(s.calendar, on_calendar),
    tab(s.archive, app.screen == Screen::Archive),
    tab(s.settings, app.screen == Screen::Settings),
  ];

  let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(used)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::Archive if app.search_active => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    Screen::Week => (
      "WEEK",
      "←→/hl day  [ ] week  t today  Enter open  a archive  s settings  q quit",
    ),
    Screen::Day => ("DAY", "↑↓/jk select  ←→ day  Enter view  Esc back  q quit"),
    Screen::Archive => ("ARCHIVE", "Tab subject  / search  ↑↓/jk select  Enter view  Esc back"),
    Screen::Lesson => ("LESSON", "↑↓/jk scroll  d theme  Esc back  q quit"),
    Screen::Settings => ("SETTINGS", "↑↓/jk select  Enter change  Esc back  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}
