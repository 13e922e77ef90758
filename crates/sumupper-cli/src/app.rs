//! Application state machine and event dispatcher.

use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use sumupper_core::{
  Language, Lesson, LessonWithAssets,
  aggregate::{WeekAggregate, aggregate_week},
  filter::{ArchiveFilter, SubjectFacet, sorted_by_subject, subject_facets},
  gesture::{SwipeTracker, Target},
  i18n::Strings,
  prefs::Preferences,
  viewer::{FrameMessage, SYNC_SCRIPT, ThemeSync},
  week::{PageMove, Week, WeekPager},
};
use uuid::Uuid;

use crate::{client::ApiClient, prefs_file::TomlKv, text::document_lines, ui};

/// Swipe units per terminal column; a cell is roughly eight pixels wide.
pub const COLUMN_UNITS: f64 = 8.0;

// ─── Screen ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The seven-day calendar grid.
  Week,
  /// Lessons of one day, sorted by subject.
  Day,
  /// Every lesson, filterable by subject and title.
  Archive,
  /// One lesson: metadata, assets and the document.
  Lesson,
  /// Theme and language.
  Settings,
}

/// Rows of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
  Theme,
  Language,
}

pub const SETTINGS_ROWS: [SettingsRow; 2] = [SettingsRow::Theme, SettingsRow::Language];

/// What a mouse gesture on the week grid asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
  Page(PageMove),
  OpenDay(NaiveDate),
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Where `Esc` from the lesson viewer returns to.
  pub return_to: Screen,

  pub prefs: Preferences,
  kv:        TomlKv,

  pub today: NaiveDate,
  pub pager: WeekPager,
  pub swipe: SwipeTracker,

  /// The last successfully fetched week, unfiltered.
  pub week_lessons: Vec<Lesson>,

  /// `week_lessons` grouped per day for the active language.
  pub aggregate: WeekAggregate,

  /// Highlighted day in the grid, `0` = Monday.
  pub day_cursor: usize,

  /// Cursor within the day list or the archive list.
  pub list_cursor: usize,

  pub archive:        Vec<Lesson>,
  pub archive_filter: ArchiveFilter,
  /// Whether the user is typing an archive search query.
  pub search_active:  bool,

  pub lesson:        Option<LessonWithAssets>,
  pub document:      Vec<String>,
  pub document_dark: bool,
  pub lesson_scroll: usize,
  pub theme_sync:    ThemeSync,

  pub settings_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Last drawn frame area, for mouse hit-testing.
  pub viewport: Rect,
  press_at:     Option<(u16, u16)>,

  pub client: ApiClient,
}

impl App {
  pub fn new(client: ApiClient, kv: TomlKv, today: NaiveDate) -> Self {
    let prefs = Preferences::load(&kv);
    let pager = WeekPager::new(today);
    Self {
      screen: Screen::Week,
      return_to: Screen::Week,
      prefs,
      kv,
      today,
      pager,
      swipe: SwipeTracker::default(),
      week_lessons: Vec::new(),
      aggregate: aggregate_week(pager.week(), &[], prefs.language),
      day_cursor: today.signed_duration_since(pager.week().start()).num_days() as usize,
      list_cursor: 0,
      archive: Vec::new(),
      archive_filter: ArchiveFilter::default(),
      search_active: false,
      lesson: None,
      document: Vec::new(),
      document_dark: false,
      lesson_scroll: 0,
      theme_sync: ThemeSync::new(prefs.theme.is_dark()),
      settings_cursor: 0,
      status_msg: String::new(),
      viewport: Rect::default(),
      press_at: None,
      client,
    }
  }

  pub fn language(&self) -> Language { self.prefs.language }

  pub fn strings(&self) -> &'static Strings { self.prefs.language.strings() }

  pub fn week(&self) -> Week { self.pager.week() }

  /// Where preferences are persisted.
  pub fn prefs_path(&self) -> &Path { self.kv.path() }

  /// The day under the grid cursor.
  pub fn selected_date(&self) -> NaiveDate {
    self
      .week()
      .days()
      .nth(self.day_cursor)
      .unwrap_or_else(|| self.week().start())
  }

  /// Lessons of the selected day, visible in the active language, by subject.
  pub fn day_lessons(&self) -> Vec<&Lesson> {
    sorted_by_subject(self.aggregate.day(self.selected_date()))
  }

  /// Archive lessons passing the language, subject and search filters.
  pub fn visible_archive(&self) -> Vec<&Lesson> {
    self.archive_filter.apply(&self.archive, self.language())
  }

  pub fn facets(&self) -> Vec<String> { subject_facets(&self.archive, self.language()) }

  fn reaggregate(&mut self) {
    self.aggregate = aggregate_week(self.week(), &self.week_lessons, self.language());
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the pager's current week. On failure the previous lessons are
  /// kept and the status bar says so.
  pub async fn load_week(&mut self) {
    self.status_msg = self.strings().loading.into();
    match self.client.week(self.week().start()).await {
      Ok(lessons) => {
        self.week_lessons = lessons;
        self.reaggregate();
        self.status_msg.clear();
      }
      Err(e) => {
        tracing::warn!(start = %self.week().start(), error = %e, "week fetch failed");
        self.status_msg = format!("{}: {e}", self.strings().failed_to_load);
      }
    }
  }

  async fn load_archive(&mut self) {
    self.status_msg = self.strings().loading.into();
    match self.client.archive().await {
      Ok(lessons) => {
        self.archive = lessons;
        self.list_cursor = 0;
        self.status_msg.clear();
      }
      Err(e) => {
        tracing::warn!(error = %e, "archive fetch failed");
        self.status_msg = format!("{}: {e}", self.strings().no_lessons_found);
      }
    }
  }

  /// Open the viewer for `id`, fetching the lesson and then its document.
  async fn open_lesson(&mut self, id: Uuid) {
    self.status_msg = self.strings().loading.into();
    let lesson = match self.client.lesson(id).await {
      Ok(lesson) => lesson,
      Err(e) => {
        tracing::warn!(%id, error = %e, "lesson fetch failed");
        self.status_msg = format!("{}: {e}", self.strings().failed_to_load);
        return;
      }
    };

    match self.client.lesson_file(&lesson.lesson.html_path).await {
      Ok(html) => self.show_document(&html),
      Err(e) => {
        tracing::warn!(path = %lesson.lesson.html_path, error = %e, "lesson file fetch failed");
        self.document = vec![self.strings().failed_to_load.to_owned()];
        self.document_dark = false;
      }
    }

    self.lesson = Some(lesson);
    self.lesson_scroll = 0;
    self.return_to = self.screen;
    self.screen = Screen::Lesson;
    self.status_msg.clear();
  }

  /// Render a prepared document. A document carrying the sync script
  /// announces itself on load and is answered with the current theme;
  /// anything else stays light.
  pub fn show_document(&mut self, html: &str) {
    self.document = document_lines(html);
    self.document_dark = false;
    if html.contains(SYNC_SCRIPT.trim())
      && let Some(FrameMessage::ThemeUpdate { dark_mode }) =
        self.theme_sync.on_message(FrameMessage::LoadedNotice)
    {
      self.document_dark = dark_mode;
    }
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  pub fn toggle_theme(&mut self) {
    match self.prefs.toggle_theme(&mut self.kv) {
      Ok(theme) => {
        if let FrameMessage::ThemeUpdate { dark_mode } = self.theme_sync.on_theme_change(theme.is_dark())
        {
          self.document_dark = dark_mode;
        }
      }
      Err(e) => self.status_msg = format!("{}: {e}", self.strings().settings),
    }
  }

  pub fn cycle_language(&mut self) {
    let next = self.language().cycle();
    if let Err(e) = self.prefs.set_language(&mut self.kv, next) {
      self.status_msg = format!("{}: {e}", self.strings().settings);
    }
    self.reaggregate();
    self.archive_filter.subject = SubjectFacet::All;
    self.list_cursor = 0;
  }

  /// Advance the archive's subject facet: All → each subject → All.
  pub fn cycle_facet(&mut self, forward: bool) {
    let facets = self.facets();
    let mut options = vec![SubjectFacet::All];
    options.extend(facets.into_iter().map(SubjectFacet::Exact));
    let idx = options
      .iter()
      .position(|f| *f == self.archive_filter.subject)
      .unwrap_or(0);
    let len = options.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    self.archive_filter.subject = options.swap_remove(next);
    self.list_cursor = 0;
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  pub async fn page(&mut self, mv: PageMove) {
    self.pager.apply(mv);
    self.load_week().await;
  }

  async fn goto_today(&mut self) {
    self.pager = WeekPager::new(self.today);
    self.day_cursor = self.today.signed_duration_since(self.week().start()).num_days() as usize;
    self.load_week().await;
  }

  fn open_day(&mut self, date: NaiveDate) {
    if let Some(idx) = self.week().days().position(|d| d == date) {
      self.day_cursor = idx;
      self.list_cursor = 0;
      self.screen = Screen::Day;
    }
  }

  // ── Mouse ─────────────────────────────────────────────────────────────────

  /// Interpret a mouse event on the week grid. Presses on the `[◀]`/`[▶]`
  /// controls page immediately and never start a swipe.
  pub fn on_mouse(&mut self, ev: MouseEvent) -> Option<MouseAction> {
    if self.screen != Screen::Week {
      return None;
    }
    let x = f64::from(ev.column) * COLUMN_UNITS;
    let layout = ui::week::layout(ui::body_area(self.viewport));
    match ev.kind {
      MouseEventKind::Down(MouseButton::Left) => {
        self.press_at = Some((ev.column, ev.row));
        if let Some(mv) = layout.control_at(ev.column, ev.row) {
          self.swipe.press(x, Target::Control);
          return Some(MouseAction::Page(mv));
        }
        self.swipe.press(x, Target::Surface);
        None
      }
      MouseEventKind::Drag(MouseButton::Left) => {
        self.swipe.drag(x);
        None
      }
      MouseEventKind::Up(MouseButton::Left) => {
        let pressed = self.press_at.take();
        if let Some(mv) = self.swipe.release(x) {
          return Some(MouseAction::Page(mv));
        }
        match pressed {
          Some(at) if at == (ev.column, ev.row) => layout
            .day_at(ev.column, ev.row)
            .and_then(|idx| self.week().days().nth(idx))
            .map(MouseAction::OpenDay),
          _ => None,
        }
      }
      _ => None,
    }
  }

  pub async fn handle_mouse(&mut self, ev: MouseEvent) {
    match self.on_mouse(ev) {
      Some(MouseAction::Page(mv)) => self.page(mv).await,
      Some(MouseAction::OpenDay(date)) => self.open_day(date),
      None => {}
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.search_active {
      self.handle_search_key(key);
      return Ok(true);
    }

    if key.code == KeyCode::Char('q') {
      return Ok(false);
    }

    match self.screen {
      Screen::Week => self.handle_week_key(key).await,
      Screen::Day => self.handle_day_key(key).await,
      Screen::Archive => self.handle_archive_key(key).await,
      Screen::Lesson => self.handle_lesson_key(key),
      Screen::Settings => self.handle_settings_key(key),
    }
    Ok(true)
  }

  async fn handle_week_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Left | KeyCode::Char('h') => self.day_cursor = self.day_cursor.saturating_sub(1),
      KeyCode::Right | KeyCode::Char('l') => {
        self.day_cursor = (self.day_cursor + 1).min(Week::LENGTH as usize - 1);
      }
      KeyCode::Char('[') | KeyCode::PageUp => self.page(PageMove::Prev).await,
      KeyCode::Char(']') | KeyCode::PageDown => self.page(PageMove::Next).await,
      KeyCode::Char('t') => self.goto_today().await,
      KeyCode::Char('r') => self.load_week().await,
      KeyCode::Enter => self.open_day(self.selected_date()),
      KeyCode::Char('a') => {
        self.screen = Screen::Archive;
        self.load_archive().await;
      }
      KeyCode::Char('s') => self.screen = Screen::Settings,
      _ => {}
    }
  }

  async fn handle_day_key(&mut self, key: KeyEvent) {
    let len = self.day_lessons().len();
    match key.code {
      KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::Week,
      KeyCode::Down | KeyCode::Char('j') if self.list_cursor + 1 < len => self.list_cursor += 1,
      KeyCode::Up | KeyCode::Char('k') => self.list_cursor = self.list_cursor.saturating_sub(1),
      KeyCode::Left | KeyCode::Char('h') => {
        self.day_cursor = self.day_cursor.saturating_sub(1);
        self.list_cursor = 0;
      }
      KeyCode::Right | KeyCode::Char('l') => {
        self.day_cursor = (self.day_cursor + 1).min(Week::LENGTH as usize - 1);
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        if let Some(id) = self.day_lessons().get(self.list_cursor).map(|l| l.id) {
          self.open_lesson(id).await;
        }
      }
      _ => {}
    }
  }

  async fn handle_archive_key(&mut self, key: KeyEvent) {
    let len = self.visible_archive().len();
    match key.code {
      KeyCode::Esc => self.screen = Screen::Week,
      KeyCode::Tab => self.cycle_facet(true),
      KeyCode::BackTab => self.cycle_facet(false),
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Char('r') => self.load_archive().await,
      KeyCode::Down | KeyCode::Char('j') if self.list_cursor + 1 < len => self.list_cursor += 1,
      KeyCode::Up | KeyCode::Char('k') => self.list_cursor = self.list_cursor.saturating_sub(1),
      KeyCode::Enter => {
        if let Some(id) = self.visible_archive().get(self.list_cursor).map(|l| l.id) {
          self.open_lesson(id).await;
        }
      }
      _ => {}
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.archive_filter.search.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.archive_filter.search.pop();
      }
      KeyCode::Char(c) => self.archive_filter.search.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  fn handle_lesson_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
        self.screen = self.return_to;
        self.lesson = None;
        self.document.clear();
      }
      KeyCode::Down | KeyCode::Char('j') if self.lesson_scroll + 1 < self.document.len() => {
        self.lesson_scroll += 1;
      }
      KeyCode::Up | KeyCode::Char('k') => self.lesson_scroll = self.lesson_scroll.saturating_sub(1),
      KeyCode::Char('d') => self.toggle_theme(),
      _ => {}
    }
  }

  fn handle_settings_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.screen = Screen::Week,
      KeyCode::Down | KeyCode::Char('j') => {
        self.settings_cursor = (self.settings_cursor + 1).min(SETTINGS_ROWS.len() - 1);
      }
      KeyCode::Up | KeyCode::Char('k') => self.settings_cursor = self.settings_cursor.saturating_sub(1),
      KeyCode::Enter | KeyCode::Char(' ') => match SETTINGS_ROWS[self.settings_cursor] {
        SettingsRow::Theme => self.toggle_theme(),
        SettingsRow::Language => self.cycle_language(),
      },
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use crossterm::event::KeyModifiers;
  use sumupper_core::{LessonKey, prefs::Theme, week::parse_date};

  use super::*;

  fn lesson(date: &str, subject: &str, language: &str, title: &str) -> Lesson {
    let date = parse_date(date).unwrap();
    Lesson {
      id: Uuid::new_v4(),
      date,
      subject: subject.into(),
      language: Some(language.into()),
      title: Some(title.into()),
      html_path: format!("{subject}/{date}/{language}.html"),
      lesson_key: LessonKey::new(subject, date),
      created_by: Some("admin".into()),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  fn app(dir: &tempfile::TempDir) -> App {
    let kv = TomlKv::load(dir.path().join("prefs.toml")).unwrap();
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let mut app = App::new(client, kv, parse_date("2024-01-03").unwrap());
    app.viewport = Rect::new(0, 0, 140, 30);
    app
  }

  fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
  }

  #[test]
  fn starts_on_the_current_week() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);
    assert_eq!(app.week().start(), parse_date("2024-01-01").unwrap());
    assert_eq!(app.selected_date(), parse_date("2024-01-03").unwrap());
  }

  #[test]
  fn day_lessons_follow_language_and_subject_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    app.week_lessons = vec![
      lesson("2024-01-03", "matematyka", "en", "Fractions"),
      lesson("2024-01-03", "biologia", "en", "Cells"),
      lesson("2024-01-03", "chemia", "pl", "Wiązania"),
    ];
    app.reaggregate();

    let subjects: Vec<&str> = app.day_lessons().iter().map(|l| l.subject.as_str()).collect();
    assert_eq!(subjects, ["biologia", "matematyka"]);

    app.cycle_language();
    let subjects: Vec<&str> = app.day_lessons().iter().map(|l| l.subject.as_str()).collect();
    assert_eq!(subjects, ["chemia"]);
  }

  #[test]
  fn facets_cycle_through_all() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    app.archive = vec![
      lesson("2024-01-02", "historia", "en", "WWII"),
      lesson("2024-01-01", "fizyka", "en", "Optics"),
    ];

    app.cycle_facet(true);
    assert_eq!(app.archive_filter.subject, SubjectFacet::Exact("historia".into()));
    assert_eq!(app.visible_archive().len(), 1);
    app.cycle_facet(true);
    app.cycle_facet(true);
    assert_eq!(app.archive_filter.subject, SubjectFacet::All);
    app.cycle_facet(false);
    assert_eq!(app.archive_filter.subject, SubjectFacet::Exact("fizyka".into()));
  }

  #[tokio::test]
  async fn search_mode_captures_typing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    app.screen = Screen::Archive;
    app.archive = vec![
      lesson("2024-01-02", "historia", "en", "WWII"),
      lesson("2024-01-01", "historia", "en", "Rome"),
    ];

    for code in [KeyCode::Char('/'), KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Enter] {
      assert!(app.handle_key(KeyEvent::from(code)).await.unwrap());
    }
    assert_eq!(app.archive_filter.search, "wW");
    assert_eq!(app.visible_archive().len(), 1);

    // 'q' while searching is text, not quit.
    app.handle_key(KeyEvent::from(KeyCode::Char('/'))).await.unwrap();
    assert!(app.handle_key(KeyEvent::from(KeyCode::Char('q'))).await.unwrap());
    app.handle_key(KeyEvent::from(KeyCode::Esc)).await.unwrap();
    assert!(app.archive_filter.search.is_empty());
  }

  #[test]
  fn leftward_drag_pages_forward() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    let grid_row = 10;
    assert_eq!(app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, grid_row)), None);
    app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, grid_row));
    assert_eq!(
      app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30, grid_row)),
      Some(MouseAction::Page(PageMove::Next))
    );
  }

  #[test]
  fn short_drag_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 10));
    assert_eq!(app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 55, 10)), None);
  }

  #[test]
  fn gesture_from_a_control_never_swipes() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    let layout = ui::week::layout(ui::body_area(app.viewport));
    let (col, row) = (layout.prev.x, layout.prev.y);

    assert_eq!(
      app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), col, row)),
      Some(MouseAction::Page(PageMove::Prev))
    );
    assert_eq!(app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), col + 60, row + 5)), None);
  }

  #[test]
  fn click_opens_the_day_under_the_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    let layout = ui::week::layout(ui::body_area(app.viewport));
    let friday = layout.days[4];
    let (col, row) = (friday.x + 1, friday.y + 1);

    app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), col, row));
    assert_eq!(
      app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), col, row)),
      Some(MouseAction::OpenDay(parse_date("2024-01-05").unwrap()))
    );
  }

  #[test]
  fn theme_reaches_the_open_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(&dir);
    app.toggle_theme();
    assert_eq!(app.prefs.theme, Theme::Dark);

    let prepared =
      sumupper_core::viewer::prepare_lesson_document("<html><body><p>x</p></body></html>");
    app.show_document(&prepared);
    assert!(app.document_dark);
    assert_eq!(app.document, ["x"]);

    app.toggle_theme();
    assert!(!app.document_dark);

    app.show_document("<p>no script</p>");
    assert!(!app.document_dark);
  }

  #[test]
  fn settings_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    {
      let mut first = app(&dir);
      first.cycle_language();
      first.toggle_theme();
    }
    let second = app(&dir);
    assert_eq!(second.language(), Language::Pl);
    assert_eq!(second.prefs.theme, Theme::Dark);
  }
}
