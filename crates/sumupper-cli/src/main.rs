//! `sumupper`: terminal client for the Sumupper lesson calendar.
//!
//! # Usage
//!
//! ```
//! sumupper --url http://localhost:8080
//! sumupper --config ~/.config/sumupper/config.toml
//! sumupper upload lesson.html --date 2024-01-03 --subject historia --language pl
//! ```

mod app;
mod client;
mod prefs_file;
mod text;
mod ui;
mod upload;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::ApiClient;
use crossterm::{
  event::{self, DisableMouseCapture, EnableMouseCapture, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use prefs_file::{TomlKv, default_prefs_path};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sumupper", about = "Terminal client for the Sumupper lesson calendar")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the sumupper server (default: http://localhost:8080).
  #[arg(long, env = "SUMUPPER_URL")]
  url: Option<String>,

  /// Where theme and language choices are kept.
  #[arg(long, value_name = "FILE")]
  prefs: Option<PathBuf>,

  /// Write logs to this file. The terminal is owned by the UI, so logging is
  /// off unless this is set.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Upload a lesson document.
  Upload(upload::UploadArgs),
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:   String,
  #[serde(default)]
  prefs: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
  let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    init_logging(path)?;
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  let client = ApiClient::new(base_url)?;

  if let Some(Command::Upload(upload_args)) = args.command {
    return upload::run(&client, upload_args).await;
  }

  let prefs_path = args
    .prefs
    .or(file_cfg.prefs)
    .unwrap_or_else(default_prefs_path);
  let kv = TomlKv::load(prefs_path.clone())
    .with_context(|| format!("reading preferences {}", prefs_path.display()))?;
  let today = chrono::Local::now().date_naive();
  let mut app = App::new(client, kv, today);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
    .context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data. A failed fetch is shown in the status bar.
  app.load_week().await;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    let frame = terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
    app.viewport = frame.area;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) => {
        if !app.handle_key(key).await? {
          break;
        }
      }
      Some(Event::Mouse(ev)) => app.handle_mouse(ev).await,
      // Terminal will redraw on next iteration.
      _ => {}
    }
  }

  Ok(())
}
