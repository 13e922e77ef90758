//! The `upload` subcommand: publish one HTML lesson file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sumupper_core::{Language, week::parse_date};

use crate::client::{ApiClient, Upload};

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
  /// The lesson document (.html or .htm).
  pub file: PathBuf,

  /// Lesson date, YYYY-MM-DD.
  #[arg(long)]
  pub date: String,

  /// Subject, e.g. historia. Stored lowercase.
  #[arg(long)]
  pub subject: String,

  /// Lesson language: en, pl or fr.
  #[arg(long, default_value = "en")]
  pub language: String,

  /// Optional display title.
  #[arg(long)]
  pub title: Option<String>,

  /// Shared admin key.
  #[arg(long, env = "SUMUPPER_ADMIN_KEY", hide_env_values = true)]
  pub admin_key: String,
}

/// Whether `path` names an HTML document.
pub fn is_html_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

/// Check everything the server would reject before any bytes are sent.
pub fn build_upload(args: &UploadArgs, html: Vec<u8>) -> Result<Upload> {
  if !is_html_file(&args.file) {
    bail!("{} is not an HTML file (.html or .htm)", args.file.display());
  }
  if args.subject.trim().is_empty() {
    bail!("subject must not be empty");
  }
  let date = parse_date(args.date.trim())?;
  let language = Language::parse(&args.language)?;
  let file_name = args
    .file
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| "lesson.html".to_owned());

  Ok(Upload {
    date,
    subject: args.subject.clone(),
    language,
    title: args.title.clone().filter(|t| !t.trim().is_empty()),
    file_name,
    html,
  })
}

pub async fn run(client: &ApiClient, args: UploadArgs) -> Result<()> {
  let html = tokio::fs::read(&args.file)
    .await
    .with_context(|| format!("reading {}", args.file.display()))?;
  let upload = build_upload(&args, html)?;

  tracing::info!(date = %upload.date, subject = %upload.subject, "uploading lesson");
  let lesson = client.upload(&args.admin_key, upload).await?;
  println!("Uploaded {} ({})", lesson.html_path, lesson.id);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(file: &str, date: &str, language: &str) -> UploadArgs {
    UploadArgs {
      file:      PathBuf::from(file),
      date:      date.into(),
      subject:   "Historia".into(),
      language:  language.into(),
      title:     Some("  ".into()),
      admin_key: "k".into(),
    }
  }

  #[test]
  fn html_extension_is_required() {
    assert!(is_html_file(Path::new("lesson.HTML")));
    assert!(is_html_file(Path::new("dir/lesson.htm")));
    assert!(!is_html_file(Path::new("lesson.pdf")));
    assert!(!is_html_file(Path::new("lesson")));
    let err = build_upload(&args("notes.txt", "2024-01-01", "en"), Vec::new()).unwrap_err();
    assert!(err.to_string().contains("not an HTML file"));
  }

  #[test]
  fn fields_are_validated() {
    assert!(build_upload(&args("a.html", "2024-02-30", "en"), Vec::new()).is_err());
    assert!(build_upload(&args("a.html", "2024-01-01", "de"), Vec::new()).is_err());

    let upload = build_upload(&args("a.html", "2024-01-01", "PL"), b"<p/>".to_vec()).unwrap();
    assert_eq!(upload.language, Language::Pl);
    assert_eq!(upload.title, None);
    assert_eq!(upload.file_name, "a.html");
  }
}
