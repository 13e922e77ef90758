//! Async HTTP client wrapping the Sumupper JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use reqwest::{
  Client, Response,
  multipart::{Form, Part},
};
use serde::Deserialize;
use sumupper_core::{Language, Lesson, LessonWithAssets, week::format_date};
use uuid::Uuid;

/// Async HTTP client for the Sumupper API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

/// A lesson upload, mirroring the admin form.
#[derive(Debug)]
pub struct Upload {
  pub date:      NaiveDate,
  pub subject:   String,
  pub language:  Language,
  pub title:     Option<String>,
  pub file_name: String,
  pub html:      Vec<u8>,
}

#[derive(Deserialize)]
struct UploadResponse {
  lesson: Lesson,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Turn a non-2xx response into an error carrying the server's message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_default();
    Err(anyhow!("{what} → {status} {message}"))
  }

  // ── Public ────────────────────────────────────────────────────────────────

  /// `GET /api/public/weeks?start=<date>`
  pub async fn week(&self, start: NaiveDate) -> Result<Vec<Lesson>> {
    let resp = self
      .client
      .get(self.url("/public/weeks"))
      .query(&[("start", format_date(start))])
      .send()
      .await
      .context("GET /public/weeks failed")?;
    Self::check(resp, "GET /public/weeks")
      .await?
      .json()
      .await
      .context("deserialising week")
  }

  /// `GET /api/public/lessons`
  pub async fn archive(&self) -> Result<Vec<Lesson>> {
    let resp = self
      .client
      .get(self.url("/public/lessons"))
      .send()
      .await
      .context("GET /public/lessons failed")?;
    Self::check(resp, "GET /public/lessons")
      .await?
      .json()
      .await
      .context("deserialising archive")
  }

  /// `GET /api/public/lesson?id=<id>`
  pub async fn lesson(&self, id: Uuid) -> Result<LessonWithAssets> {
    let resp = self
      .client
      .get(self.url("/public/lesson"))
      .query(&[("id", id.to_string())])
      .send()
      .await
      .context("GET /public/lesson failed")?;
    Self::check(resp, "GET /public/lesson")
      .await?
      .json()
      .await
      .context("deserialising lesson")
  }

  /// `GET /api/public/lesson-file?path=<path>`
  pub async fn lesson_file(&self, path: &str) -> Result<String> {
    let resp = self
      .client
      .get(self.url("/public/lesson-file"))
      .query(&[("path", path)])
      .send()
      .await
      .context("GET /public/lesson-file failed")?;
    Self::check(resp, "GET /public/lesson-file")
      .await?
      .text()
      .await
      .context("reading lesson file")
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `POST /api/admin/upload-lesson`
  pub async fn upload(&self, admin_key: &str, upload: Upload) -> Result<Lesson> {
    let file = Part::bytes(upload.html)
      .file_name(upload.file_name)
      .mime_str("text/html")
      .context("building file part")?;
    let mut form = Form::new()
      .text("date", format_date(upload.date))
      .text("subject", upload.subject)
      .text("language", upload.language.code())
      .part("file", file);
    if let Some(title) = upload.title {
      form = form.text("title", title);
    }

    let resp = self
      .client
      .post(self.url("/admin/upload-lesson"))
      .header("x-admin-key", admin_key)
      .multipart(form)
      .send()
      .await
      .context("POST /admin/upload-lesson failed")?;
    let body: UploadResponse = Self::check(resp, "POST /admin/upload-lesson")
      .await?
      .json()
      .await
      .context("deserialising upload response")?;
    Ok(body.lesson)
  }
}
