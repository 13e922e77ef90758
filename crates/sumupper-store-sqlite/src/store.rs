//! [`SqliteStore`]: the SQLite implementation of [`LessonStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use sumupper_core::{
  Lesson, LessonAsset, LessonKey, NewLesson,
  lesson::NewAsset,
  store::LessonStore,
};

use crate::{
  Error, Result,
  encode::{ASSET_COLUMNS, LESSON_COLUMNS, RawAsset, RawLesson, encode_date, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lesson store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT {LESSON_COLUMNS} ...` query and decode every row.
  async fn query_lessons(&self, sql: String, params: Vec<String>) -> Result<Vec<Lesson>> {
    let raws: Vec<RawLesson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawLesson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLesson::into_lesson).collect()
  }

  async fn lesson_key_exists(&self, key: &LessonKey) -> Result<bool> {
    let key_str = key.as_str().to_owned();
    let exists = self
      .conn
      .call(move |conn| {
        let found = conn
          .query_row(
            "SELECT 1 FROM lessons WHERE lesson_key = ?1 LIMIT 1",
            rusqlite::params![key_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(found)
      })
      .await?;
    Ok(exists)
  }
}

// ─── LessonStore impl ────────────────────────────────────────────────────────

impl LessonStore for SqliteStore {
  type Error = Error;

  async fn upsert_lesson(&self, input: NewLesson) -> Result<Lesson> {
    let now = encode_dt(Utc::now());
    let id_str = encode_uuid(Uuid::new_v4());
    let date_str = encode_date(input.date);
    let html_path = input.html_path();
    let lesson_key = input.lesson_key().as_str().to_owned();
    let language = input.language.code().to_owned();
    let NewLesson {
      subject,
      title,
      created_by,
      ..
    } = input;

    let raw: RawLesson = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "INSERT INTO lessons (
             id, date, subject, language, title,
             html_path, lesson_key, created_by, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
           ON CONFLICT (html_path) DO UPDATE SET
             title      = excluded.title,
             created_by = excluded.created_by,
             updated_at = excluded.updated_at
           RETURNING {LESSON_COLUMNS}"
        );
        let row = conn.query_row(
          &sql,
          rusqlite::params![
            id_str, date_str, subject, language, title, html_path, lesson_key, created_by, now,
          ],
          RawLesson::from_row,
        )?;
        Ok(row)
      })
      .await?;

    let lesson = raw.into_lesson()?;
    tracing::debug!(id = %lesson.id, path = %lesson.html_path, "lesson upserted");
    Ok(lesson)
  }

  async fn add_asset(&self, input: NewAsset) -> Result<LessonAsset> {
    if !self.lesson_key_exists(&input.lesson_key).await? {
      return Err(Error::UnknownLessonKey(input.lesson_key.to_string()));
    }

    let asset = LessonAsset {
      id:         Uuid::new_v4(),
      lesson_key: input.lesson_key,
      path:       input.path,
      asset_type: input.asset_type,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(asset.id);
    let key_str = asset.lesson_key.as_str().to_owned();
    let path = asset.path.clone();
    let asset_type = asset.asset_type.clone();
    let at_str = encode_dt(asset.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO lesson_assets (id, lesson_key, path, type, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, key_str, path, asset_type, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(asset)
  }

  async fn get_lesson(&self, id: Uuid) -> Result<Option<Lesson>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawLesson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ?1"),
              rusqlite::params![id_str],
              RawLesson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLesson::into_lesson).transpose()
  }

  async fn lessons_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Lesson>> {
    self
      .query_lessons(
        format!(
          "SELECT {LESSON_COLUMNS} FROM lessons
           WHERE date BETWEEN ?1 AND ?2
           ORDER BY date ASC, created_at ASC"
        ),
        vec![encode_date(start), encode_date(end)],
      )
      .await
  }

  async fn list_lessons(&self) -> Result<Vec<Lesson>> {
    self
      .query_lessons(
        format!("SELECT {LESSON_COLUMNS} FROM lessons ORDER BY date DESC, created_at DESC"),
        Vec::new(),
      )
      .await
  }

  async fn assets_for(&self, key: &LessonKey) -> Result<Vec<LessonAsset>> {
    let key_str = key.as_str().to_owned();
    let raws: Vec<RawAsset> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ASSET_COLUMNS} FROM lesson_assets
           WHERE lesson_key = ?1
           ORDER BY created_at ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![key_str], RawAsset::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAsset::into_asset).collect()
  }
}
