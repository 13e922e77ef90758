//! Integration tests for `SqliteStore` against an in-memory database.

use sumupper_core::{
  Language, LessonKey, NewLesson, Week,
  lesson::NewAsset,
  store::{LessonStore, week_lessons},
  week::parse_date,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn lesson(date: &str, subject: &str, language: Language) -> NewLesson {
  NewLesson::new(parse_date(date).unwrap(), subject, language).unwrap()
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_lesson() {
  let s = store().await;

  let created = s
    .upsert_lesson(lesson("2024-01-03", "historia", Language::Pl).with_title(Some("WWII".into())))
    .await
    .unwrap();
  assert_eq!(created.subject, "historia");
  assert_eq!(created.language.as_deref(), Some("pl"));
  assert_eq!(created.html_path, "historia/2024-01-03/pl.html");
  assert_eq!(created.lesson_key.as_str(), "historia_2024-01-03");
  assert_eq!(created.created_by.as_deref(), Some("admin"));

  let fetched = s.get_lesson(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_lesson_missing_returns_none() {
  let s = store().await;
  assert!(s.get_lesson(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn reupload_updates_in_place() {
  let s = store().await;

  let first = s
    .upsert_lesson(lesson("2024-01-01", "historia", Language::En).with_title(Some("Draft".into())))
    .await
    .unwrap();
  let second = s
    .upsert_lesson(lesson("2024-01-01", "Historia", Language::En).with_title(Some("Final".into())))
    .await
    .unwrap();

  assert_eq!(second.id, first.id);
  assert_eq!(second.created_at, first.created_at);
  assert!(second.updated_at >= first.updated_at);
  assert_eq!(second.title.as_deref(), Some("Final"));

  let all = s.list_lessons().await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn languages_are_separate_rows() {
  let s = store().await;
  let en = s.upsert_lesson(lesson("2024-01-01", "historia", Language::En)).await.unwrap();
  let fr = s.upsert_lesson(lesson("2024-01-01", "historia", Language::Fr)).await.unwrap();

  assert_ne!(en.id, fr.id);
  assert_eq!(en.lesson_key, fr.lesson_key);
  assert_eq!(s.list_lessons().await.unwrap().len(), 2);
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn range_is_inclusive_and_ascending() {
  let s = store().await;
  for date in ["2024-01-08", "2024-01-01", "2023-12-31", "2024-01-07", "2024-01-03"] {
    s.upsert_lesson(lesson(date, "fizyka", Language::En)).await.unwrap();
  }

  let found = s
    .lessons_between(parse_date("2024-01-01").unwrap(), parse_date("2024-01-07").unwrap())
    .await
    .unwrap();
  let dates: Vec<String> = found.iter().map(|l| l.date.to_string()).collect();
  assert_eq!(dates, ["2024-01-01", "2024-01-03", "2024-01-07"]);
}

#[tokio::test]
async fn week_query_returns_only_that_week() {
  let s = store().await;
  s.upsert_lesson(lesson("2024-01-03", "historia", Language::En)).await.unwrap();
  s.upsert_lesson(lesson("2024-01-01", "chemia", Language::Pl)).await.unwrap();
  s.upsert_lesson(lesson("2024-01-10", "historia", Language::En)).await.unwrap();

  let week = Week::starting(parse_date("2024-01-01").unwrap());
  let found = week_lessons(&s, week).await.unwrap();
  assert_eq!(found.len(), 2);
  assert!(found.iter().all(|l| week.contains(l.date)));
  assert!(found.windows(2).all(|w| w[0].date <= w[1].date));
}

#[tokio::test]
async fn empty_week_is_empty() {
  let s = store().await;
  let week = Week::starting(parse_date("2030-06-03").unwrap());
  assert!(week_lessons(&s, week).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  for date in ["2024-01-02", "2024-03-01", "2023-09-15"] {
    s.upsert_lesson(lesson(date, "biologia", Language::Fr)).await.unwrap();
  }
  let all = s.list_lessons().await.unwrap();
  let dates: Vec<String> = all.iter().map(|l| l.date.to_string()).collect();
  assert_eq!(dates, ["2024-03-01", "2024-01-02", "2023-09-15"]);
}

// ─── Assets ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn assets_are_keyed_by_subject_and_date() {
  let s = store().await;
  let en = s.upsert_lesson(lesson("2024-01-01", "historia", Language::En)).await.unwrap();

  s.add_asset(NewAsset {
    lesson_key: en.lesson_key.clone(),
    path:       "historia/2024-01-01/worksheet.pdf".into(),
    asset_type: "pdf".into(),
  })
  .await
  .unwrap();
  s.add_asset(NewAsset {
    lesson_key: en.lesson_key.clone(),
    path:       "historia/2024-01-01/slides.pptx".into(),
    asset_type: "pptx".into(),
  })
  .await
  .unwrap();

  let assets = s.assets_for(&en.lesson_key).await.unwrap();
  assert_eq!(assets.len(), 2);
  assert_eq!(assets[0].asset_type, "pdf");

  let other = LessonKey::from_raw("fizyka_2024-01-01");
  assert!(s.assets_for(&other).await.unwrap().is_empty());
}

#[tokio::test]
async fn asset_for_unknown_key_is_rejected() {
  let s = store().await;
  let result = s
    .add_asset(NewAsset {
      lesson_key: LessonKey::from_raw("nothing_2024-01-01"),
      path:       "x.pdf".into(),
      asset_type: "pdf".into(),
    })
    .await;
  assert!(matches!(result, Err(Error::UnknownLessonKey(_))));
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_lessons() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("lessons.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert_lesson(lesson("2024-01-05", "geografia", Language::En)).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.get_lesson(id).await.unwrap().is_some());
}
