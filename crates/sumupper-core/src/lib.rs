//! Core types and pure logic for the Sumupper lesson calendar.
//!
//! This crate has no HTTP or database dependencies. The
//! API, the SQLite store and the terminal client all depend on it; it owns
//! the week math, the aggregation and filtering pipeline, and the storage
//! abstractions the other crates implement.

// Native `async fn` in traits; silence the advisory lint about `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod blob;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod i18n;
pub mod language;
pub mod lesson;
pub mod palette;
pub mod prefs;
pub mod store;
pub mod viewer;
pub mod week;

pub use error::{Error, Result};
pub use language::Language;
pub use lesson::{Lesson, LessonAsset, LessonKey, LessonWithAssets, NewLesson};
pub use week::Week;
