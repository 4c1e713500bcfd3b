//! Noora Recitation Core
//!
//! Platform-agnostic domain types shared across the Noora Recitation
//! libraries.
//!
//! This crate defines:
//! - **Recitation Types**: [`Verse`], [`SurahInfo`], surah navigation helpers
//! - **Reading Types**: [`BookmarkEntry`], [`LastReadPosition`], [`ReadingSnapshot`]
//!
//! # Example
//!
//! ```rust
//! use noora_core::{SurahInfo, Verse};
//!
//! let surah = SurahInfo::new(1, "Al-Fatihah", 7);
//! let verse = Verse {
//!     number: 1,
//!     arabic: "بِسْمِ اللَّهِ".to_string(),
//!     transliteration: "Bismillāhi".to_string(),
//!     translation: "In the name of Allah".to_string(),
//!     audio_url: Some("https://cdn.example.com/1/1.mp3".to_string()),
//! };
//!
//! assert!(verse.has_audio());
//! assert_eq!(surah.verse_count, 7);
//! ```

#![forbid(unsafe_code)]

pub mod reading;
pub mod types;

// Re-export commonly used types
pub use reading::{BookmarkEntry, LastReadPosition, ReadingSnapshot};
pub use types::{next_surah, prev_surah, SurahInfo, Verse, SURAH_MAX, SURAH_MIN};
