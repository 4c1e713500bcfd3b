//! Reading-progress value types
//!
//! Bookmarks and last-read markers are exchanged between the playback
//! controller and the storage layer as plain values; [`ReadingSnapshot`]
//! is the unit of explicit load/flush.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user-pinned (surah, verse) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    /// Surah number
    pub surah: u32,

    /// Verse number within the surah
    pub verse: u32,

    /// When the bookmark was created
    pub created_at: DateTime<Utc>,
}

impl BookmarkEntry {
    /// Create a bookmark stamped with the current time
    pub fn new(surah: u32, verse: u32) -> Self {
        Self {
            surah,
            verse,
            created_at: Utc::now(),
        }
    }

    /// Whether this entry points at the given position
    pub fn matches(&self, surah: u32, verse: u32) -> bool {
        self.surah == surah && self.verse == verse
    }
}

/// The most recent reading position across all surahs
///
/// Carries the surah display name so a "continue reading" affordance can
/// render without a metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastReadPosition {
    /// Surah number
    pub surah: u32,

    /// Verse number within the surah
    pub verse: u32,

    /// Surah display name at the time the marker was written
    pub surah_name: String,
}

/// Serializable aggregate of all reading-progress state
///
/// Loaded once when a reading screen opens and flushed after mutations;
/// the in-memory tracker never talks to the persistence layer directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSnapshot {
    /// Bookmarks, most-recent-first
    pub bookmarks: Vec<BookmarkEntry>,

    /// Per-surah last-read verse numbers
    pub last_read: HashMap<u32, u32>,

    /// Global most-recent reading position
    pub global_last_read: Option<LastReadPosition>,
}
