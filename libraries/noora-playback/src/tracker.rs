//! Reading tracker
//!
//! Maintains the bounded bookmark list and last-read markers consulted when
//! a session picks its starting verse. Pure in-memory state; persistence
//! happens through [`ReadingSnapshot`] load/flush at the orchestrator layer.

use noora_core::{BookmarkEntry, LastReadPosition, ReadingSnapshot};
use std::collections::HashMap;
use tracing::debug;

/// Bookmark and last-read tracking
///
/// Bookmarks are kept most-recent-first and capped; re-toggling an existing
/// bookmark removes it. Last-read markers are unconditional overwrites,
/// both per-surah and as a global "continue reading" position.
#[derive(Debug, Clone)]
pub struct ReadingTracker {
    bookmarks: Vec<BookmarkEntry>,
    last_read: HashMap<u32, u32>,
    global_last_read: Option<LastReadPosition>,
    capacity: usize,
}

impl ReadingTracker {
    /// Create an empty tracker with the given bookmark capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            bookmarks: Vec::new(),
            last_read: HashMap::new(),
            global_last_read: None,
            capacity,
        }
    }

    /// Rebuild a tracker from persisted state
    ///
    /// Bookmarks beyond `capacity` are dropped from the tail (oldest first).
    pub fn from_snapshot(snapshot: ReadingSnapshot, capacity: usize) -> Self {
        let mut bookmarks = snapshot.bookmarks;
        bookmarks.truncate(capacity);
        Self {
            bookmarks,
            last_read: snapshot.last_read,
            global_last_read: snapshot.global_last_read,
            capacity,
        }
    }

    /// Export the tracker's state for persistence
    pub fn snapshot(&self) -> ReadingSnapshot {
        ReadingSnapshot {
            bookmarks: self.bookmarks.clone(),
            last_read: self.last_read.clone(),
            global_last_read: self.global_last_read.clone(),
        }
    }

    /// Toggle a bookmark; returns whether the verse is now bookmarked
    ///
    /// Absent entries are inserted at the front, evicting the oldest entry
    /// past capacity. Present entries are removed (toggle-off).
    pub fn toggle_bookmark(&mut self, surah: u32, verse: u32) -> bool {
        if let Some(pos) = self.bookmarks.iter().position(|b| b.matches(surah, verse)) {
            self.bookmarks.remove(pos);
            debug!(surah, verse, "bookmark removed");
            return false;
        }

        self.bookmarks.insert(0, BookmarkEntry::new(surah, verse));
        while self.bookmarks.len() > self.capacity {
            self.bookmarks.pop();
        }
        debug!(surah, verse, "bookmark added");
        true
    }

    /// Whether the given position is bookmarked
    pub fn is_bookmarked(&self, surah: u32, verse: u32) -> bool {
        self.bookmarks.iter().any(|b| b.matches(surah, verse))
    }

    /// Most recently added bookmark, if any
    pub fn most_recent_bookmark(&self) -> Option<&BookmarkEntry> {
        self.bookmarks.first()
    }

    /// Most recent bookmark within a given surah, if any
    pub fn bookmark_for_surah(&self, surah: u32) -> Option<u32> {
        self.bookmarks
            .iter()
            .find(|b| b.surah == surah)
            .map(|b| b.verse)
    }

    /// All bookmarks, most-recent-first
    pub fn bookmarks(&self) -> &[BookmarkEntry] {
        &self.bookmarks
    }

    /// Overwrite the per-surah and global last-read markers
    pub fn set_last_read(&mut self, surah: u32, verse: u32, surah_name: &str) {
        self.last_read.insert(surah, verse);
        self.global_last_read = Some(LastReadPosition {
            surah,
            verse,
            surah_name: surah_name.to_string(),
        });
    }

    /// Last-read verse number for a surah, if one was recorded
    pub fn last_read_for_surah(&self, surah: u32) -> Option<u32> {
        self.last_read.get(&surah).copied()
    }

    /// Global most-recent reading position
    pub fn global_last_read(&self) -> Option<&LastReadPosition> {
        self.global_last_read.as_ref()
    }
}

impl Default for ReadingTracker {
    fn default() -> Self {
        Self::new(20)
    }
}
