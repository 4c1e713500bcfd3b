//! Core types for the recitation controller

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback mode of the controller
///
/// The mode is a tagged union so illegal flag combinations cannot be
/// represented: a queued index exists only inside `Single`, and "session
/// active" is exactly the `Session` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Resting state; no audio handle is held
    None,

    /// One verse plays, then the controller returns to `None`
    /// (or to the queued verse, if one was requested meanwhile)
    Single {
        /// Index of the verse being played
        index: usize,
        /// Audio is audibly running (set on prepared, cleared on pause/complete)
        playing: bool,
        /// The underlying handle finished preparation
        prepared: bool,
        /// Verse index to play after the current one completes
        queued: Option<usize>,
    },

    /// Continuous playback that auto-advances through the verse sequence
    Session {
        /// Index of the verse being played
        index: usize,
        /// Audio is audibly running
        playing: bool,
        /// The underlying handle finished preparation
        prepared: bool,
    },
}

impl PlayMode {
    /// Discriminant for observers
    pub fn kind(&self) -> PlayModeKind {
        match self {
            PlayMode::None => PlayModeKind::None,
            PlayMode::Single { .. } => PlayModeKind::Single,
            PlayMode::Session { .. } => PlayModeKind::Session,
        }
    }

    /// Index of the verse the mode points at, if any
    pub fn index(&self) -> Option<usize> {
        match *self {
            PlayMode::None => None,
            PlayMode::Single { index, .. } | PlayMode::Session { index, .. } => Some(index),
        }
    }

    /// Whether audio is audibly running
    pub fn is_playing(&self) -> bool {
        match *self {
            PlayMode::None => false,
            PlayMode::Single { playing, .. } | PlayMode::Session { playing, .. } => playing,
        }
    }
}

/// Mode discriminant exposed to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayModeKind {
    /// Idle
    None,
    /// Single-verse playback
    Single,
    /// Continuous session playback
    Session,
}

/// Per-verse render flags, derived read-only state for list rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerseIndicators {
    /// This verse's audio is currently playing
    pub playing: bool,

    /// This verse carries the preview highlight
    pub previewed: bool,

    /// This verse is the surah's last-read position
    pub last_read: bool,

    /// This verse is bookmarked
    pub bookmarked: bool,
}

/// Configuration for the recitation controller
#[derive(Debug, Clone)]
pub struct RecitationConfig {
    /// Window during which scroll-settle events are treated as echoes of a
    /// programmatic scroll and ignored (default: 600ms)
    pub scroll_guard: Duration,

    /// Maximum number of bookmarks retained (default: 20)
    pub bookmark_capacity: usize,

    /// Available reciters; the first entry is selected initially
    pub reciters: Vec<String>,
}

impl Default for RecitationConfig {
    fn default() -> Self {
        Self {
            scroll_guard: Duration::from_millis(600),
            bookmark_capacity: 20,
            reciters: vec![
                "Misyari Rasyid".to_string(),
                "Abdul Basit".to_string(),
                "Mahmoud Khalil".to_string(),
                "Saad al-Ghamdi".to_string(),
            ],
        }
    }
}
