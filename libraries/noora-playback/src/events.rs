//! Recitation Events
//!
//! Event-based communication for UI synchronization. Events are pushed into
//! a pending queue as transitions happen and drained by the UI layer after
//! each entry-point call:
//! - Mode/playing changes
//! - Verse start/finish
//! - Scroll-to-position advisories during a session
//! - Transient user-facing notices (fire-and-forget)

use crate::types::PlayModeKind;
use serde::{Deserialize, Serialize};

/// Events emitted by the recitation controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecitationEvent {
    /// Playback mode or playing flag changed
    StateChanged {
        /// The new mode discriminant
        mode: PlayModeKind,
        /// Whether audio is audibly running
        playing: bool,
    },

    /// A verse's audio actually started (backend finished preparation)
    VerseStarted {
        /// Index into the loaded verse sequence
        index: usize,
        /// 1-based verse number within the surah
        verse_number: u32,
    },

    /// A verse's audio finished naturally
    VerseFinished {
        /// Index into the loaded verse sequence
        index: usize,
    },

    /// A continuous session reached the end of the surah
    SessionFinished,

    /// Advisory: the UI should scroll the given verse into view
    ScrollTo {
        /// Index into the loaded verse sequence
        index: usize,
    },

    /// The last-read marker moved
    LastReadChanged {
        /// Surah number
        surah: u32,
        /// Verse number
        verse: u32,
    },

    /// A bookmark was added or removed
    BookmarkToggled {
        /// Surah number
        surah: u32,
        /// Verse number
        verse: u32,
        /// `true` if the verse is now bookmarked
        added: bool,
    },

    /// The preview highlight moved (or cleared)
    PreviewChanged {
        /// Highlighted index, `None` when cleared
        index: Option<usize>,
    },

    /// A new surah's verse sequence was installed
    SurahLoaded {
        /// Surah number
        surah: u32,
        /// Number of verses loaded
        verse_count: usize,
    },

    /// The selected reciter changed
    ReciterChanged {
        /// Reciter display name
        name: String,
    },

    /// Transient user-facing message
    Notice(Notice),
}

/// Transient user-facing notices, delivered fire-and-forget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The tapped verse has no audio recording
    AudioUnavailable {
        /// 1-based verse number
        verse_number: u32,
    },

    /// Single-verse playback was rejected while a session is playing
    PauseSessionFirst,

    /// A verse was queued to play after the current single verse
    VerseQueued {
        /// 1-based verse number
        verse_number: u32,
    },

    /// The audio backend failed to prepare or play
    PlaybackFailed {
        /// Backend-reported reason
        reason: String,
    },
}
