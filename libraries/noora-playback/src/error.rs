//! Error types for recitation playback

use thiserror::Error;

/// Playback errors
///
/// Invalid transitions (taps that make no sense in the current mode) are
/// silent no-ops by design and have no error value; everything else is
/// absorbed at the controller boundary and surfaced as a notice event.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The verse has no audio recording
    #[error("No audio available for verse {verse}")]
    ResourceUnavailable {
        /// Verse number within the current surah
        verse: u32,
    },

    /// The audio backend rejected or failed an acquisition
    #[error("Audio preparation failed: {0}")]
    PreparationFailed(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
