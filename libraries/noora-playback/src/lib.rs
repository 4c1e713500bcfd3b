//! Noora Recitation - Playback Management
//!
//! Platform-agnostic recitation playback session controller.
//!
//! This crate provides:
//! - Single-verse and continuous-session playback modes
//! - A single-handle audio resource manager with generation-guarded
//!   callbacks (stale callbacks from superseded handles are discarded)
//! - Session sequencing with auto-advance, clamped manual stepping, and
//!   skip-over for verses without audio
//! - Bookmark and last-read tracking (bounded, most-recent-first)
//! - A programmatic-scroll guard so auto-scrolls don't move the
//!   last-read marker
//! - An event queue for UI synchronization
//!
//! # Architecture
//!
//! `noora-playback` is completely platform-agnostic:
//! - No dependency on a media player framework
//! - No dependency on noora-storage (database) or noora-quran (network)
//! - Driven from a single logical thread; backend callbacks are the only
//!   asynchrony and are delivered on the same logical thread
//!
//! Platform-specific audio output is provided via the [`AudioOutput`]
//! trait.
//!
//! # Example: Driving the controller
//!
//! ```rust
//! use noora_core::{SurahInfo, Verse};
//! use noora_playback::{AudioOutput, Generation, RecitationConfig, RecitationManager, Result};
//! use std::time::Instant;
//!
//! // Implement AudioOutput for your platform
//! struct MyPlayer;
//!
//! impl AudioOutput for MyPlayer {
//!     fn load(&mut self, _url: &str, _generation: Generation) -> Result<()> {
//!         // Begin asynchronous preparation; callbacks carry the generation
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn resume(&mut self) {}
//!     fn seek_to_start(&mut self) {}
//!     fn release(&mut self) {}
//! }
//!
//! let mut manager = RecitationManager::new(Box::new(MyPlayer), RecitationConfig::default());
//!
//! let verses = vec![Verse {
//!     number: 1,
//!     arabic: "بِسْمِ اللَّهِ".to_string(),
//!     transliteration: "Bismillāhi".to_string(),
//!     translation: "In the name of Allah".to_string(),
//!     audio_url: Some("https://cdn.example.com/1/1.mp3".to_string()),
//! }];
//!
//! manager.load_surah(SurahInfo::new(1, "Al-Fatihah", 1), verses, None, Instant::now());
//! manager.verse_play_tapped(0, Instant::now());
//!
//! // The platform later reports prepare/complete/error with the
//! // acquisition's generation; the UI drains events for rendering.
//! for event in manager.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

#![forbid(unsafe_code)]

mod error;
mod events;
mod manager;
mod output;
mod resource;
pub mod sequencer;
mod tracker;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{Notice, RecitationEvent};
pub use manager::RecitationManager;
pub use output::AudioOutput;
pub use resource::{Generation, ResourceManager};
pub use tracker::ReadingTracker;
pub use types::{PlayModeKind, RecitationConfig, VerseIndicators};
