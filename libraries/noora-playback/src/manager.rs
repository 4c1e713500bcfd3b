//! Recitation manager - core orchestration
//!
//! Coordinates the audio resource, playback mode transitions, session
//! sequencing, and reading-progress tracking.

use crate::error::{PlaybackError, Result};
use crate::events::{Notice, RecitationEvent};
use crate::output::AudioOutput;
use crate::resource::{Generation, ResourceManager};
use crate::sequencer::{self, Advance, Retreat, ScrollGuard};
use crate::tracker::ReadingTracker;
use crate::types::{PlayMode, PlayModeKind, RecitationConfig, VerseIndicators};
use noora_core::{ReadingSnapshot, SurahInfo, Verse};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Central recitation playback controller
///
/// Manages sequential audio playback of Quranic verses across two mutually
/// exclusive modes:
/// - **Single**: one verse plays, then the controller rests (or plays a
///   verse the user queued meanwhile)
/// - **Session**: continuous playback that auto-advances through the surah
///
/// The controller is driven from a single logical thread. UI entry points
/// and audio backend callbacks mutate state synchronously, push
/// [`RecitationEvent`]s into a pending queue, and return; the UI drains the
/// queue with [`drain_events`](Self::drain_events). The only asynchrony is
/// the backend's prepare/complete/error delivery, which is guarded by the
/// acquisition [`Generation`] so superseded handles cannot corrupt state.
///
/// Timestamps (`now`) are supplied by the caller; they feed the scroll
/// guard that distinguishes programmatic scrolls from user scrolls.
pub struct RecitationManager {
    // Verse sequence (read-only between surah switches)
    surah: Option<SurahInfo>,
    verses: Vec<Verse>,

    // State
    mode: PlayMode,
    preview: Option<usize>,

    // Resting position: last index the user settled on while idle,
    // used to seed sessions and next/prev from the resting state
    cursor: usize,

    // Audio resource (single-handle, generation-guarded)
    resource: ResourceManager,

    // Reading progress
    tracker: ReadingTracker,

    // Programmatic-scroll suppression
    guard: ScrollGuard,

    // Reciter roster
    reciters: Vec<String>,
    selected_reciter: String,

    // Event queue for UI synchronization
    pending_events: Vec<RecitationEvent>,
}

impl RecitationManager {
    /// Create a new recitation manager
    pub fn new(output: Box<dyn AudioOutput>, config: RecitationConfig) -> Self {
        Self::with_reading(output, config, ReadingSnapshot::default())
    }

    /// Create a manager seeded with persisted reading progress
    pub fn with_reading(
        output: Box<dyn AudioOutput>,
        config: RecitationConfig,
        snapshot: ReadingSnapshot,
    ) -> Self {
        let selected_reciter = config.reciters.first().cloned().unwrap_or_default();
        Self {
            surah: None,
            verses: Vec::new(),
            mode: PlayMode::None,
            preview: None,
            cursor: 0,
            resource: ResourceManager::new(output),
            tracker: ReadingTracker::from_snapshot(snapshot, config.bookmark_capacity),
            guard: ScrollGuard::new(config.scroll_guard),
            reciters: config.reciters,
            selected_reciter,
            pending_events: Vec::new(),
        }
    }

    // ===== Surah lifecycle =====

    /// Install a new surah's verse sequence
    ///
    /// Any active playback stops and the resource is released first. When
    /// `scroll_target` names a verse in the loaded range (deep links), the
    /// UI is asked to scroll there; otherwise the surah's last-read verse
    /// is used. Both arm the scroll guard.
    pub fn load_surah(
        &mut self,
        info: SurahInfo,
        verses: Vec<Verse>,
        scroll_target: Option<u32>,
        now: Instant,
    ) {
        self.stop();

        info!(surah = info.number, verses = verses.len(), "surah loaded");
        let surah_number = info.number;
        self.surah = Some(info);
        self.verses = verses;
        self.cursor = 0;
        self.set_preview(None);
        self.emit(RecitationEvent::SurahLoaded {
            surah: surah_number,
            verse_count: self.verses.len(),
        });

        let target = scroll_target.and_then(|v| self.index_of_verse(v)).or_else(|| {
            self.tracker
                .last_read_for_surah(surah_number)
                .and_then(|v| self.index_of_verse(v))
        });
        if let Some(index) = target {
            self.cursor = index;
            self.guard.suppress(now);
            self.emit(RecitationEvent::ScrollTo { index });
        }
    }

    /// Stop all playback and release the audio resource
    ///
    /// Used on surah switch and screen close. Safe to call in any mode.
    pub fn stop(&mut self) {
        self.resource.release();
        if self.mode != PlayMode::None {
            self.mode = PlayMode::None;
            self.emit_state_changed();
        }
    }

    // ===== UI entry points =====

    /// The user tapped play on the verse card at `index`
    pub fn verse_play_tapped(&mut self, index: usize, now: Instant) {
        if index >= self.verses.len() {
            return;
        }

        match self.mode {
            PlayMode::Session { playing: true, .. } => {
                self.emit(RecitationEvent::Notice(Notice::PauseSessionFirst));
            }
            PlayMode::Session { playing: false, .. } => {
                self.stop_session();
                self.play_single(index, now);
            }
            PlayMode::Single {
                index: current,
                playing: true,
                prepared,
                queued,
            } if current == index => {
                self.resource.pause();
                self.mode = PlayMode::Single {
                    index: current,
                    playing: false,
                    prepared,
                    queued,
                };
                self.emit_state_changed();
            }
            PlayMode::Single {
                index: current,
                playing: true,
                prepared,
                queued: _,
            } => {
                self.mode = PlayMode::Single {
                    index: current,
                    playing: true,
                    prepared,
                    queued: Some(index),
                };
                self.emit(RecitationEvent::Notice(Notice::VerseQueued {
                    verse_number: self.verses[index].number,
                }));
            }
            PlayMode::None | PlayMode::Single { playing: false, .. } => {
                self.play_single(index, now);
            }
        }
    }

    /// The user tapped the global play/pause control
    ///
    /// Idle: starts a session at the surah's last-read verse (falling back
    /// to the resting cursor, then 0). Single playback also yields to a new
    /// session. In a session, toggles pause/resume, re-acquiring the verse
    /// when the resource was torn down while paused.
    pub fn global_play_pause(&mut self, now: Instant) {
        if self.verses.is_empty() {
            return;
        }

        match self.mode {
            PlayMode::Session {
                index,
                playing: true,
                prepared,
            } => {
                self.resource.pause();
                self.mode = PlayMode::Session {
                    index,
                    playing: false,
                    prepared,
                };
                self.emit_state_changed();
            }
            PlayMode::Session {
                index,
                playing: false,
                prepared: true,
            } => {
                self.resource.resume();
                self.mode = PlayMode::Session {
                    index,
                    playing: true,
                    prepared: true,
                };
                self.emit_state_changed();
            }
            PlayMode::Session {
                playing: false,
                prepared: false,
                ..
            } => {
                // Paused before preparation finished (or after teardown):
                // restart the current verse from scratch
                self.session_play_current(now);
            }
            PlayMode::None | PlayMode::Single { .. } => {
                let start = self.session_start_index();
                self.set_preview(None);
                self.start_session(start, now);
            }
        }
    }

    /// The user tapped "next"
    ///
    /// In a session: step forward, clamped at the last verse. Idle or
    /// paused single: start a session one verse ahead, if in range.
    /// Ignored while single playback is running.
    pub fn next_tapped(&mut self, now: Instant) {
        if self.verses.is_empty() {
            return;
        }

        match self.mode {
            PlayMode::Session { index, .. } => {
                let next = sequencer::step_forward(index, self.verses.len());
                self.mode = PlayMode::Session {
                    index: next,
                    playing: false,
                    prepared: false,
                };
                self.guard.suppress(now);
                self.emit(RecitationEvent::ScrollTo { index: next });
                self.session_play_current(now);
            }
            PlayMode::Single { playing: true, .. } => {}
            PlayMode::Single {
                index,
                playing: false,
                ..
            } => {
                if index + 1 < self.verses.len() {
                    self.start_session(index + 1, now);
                }
            }
            PlayMode::None => {
                if self.cursor + 1 < self.verses.len() {
                    self.start_session(self.cursor + 1, now);
                }
            }
        }
    }

    /// The user tapped "previous"
    ///
    /// In a session: step back; at the first verse the current recording
    /// seeks to its beginning instead. Idle or paused single: start a
    /// session one verse back, if in range. Ignored while single playback
    /// is running.
    pub fn prev_tapped(&mut self, now: Instant) {
        if self.verses.is_empty() {
            return;
        }

        match self.mode {
            PlayMode::Session { index, .. } => match sequencer::retreat(index) {
                Retreat::Previous(prev) => {
                    self.mode = PlayMode::Session {
                        index: prev,
                        playing: false,
                        prepared: false,
                    };
                    self.guard.suppress(now);
                    self.emit(RecitationEvent::ScrollTo { index: prev });
                    self.session_play_current(now);
                }
                Retreat::SeekToStart => self.resource.seek_to_start(),
            },
            PlayMode::Single { playing: true, .. } => {}
            PlayMode::Single {
                index,
                playing: false,
                ..
            } => {
                if index > 0 {
                    self.start_session(index - 1, now);
                }
            }
            PlayMode::None => {
                if self.cursor > 0 {
                    self.start_session(self.cursor - 1, now);
                }
            }
        }
    }

    /// The user tapped a verse card (not its play control)
    ///
    /// While audio is playing this only moves the preview highlight;
    /// otherwise it settles the reading position on the tapped verse.
    pub fn card_tapped(&mut self, index: usize, now: Instant) {
        if index >= self.verses.len() {
            return;
        }

        self.guard.suppress(now);
        if self.mode.is_playing() {
            self.set_preview(Some(index));
        } else {
            self.cursor = index;
            self.record_last_read(index);
        }
    }

    /// A user-initiated scroll settled with the verse at `index` on top
    ///
    /// Ignored inside the programmatic-scroll guard window and whenever
    /// playback is active; otherwise moves the last-read marker.
    pub fn scroll_settled(&mut self, index: usize, now: Instant) {
        if index >= self.verses.len() {
            return;
        }
        if self.guard.is_suppressed(now) {
            debug!(index, "scroll settle ignored inside guard window");
            return;
        }
        if self.mode.is_playing() || self.is_session_active() {
            return;
        }

        let Some(surah) = self.surah.as_ref() else {
            return;
        };
        let verse_number = self.verses[index].number;
        if self.tracker.last_read_for_surah(surah.number) == Some(verse_number) {
            return;
        }

        self.cursor = index;
        self.record_last_read(index);
    }

    /// Toggle the bookmark on the verse at `index`
    ///
    /// Returns whether the verse is now bookmarked.
    pub fn toggle_bookmark(&mut self, index: usize) -> bool {
        let Some(surah_number) = self.surah.as_ref().map(|s| s.number) else {
            return false;
        };
        let Some(verse) = self.verses.get(index) else {
            return false;
        };

        let verse_number = verse.number;
        let added = self.tracker.toggle_bookmark(surah_number, verse_number);
        self.emit(RecitationEvent::BookmarkToggled {
            surah: surah_number,
            verse: verse_number,
            added,
        });
        added
    }

    /// Select a reciter from the configured roster
    pub fn set_reciter(&mut self, name: &str) {
        if !self.reciters.iter().any(|r| r == name) {
            warn!(name, "unknown reciter ignored");
            return;
        }
        if self.selected_reciter == name {
            return;
        }
        self.selected_reciter = name.to_string();
        self.emit(RecitationEvent::ReciterChanged {
            name: name.to_string(),
        });
    }

    // ===== Audio backend callbacks =====

    /// The backend finished preparing and playback started
    pub fn handle_prepared(&mut self, generation: Generation) {
        if !self.resource.is_current(generation) {
            debug!("ignoring prepared callback from superseded handle");
            return;
        }

        match self.mode {
            PlayMode::None => {}
            PlayMode::Single { index, queued, .. } => {
                self.mode = PlayMode::Single {
                    index,
                    playing: true,
                    prepared: true,
                    queued,
                };
                self.set_preview(None);
                self.emit(RecitationEvent::VerseStarted {
                    index,
                    verse_number: self.verses[index].number,
                });
                self.emit_state_changed();
            }
            PlayMode::Session { index, .. } => {
                self.mode = PlayMode::Session {
                    index,
                    playing: true,
                    prepared: true,
                };
                self.set_preview(None);
                self.emit(RecitationEvent::VerseStarted {
                    index,
                    verse_number: self.verses[index].number,
                });
                self.emit_state_changed();
            }
        }
    }

    /// The backend's track finished naturally
    pub fn handle_completed(&mut self, generation: Generation, now: Instant) {
        if !self.resource.is_current(generation) {
            debug!("ignoring completion callback from superseded handle");
            return;
        }

        match self.mode {
            PlayMode::None => {}
            PlayMode::Single { index, queued, .. } => {
                self.emit(RecitationEvent::VerseFinished { index });
                match queued {
                    Some(next) => self.play_single(next, now),
                    None => {
                        self.resource.release();
                        self.mode = PlayMode::None;
                        self.emit_state_changed();
                    }
                }
            }
            PlayMode::Session { index, .. } => {
                self.emit(RecitationEvent::VerseFinished { index });
                match sequencer::advance(index, self.verses.len()) {
                    Advance::Next(next) => {
                        self.mode = PlayMode::Session {
                            index: next,
                            playing: false,
                            prepared: false,
                        };
                        self.guard.suppress(now);
                        self.emit(RecitationEvent::ScrollTo { index: next });
                        self.session_play_current(now);
                    }
                    Advance::Finished => self.finish_session(),
                }
            }
        }
    }

    /// The backend failed to prepare or play the current acquisition
    pub fn handle_error(&mut self, generation: Generation, reason: &str, now: Instant) {
        if !self.resource.is_current(generation) {
            debug!("ignoring error callback from superseded handle");
            return;
        }

        warn!(reason, "audio backend reported an error");
        match self.mode {
            PlayMode::None => self.resource.release(),
            PlayMode::Single { .. } => {
                self.emit(RecitationEvent::Notice(Notice::PlaybackFailed {
                    reason: reason.to_string(),
                }));
                self.resource.release();
                self.mode = PlayMode::None;
                self.emit_state_changed();
            }
            PlayMode::Session { index, .. } => {
                self.emit(RecitationEvent::Notice(Notice::PlaybackFailed {
                    reason: reason.to_string(),
                }));
                match sequencer::advance(index, self.verses.len()) {
                    Advance::Next(next) => {
                        self.mode = PlayMode::Session {
                            index: next,
                            playing: false,
                            prepared: false,
                        };
                        self.guard.suppress(now);
                        self.emit(RecitationEvent::ScrollTo { index: next });
                        self.session_play_current(now);
                    }
                    Advance::Finished => self.finish_session(),
                }
            }
        }
    }

    // ===== State queries =====

    /// Current mode discriminant
    pub fn mode_kind(&self) -> PlayModeKind {
        self.mode.kind()
    }

    /// Index of the verse playback points at, `None` when idle
    pub fn current_index(&self) -> Option<usize> {
        self.mode.index()
    }

    /// Whether audio is audibly running
    pub fn is_playing(&self) -> bool {
        self.mode.is_playing()
    }

    /// Whether a continuous session is active (in any pause state)
    pub fn is_session_active(&self) -> bool {
        matches!(self.mode, PlayMode::Session { .. })
    }

    /// Current preview highlight, if any
    pub fn preview_index(&self) -> Option<usize> {
        self.preview
    }

    /// Verse index queued to play after the current single verse, if any
    pub fn queued_index(&self) -> Option<usize> {
        match self.mode {
            PlayMode::Single { queued, .. } => queued,
            _ => None,
        }
    }

    /// Currently selected reciter
    pub fn selected_reciter(&self) -> &str {
        &self.selected_reciter
    }

    /// Configured reciter roster
    pub fn reciters(&self) -> &[String] {
        &self.reciters
    }

    /// Loaded surah metadata, if any
    pub fn surah(&self) -> Option<&SurahInfo> {
        self.surah.as_ref()
    }

    /// Loaded verse sequence
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Derived render flags for a verse row
    pub fn verse_indicators(&self, index: usize) -> VerseIndicators {
        let Some(verse) = self.verses.get(index) else {
            return VerseIndicators::default();
        };
        let surah = self.surah.as_ref();
        VerseIndicators {
            playing: self.mode.is_playing() && self.mode.index() == Some(index),
            previewed: self.preview == Some(index),
            last_read: surah
                .is_some_and(|s| self.tracker.last_read_for_surah(s.number) == Some(verse.number)),
            bookmarked: surah.is_some_and(|s| self.tracker.is_bookmarked(s.number, verse.number)),
        }
    }

    /// Reading-progress tracker (bookmarks, last-read markers)
    pub fn tracker(&self) -> &ReadingTracker {
        &self.tracker
    }

    /// Export reading progress for persistence
    pub fn reading_snapshot(&self) -> ReadingSnapshot {
        self.tracker.snapshot()
    }

    // ===== Event queue =====

    /// Drain all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<RecitationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether undrained events are pending
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal transitions =====

    /// Begin single-verse playback of the verse at `index`
    fn play_single(&mut self, index: usize, now: Instant) {
        let verse = self.verses[index].clone();

        match self.try_acquire(&verse) {
            Ok(_generation) => {
                self.guard.suppress(now);
                self.set_preview(None);
                self.mode = PlayMode::Single {
                    index,
                    playing: false,
                    prepared: false,
                    queued: None,
                };
                self.cursor = index;
                self.record_last_read(index);
                self.emit_state_changed();
            }
            Err(err) => {
                warn!(index, error = %err, "single playback halted");
                self.emit(RecitationEvent::Notice(notice_for(&err)));
                self.resource.release();
                if self.mode != PlayMode::None {
                    self.mode = PlayMode::None;
                    self.emit_state_changed();
                }
            }
        }
    }

    /// Enter session mode at `start` and begin playing
    fn start_session(&mut self, start: usize, now: Instant) {
        if start >= self.verses.len() {
            return;
        }

        self.mode = PlayMode::Session {
            index: start,
            playing: false,
            prepared: false,
        };
        self.cursor = start;
        self.guard.suppress(now);
        self.emit_state_changed();
        self.session_play_current(now);
    }

    /// Acquire and play the session's current verse
    ///
    /// Verses without audio (and synchronous acquisition failures) are
    /// skipped forward until a playable verse is found or the surah ends.
    fn session_play_current(&mut self, now: Instant) {
        let count = self.verses.len();
        loop {
            let PlayMode::Session { index, .. } = self.mode else {
                return;
            };
            if index >= count {
                self.stop_session();
                return;
            }

            let verse = self.verses[index].clone();
            match self.try_acquire(&verse) {
                Ok(_generation) => {
                    self.mode = PlayMode::Session {
                        index,
                        playing: false,
                        prepared: false,
                    };
                    self.cursor = index;
                    self.record_last_read(index);
                    return;
                }
                Err(err) => {
                    info!(index, error = %err, "session skipping verse");
                    self.emit(RecitationEvent::Notice(notice_for(&err)));
                    if !self.skip_forward(index, count, now) {
                        return;
                    }
                }
            }
        }
    }

    /// Release the previous handle and begin preparing a verse's audio
    ///
    /// Fails without acquiring when the verse has no recording.
    fn try_acquire(&mut self, verse: &Verse) -> Result<Generation> {
        let url = verse
            .audio_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(PlaybackError::ResourceUnavailable {
                verse: verse.number,
            })?;
        self.resource.acquire(url)
    }

    /// Move the session one verse forward after a skip
    ///
    /// Returns false when the session terminated instead.
    fn skip_forward(&mut self, index: usize, count: usize, now: Instant) -> bool {
        match sequencer::advance(index, count) {
            Advance::Next(next) => {
                self.mode = PlayMode::Session {
                    index: next,
                    playing: false,
                    prepared: false,
                };
                self.guard.suppress(now);
                self.emit(RecitationEvent::ScrollTo { index: next });
                true
            }
            Advance::Finished => {
                self.finish_session();
                false
            }
        }
    }

    /// Session reached the end of the surah
    fn finish_session(&mut self) {
        self.resource.release();
        self.mode = PlayMode::None;
        self.emit(RecitationEvent::SessionFinished);
        self.emit_state_changed();
    }

    /// Stop a session without the natural-finish event
    fn stop_session(&mut self) {
        self.resource.release();
        self.mode = PlayMode::None;
        self.emit_state_changed();
    }

    /// Resolve where a fresh session should start
    ///
    /// Last-read verse for the surah when it maps into the loaded range,
    /// else the resting cursor, clamped into bounds.
    fn session_start_index(&self) -> usize {
        let from_last_read = self
            .surah
            .as_ref()
            .and_then(|s| self.tracker.last_read_for_surah(s.number))
            .and_then(|v| self.index_of_verse(v));
        from_last_read
            .unwrap_or(self.cursor)
            .min(self.verses.len().saturating_sub(1))
    }

    fn index_of_verse(&self, verse_number: u32) -> Option<usize> {
        self.verses.iter().position(|v| v.number == verse_number)
    }

    /// Update the last-read markers for the verse at `index`
    fn record_last_read(&mut self, index: usize) {
        let Some(surah) = self.surah.clone() else {
            return;
        };
        let verse_number = self.verses[index].number;
        self.tracker
            .set_last_read(surah.number, verse_number, &surah.name);
        self.emit(RecitationEvent::LastReadChanged {
            surah: surah.number,
            verse: verse_number,
        });
    }

    fn set_preview(&mut self, preview: Option<usize>) {
        if self.preview != preview {
            self.preview = preview;
            self.emit(RecitationEvent::PreviewChanged { index: preview });
        }
    }

    fn emit(&mut self, event: RecitationEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        let event = RecitationEvent::StateChanged {
            mode: self.mode.kind(),
            playing: self.mode.is_playing(),
        };
        self.pending_events.push(event);
    }
}

// Errors are absorbed at the controller boundary; only a notice escapes
fn notice_for(err: &PlaybackError) -> Notice {
    match err {
        PlaybackError::ResourceUnavailable { verse } => Notice::AudioUnavailable {
            verse_number: *verse,
        },
        other => Notice::PlaybackFailed {
            reason: other.to_string(),
        },
    }
}

impl std::fmt::Debug for RecitationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecitationManager")
            .field("surah", &self.surah.as_ref().map(|s| s.number))
            .field("verses", &self.verses.len())
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}
