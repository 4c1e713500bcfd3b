//! Integration tests for the recitation manager
//!
//! These tests drive full playback workflows through the controller's
//! public entry points, with a scripted audio output standing in for the
//! platform. Backend callbacks (prepared/completed/error) are delivered
//! manually, tagged with the generation the output recorded at load time.

use noora_core::{SurahInfo, Verse};
use noora_playback::{
    AudioOutput, Generation, Notice, PlayModeKind, RecitationConfig, RecitationEvent,
    RecitationManager, Result,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ===== Test Helpers =====

#[derive(Default)]
struct PlayerLog {
    loads: Vec<(String, Generation)>,
    releases: usize,
    pauses: usize,
    resumes: usize,
    seeks: usize,
}

/// Scripted audio output shared between the manager and the test
#[derive(Clone, Default)]
struct ScriptedPlayer {
    log: Arc<Mutex<PlayerLog>>,
}

impl ScriptedPlayer {
    fn last_generation(&self) -> Generation {
        self.log
            .lock()
            .unwrap()
            .loads
            .last()
            .expect("no load recorded")
            .1
    }

    fn load_count(&self) -> usize {
        self.log.lock().unwrap().loads.len()
    }

    fn last_url(&self) -> String {
        self.log
            .lock()
            .unwrap()
            .loads
            .last()
            .expect("no load recorded")
            .0
            .clone()
    }

    fn releases(&self) -> usize {
        self.log.lock().unwrap().releases
    }

    fn pauses(&self) -> usize {
        self.log.lock().unwrap().pauses
    }

    fn resumes(&self) -> usize {
        self.log.lock().unwrap().resumes
    }

    fn seeks(&self) -> usize {
        self.log.lock().unwrap().seeks
    }
}

impl AudioOutput for ScriptedPlayer {
    fn load(&mut self, url: &str, generation: Generation) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .loads
            .push((url.to_string(), generation));
        Ok(())
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().pauses += 1;
    }

    fn resume(&mut self) {
        self.log.lock().unwrap().resumes += 1;
    }

    fn seek_to_start(&mut self) {
        self.log.lock().unwrap().seeks += 1;
    }

    fn release(&mut self) {
        self.log.lock().unwrap().releases += 1;
    }
}

fn verse(number: u32) -> Verse {
    Verse {
        number,
        arabic: format!("arab {number}"),
        transliteration: format!("latin {number}"),
        translation: format!("text {number}"),
        audio_url: Some(format!("https://cdn.example.com/1/{number}.mp3")),
    }
}

fn silent_verse(number: u32) -> Verse {
    Verse {
        audio_url: None,
        ..verse(number)
    }
}

/// Manager with the given verses loaded as surah 1, plus the shared player
fn setup(verses: Vec<Verse>) -> (RecitationManager, ScriptedPlayer, Instant) {
    let player = ScriptedPlayer::default();
    let mut manager =
        RecitationManager::new(Box::new(player.clone()), RecitationConfig::default());
    let t0 = Instant::now();
    let count = u32::try_from(verses.len()).unwrap();
    manager.load_surah(SurahInfo::new(1, "Al-Fatihah", count), verses, None, t0);
    manager.drain_events();
    (manager, player, t0)
}

fn numbered_verses(count: u32) -> Vec<Verse> {
    (1..=count).map(verse).collect()
}

// After the scroll guard window has elapsed
fn later(t0: Instant) -> Instant {
    t0 + Duration::from_secs(5)
}

// ===== Single-verse playback =====

#[test]
fn tapping_a_verse_starts_single_playback_and_updates_last_read() {
    let (mut manager, player, t0) = setup(numbered_verses(7));

    // Tap play on verse 3 (index 2)
    manager.verse_play_tapped(2, t0);

    assert_eq!(manager.mode_kind(), PlayModeKind::Single);
    assert_eq!(manager.current_index(), Some(2));
    assert!(!manager.is_playing(), "not audible until prepared");
    assert_eq!(manager.tracker().last_read_for_surah(1), Some(3));
    assert_eq!(player.last_url(), "https://cdn.example.com/1/3.mp3");

    manager.handle_prepared(player.last_generation());
    assert!(manager.is_playing());

    let events = manager.drain_events();
    assert!(events.contains(&RecitationEvent::VerseStarted {
        index: 2,
        verse_number: 3
    }));
    assert!(events.contains(&RecitationEvent::LastReadChanged { surah: 1, verse: 3 }));
}

#[test]
fn single_completion_without_queue_returns_to_idle() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.verse_play_tapped(0, t0);
    manager.handle_prepared(player.last_generation());
    manager.handle_completed(player.last_generation(), later(t0));

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert_eq!(manager.current_index(), None);
    assert_eq!(player.load_count(), 1, "no auto-advance in single mode");
}

#[test]
fn tapping_playing_verse_pauses_then_restarts() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.verse_play_tapped(1, t0);
    manager.handle_prepared(player.last_generation());
    assert!(manager.is_playing());

    // Same verse: pause
    manager.verse_play_tapped(1, t0);
    assert!(!manager.is_playing());
    assert_eq!(manager.mode_kind(), PlayModeKind::Single);
    assert_eq!(player.pauses(), 1);

    // Tap again while paused: fresh acquisition, not a resume
    manager.verse_play_tapped(1, t0);
    assert_eq!(player.load_count(), 2);
    assert_eq!(player.resumes(), 0);
}

#[test]
fn tapping_other_verse_while_playing_queues_it() {
    let (mut manager, player, t0) = setup(numbered_verses(7));

    manager.verse_play_tapped(2, t0);
    manager.handle_prepared(player.last_generation());
    manager.drain_events();

    // Tap verse 5 (index 4) while verse 3 plays: queued, no resource change
    manager.verse_play_tapped(4, t0);
    assert_eq!(manager.queued_index(), Some(4));
    assert_eq!(manager.current_index(), Some(2));
    assert_eq!(player.load_count(), 1);
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::Notice(Notice::VerseQueued {
            verse_number: 5
        })));

    // Verse 3 completes: queued verse starts automatically
    manager.handle_completed(player.last_generation(), later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::Single);
    assert_eq!(manager.current_index(), Some(4));
    assert_eq!(manager.queued_index(), None);
    assert_eq!(player.last_url(), "https://cdn.example.com/1/5.mp3");
}

#[test]
fn verse_without_audio_reports_and_stays_idle() {
    let (mut manager, player, t0) = setup(vec![verse(1), silent_verse(2), verse(3)]);

    manager.verse_play_tapped(1, t0);

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert_eq!(player.load_count(), 0, "no resource acquired");
    assert_eq!(
        manager.tracker().last_read_for_surah(1),
        None,
        "playback never began"
    );
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::Notice(Notice::AudioUnavailable {
            verse_number: 2
        })));
}

// ===== Session playback =====

#[test]
fn session_plays_through_and_finishes() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    // No last-read recorded: session starts at index 0
    manager.global_play_pause(t0);
    assert_eq!(manager.mode_kind(), PlayModeKind::Session);
    assert!(manager.is_session_active());
    assert_eq!(manager.current_index(), Some(0));

    manager.handle_prepared(player.last_generation());
    assert!(manager.is_playing());
    manager.drain_events();

    // Verse 1 completes: advance to index 1 with a scroll advisory
    manager.handle_completed(player.last_generation(), later(t0));
    assert_eq!(manager.current_index(), Some(1));
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::ScrollTo { index: 1 }));

    manager.handle_prepared(player.last_generation());
    manager.handle_completed(player.last_generation(), later(t0));
    assert_eq!(manager.current_index(), Some(2));

    manager.handle_prepared(player.last_generation());
    manager.handle_completed(player.last_generation(), later(t0));

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::SessionFinished));
    assert_eq!(player.load_count(), 3);
}

#[test]
fn session_resumes_from_last_read() {
    let (mut manager, _player, t0) = setup(numbered_verses(7));

    // Settle the reading position on verse 4 (index 3) while idle
    manager.card_tapped(3, t0);
    assert_eq!(manager.tracker().last_read_for_surah(1), Some(4));

    manager.global_play_pause(later(t0));
    assert_eq!(manager.current_index(), Some(3));
}

#[test]
fn global_tap_toggles_pause_and_resume() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    assert!(manager.is_playing());

    manager.global_play_pause(t0);
    assert!(!manager.is_playing());
    assert!(manager.is_session_active(), "paused, not stopped");
    assert_eq!(player.pauses(), 1);

    manager.global_play_pause(t0);
    assert!(manager.is_playing());
    assert_eq!(player.resumes(), 1);
    assert_eq!(player.load_count(), 1, "resume reuses the prepared handle");
}

#[test]
fn single_verse_tap_is_rejected_while_session_plays() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    manager.drain_events();

    manager.verse_play_tapped(2, t0);

    assert_eq!(manager.mode_kind(), PlayModeKind::Session);
    assert_eq!(manager.current_index(), Some(0));
    assert_eq!(player.load_count(), 1);
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::Notice(Notice::PauseSessionFirst)));
}

#[test]
fn paused_session_yields_to_single_verse() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    manager.global_play_pause(t0); // pause

    manager.verse_play_tapped(2, t0);

    assert_eq!(manager.mode_kind(), PlayModeKind::Single);
    assert_eq!(manager.current_index(), Some(2));
    assert!(!manager.is_session_active());
    assert_eq!(player.last_url(), "https://cdn.example.com/1/3.mp3");
}

#[test]
fn rapid_next_taps_clamp_at_last_verse() {
    let (mut manager, player, t0) = setup(numbered_verses(5));

    // Start the session at verse 3 (index 2)
    manager.card_tapped(2, t0);
    manager.global_play_pause(later(t0));
    manager.handle_prepared(player.last_generation());
    assert_eq!(manager.current_index(), Some(2));

    manager.next_tapped(later(t0));
    manager.next_tapped(later(t0));
    manager.next_tapped(later(t0));

    assert_eq!(manager.current_index(), Some(4), "clamped at last index");
    assert!(manager.is_session_active());

    // Completion at the last verse stops the session
    manager.handle_prepared(player.last_generation());
    manager.handle_completed(player.last_generation(), later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::None);
}

#[test]
fn prev_at_first_verse_seeks_to_start() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());

    manager.prev_tapped(t0);

    assert_eq!(manager.current_index(), Some(0));
    assert_eq!(player.seeks(), 1);
    assert_eq!(player.load_count(), 1, "no re-acquisition on boundary prev");
}

#[test]
fn next_while_idle_starts_session_one_ahead() {
    let (mut manager, _player, t0) = setup(numbered_verses(5));

    manager.card_tapped(1, t0);
    manager.next_tapped(later(t0));

    assert_eq!(manager.mode_kind(), PlayModeKind::Session);
    assert_eq!(manager.current_index(), Some(2));
}

#[test]
fn session_skips_verses_without_audio() {
    let (mut manager, player, t0) = setup(vec![verse(1), silent_verse(2), verse(3)]);

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    manager.drain_events();

    // Verse 1 completes; verse 2 has no audio and is skipped to verse 3
    manager.handle_completed(player.last_generation(), later(t0));

    assert_eq!(manager.current_index(), Some(2));
    assert_eq!(player.last_url(), "https://cdn.example.com/1/3.mp3");
    let events = manager.drain_events();
    assert!(events.contains(&RecitationEvent::Notice(Notice::AudioUnavailable {
        verse_number: 2
    })));
    assert!(events.contains(&RecitationEvent::ScrollTo { index: 2 }));
}

#[test]
fn session_finishes_when_only_silent_verses_remain() {
    let (mut manager, player, t0) = setup(vec![verse(1), silent_verse(2), silent_verse(3)]);

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    manager.drain_events();

    manager.handle_completed(player.last_generation(), later(t0));

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert!(manager
        .drain_events()
        .contains(&RecitationEvent::SessionFinished));
    assert_eq!(player.load_count(), 1);
}

// ===== Preview highlight =====

#[test]
fn card_tap_during_playback_moves_preview_only() {
    let (mut manager, player, t0) = setup(numbered_verses(5));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    manager.drain_events();

    manager.card_tapped(3, t0);

    assert_eq!(manager.preview_index(), Some(3));
    assert_eq!(manager.current_index(), Some(0), "playback uninterrupted");
    assert!(manager.verse_indicators(3).previewed);
    assert_eq!(
        manager.tracker().last_read_for_surah(1),
        Some(1),
        "last-read stays on the playing verse"
    );

    // Preview clears when the next verse actually starts
    manager.handle_completed(player.last_generation(), later(t0));
    manager.handle_prepared(player.last_generation());
    assert_eq!(manager.preview_index(), None);
}

// ===== Stale-callback immunity =====

#[test]
fn superseded_completion_cannot_phantom_advance() {
    let (mut manager, player, t0) = setup(numbered_verses(5));

    // Verse 1 acquires generation A
    manager.verse_play_tapped(0, t0);
    let generation_a = player.last_generation();
    manager.handle_prepared(generation_a);

    // Pause, then start verse 2: generation B supersedes A
    manager.verse_play_tapped(0, t0);
    manager.verse_play_tapped(1, t0);
    let generation_b = player.last_generation();
    assert_ne!(generation_a, generation_b);

    // A's late callbacks must not touch B's playback
    manager.handle_completed(generation_a, later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::Single);
    assert_eq!(manager.current_index(), Some(1));

    manager.handle_prepared(generation_a);
    assert!(!manager.is_playing(), "stale prepared ignored");

    // B's callbacks still work
    manager.handle_prepared(generation_b);
    assert!(manager.is_playing());
    manager.handle_completed(generation_b, later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::None);
}

#[test]
fn callbacks_after_stop_are_ignored() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    let generation = player.last_generation();
    manager.handle_prepared(generation);

    manager.stop();
    manager.drain_events();

    manager.handle_completed(generation, later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert!(!manager.has_pending_events());
    assert_eq!(player.load_count(), 1, "no phantom auto-advance");
}

// ===== Error handling =====

#[test]
fn backend_error_in_single_mode_resets_to_idle() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.verse_play_tapped(0, t0);
    manager.drain_events();

    manager.handle_error(player.last_generation(), "decode failure", later(t0));

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert!(manager.drain_events().iter().any(|e| matches!(
        e,
        RecitationEvent::Notice(Notice::PlaybackFailed { .. })
    )));
    assert_eq!(player.releases(), 1);
}

#[test]
fn backend_error_in_session_skips_to_next_verse() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());

    manager.handle_error(player.last_generation(), "network failure", later(t0));

    assert!(manager.is_session_active());
    assert_eq!(manager.current_index(), Some(1));
    assert_eq!(player.last_url(), "https://cdn.example.com/1/2.mp3");
}

// ===== Surah switching =====

#[test]
fn switching_surah_stops_everything() {
    let (mut manager, player, t0) = setup(numbered_verses(3));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    assert!(manager.is_playing());
    let old_generation = player.last_generation();

    manager.load_surah(
        SurahInfo::new(2, "Al-Baqarah", 5),
        numbered_verses(5),
        None,
        later(t0),
    );

    assert_eq!(manager.mode_kind(), PlayModeKind::None);
    assert_eq!(manager.current_index(), None);
    assert!(player.releases() >= 1);
    assert_eq!(manager.surah().unwrap().number, 2);
    assert_eq!(manager.verses().len(), 5);

    // The abandoned surah's callback is stale now
    manager.handle_completed(old_generation, later(t0));
    assert_eq!(manager.mode_kind(), PlayModeKind::None);
}

// ===== Scroll-settle debounce =====

#[test]
fn scroll_settle_updates_last_read_while_idle() {
    let (mut manager, _player, t0) = setup(numbered_verses(7));

    manager.scroll_settled(4, later(t0));
    assert_eq!(manager.tracker().last_read_for_surah(1), Some(5));
    assert!(manager.verse_indicators(4).last_read);
}

#[test]
fn scroll_settle_is_suppressed_after_programmatic_scroll() {
    let (mut manager, player, t0) = setup(numbered_verses(7));

    // Session auto-advance arms the guard at `advance_time`
    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());
    let advance_time = later(t0);
    manager.handle_completed(player.last_generation(), advance_time);
    assert_eq!(manager.current_index(), Some(1));

    // Session ends; a settle event lands inside the guard window
    manager.stop();
    manager.scroll_settled(6, advance_time + Duration::from_millis(300));
    assert_eq!(
        manager.tracker().last_read_for_surah(1),
        Some(2),
        "programmatic scroll echo ignored"
    );

    // After the window the same settle is accepted
    manager.scroll_settled(6, advance_time + Duration::from_millis(700));
    assert_eq!(manager.tracker().last_read_for_surah(1), Some(7));
}

#[test]
fn scroll_settle_is_ignored_during_session() {
    let (mut manager, player, t0) = setup(numbered_verses(7));

    manager.global_play_pause(t0);
    manager.handle_prepared(player.last_generation());

    manager.scroll_settled(5, later(t0));
    assert_eq!(
        manager.tracker().last_read_for_surah(1),
        Some(1),
        "session owns the reading position"
    );
}
