//! Session sequencer
//!
//! Pure index arithmetic for continuous playback, plus the guard window
//! that keeps programmatic scrolls from being misread as user scrolls.

use std::time::{Duration, Instant};

/// Outcome of auto-advancing past a completed verse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Continue the session at this index
    Next(usize),

    /// The completed verse was the last one; the session terminates
    Finished,
}

/// Outcome of stepping backwards in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Continue the session at this index
    Previous(usize),

    /// Already at the first verse; seek the current verse to its start
    SeekToStart,
}

/// Next index after `current` completes, or termination
pub fn advance(current: usize, count: usize) -> Advance {
    if current + 1 < count {
        Advance::Next(current + 1)
    } else {
        Advance::Finished
    }
}

/// Manual "next": step forward, clamped at the last valid index
pub fn step_forward(current: usize, count: usize) -> usize {
    debug_assert!(count > 0);
    (current + 1).min(count.saturating_sub(1))
}

/// Index before `current`, or a seek-to-start at the boundary
pub fn retreat(current: usize) -> Retreat {
    if current > 0 {
        Retreat::Previous(current - 1)
    } else {
        Retreat::SeekToStart
    }
}

/// Suppression window for scroll-settle events
///
/// Every programmatic scroll (session start, auto-advance, manual
/// next/prev, initial scroll to the last-read verse) arms the guard;
/// scroll-settle events landing inside the window are echoes of that
/// scroll and must not move the last-read marker. Timestamps are supplied
/// by the caller so the window is deterministic under test.
#[derive(Debug, Clone)]
pub struct ScrollGuard {
    window: Duration,
    suppress_until: Option<Instant>,
}

impl ScrollGuard {
    /// Create a guard with the given suppression window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            suppress_until: None,
        }
    }

    /// Arm the guard: ignore scroll-settle events until `now + window`
    pub fn suppress(&mut self, now: Instant) {
        self.suppress_until = Some(now + self.window);
    }

    /// Whether a scroll-settle event at `now` should be ignored
    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Drop any active suppression
    pub fn clear(&mut self) {
        self.suppress_until = None;
    }
}
