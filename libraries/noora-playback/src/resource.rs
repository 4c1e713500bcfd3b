//! Audio resource manager
//!
//! Owns exactly one active playback handle at a time and tags each
//! acquisition with a monotonically increasing generation. Callbacks from a
//! superseded handle carry a stale generation and are discarded by the
//! controller, so a late "completed" from an abandoned verse can never
//! trigger a phantom auto-advance.

use crate::error::{PlaybackError, Result};
use crate::output::AudioOutput;
use tracing::debug;

/// Token identifying one acquisition of the audio handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Single-handle audio resource manager
///
/// Every [`acquire`](ResourceManager::acquire) releases the previous handle
/// first; this is the sole mechanism preventing two concurrent audio
/// streams.
pub struct ResourceManager {
    output: Box<dyn AudioOutput>,
    generation: u64,
    held: bool,
}

impl ResourceManager {
    /// Create a resource manager around a platform audio output
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            generation: 0,
            held: false,
        }
    }

    /// Release any held handle, then begin preparing `url`
    ///
    /// Returns the new acquisition's generation token. On synchronous
    /// failure no handle is held and the previous handle stays released.
    pub fn acquire(&mut self, url: &str) -> Result<Generation> {
        self.release();

        if url.is_empty() {
            return Err(PlaybackError::PreparationFailed("empty URL".to_string()));
        }

        self.generation += 1;
        let generation = Generation(self.generation);
        debug!(generation = self.generation, url, "acquiring audio handle");
        self.output.load(url, generation)?;
        self.held = true;
        Ok(generation)
    }

    /// Whether `generation` identifies the live acquisition
    pub fn is_current(&self, generation: Generation) -> bool {
        self.held && generation.0 == self.generation
    }

    /// Whether a handle is currently held
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Pause the held handle; no-op when nothing is held
    pub fn pause(&mut self) {
        if self.held {
            self.output.pause();
        }
    }

    /// Resume the held handle; no-op when nothing is held
    pub fn resume(&mut self) {
        if self.held {
            self.output.resume();
        }
    }

    /// Seek the held handle to the start of its track
    pub fn seek_to_start(&mut self) {
        if self.held {
            self.output.seek_to_start();
        }
    }

    /// Release the held handle
    ///
    /// Idempotent: calling twice observably equals calling once. Safe
    /// mid-preparation; stale callbacks are excluded by the generation
    /// check afterwards.
    pub fn release(&mut self) {
        if self.held {
            debug!(generation = self.generation, "releasing audio handle");
            self.output.release();
            self.held = false;
        }
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("generation", &self.generation)
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}
