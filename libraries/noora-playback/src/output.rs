//! Platform-agnostic audio output trait
//!
//! Abstracts the single playable-audio handle for different platforms
//! (a media player binding on mobile, a decoder + device stream on desktop).

use crate::error::Result;
use crate::resource::Generation;

/// Platform-agnostic audio output
///
/// Implementors own at most one underlying audio handle. [`load`] begins an
/// asynchronous prepare of the given URL; the platform then reports the
/// acquisition's lifecycle back to the controller by calling
/// `RecitationManager::handle_prepared`, `handle_completed`, or
/// `handle_error`, tagging each callback with the [`Generation`] the
/// acquisition was loaded under. Exactly one of prepared→completed,
/// prepared→(paused indefinitely), or error is delivered per acquisition,
/// all on the controller's logical thread. Callbacks tagged with a
/// superseded generation are discarded by the controller.
///
/// [`load`]: AudioOutput::load
pub trait AudioOutput: Send {
    /// Begin asynchronous preparation of the audio at `url`
    ///
    /// Any previously loaded handle has already been released by the
    /// caller. `generation` identifies this acquisition and must accompany
    /// every callback the platform delivers for it. Synchronous failures
    /// (malformed URL, resource creation failure) are returned here;
    /// asynchronous failures arrive later via the error callback.
    fn load(&mut self, url: &str, generation: Generation) -> Result<()>;

    /// Pause audible playback
    ///
    /// Valid only between prepared and completed; a no-op otherwise.
    fn pause(&mut self);

    /// Resume audible playback after a pause
    ///
    /// Valid only between prepared and completed; a no-op otherwise.
    fn resume(&mut self);

    /// Seek the current handle back to the start of the track
    fn seek_to_start(&mut self);

    /// Release the underlying handle
    ///
    /// Must be idempotent and must never fail; underlying resource errors
    /// are swallowed. Safe to call mid-preparation. After release, no
    /// further callbacks for the released acquisition may be honored
    /// (the controller additionally discards stale generations).
    fn release(&mut self);
}
