//! Seams between the controller and the platform it runs on.

use std::time::Duration;

/// Errors reported by a media host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    #[error("Fullscreen request denied: {0}")]
    FullscreenDenied(String),

    #[error("Fullscreen exit failed: {0}")]
    FullscreenExit(String),
}

/// A playable media element.
///
/// `duration` returns `f64::NAN` until metadata has loaded, mirroring the
/// platform media element.
pub trait MediaHost {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position.
    fn set_current_time(&mut self, seconds: f64);

    /// Total length in seconds, or NaN when unknown.
    fn duration(&self) -> f64;

    /// Start or resume playback. May be rejected by the platform.
    fn play(&mut self) -> Result<(), HostError>;

    /// Pause playback.
    fn pause(&mut self);

    /// Whether the element is currently presented fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Ask the platform to present the element fullscreen.
    fn request_fullscreen(&mut self) -> Result<(), HostError>;

    /// Leave fullscreen presentation.
    fn exit_fullscreen(&mut self) -> Result<(), HostError>;
}

/// Handle for a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Handle for a registered listener set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Where a listener set is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// `timeupdate`, `durationchange`, `ended` and `loadedmetadata` on the media element.
    Host,
    /// Pointer move and pointer up on the whole viewport.
    Global,
}

/// Event-loop services: timers and listener registration.
///
/// Timers fire back into the controller through
/// [`ScrubberController::on_timer`](crate::ScrubberController::on_timer).
pub trait Platform {
    /// Schedule a one-shot timer.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Cancelling a timer that already fired is harmless.
    fn cancel(&mut self, id: TimerId);

    /// Register the listener set for a scope.
    fn attach(&mut self, scope: ListenerScope) -> ListenerId;

    /// Deregister a listener set.
    fn detach(&mut self, id: ListenerId);
}
