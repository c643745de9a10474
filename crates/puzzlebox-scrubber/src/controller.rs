//! Reconciles host playback with pointer-driven seeking.
//!
//! Exactly one source writes the playback position at any time: the host's
//! time updates while idle, the pointer while a drag is in progress.

use crate::format::format_readout;
use crate::host::{ListenerId, ListenerScope, MediaHost, Platform, TimerId};
use crate::pointer::{clamp_percent, Key, TrackRect};
use crate::state::{usable_duration, Phase, PlaybackState, ScrubberConfig, Transition};
use crate::view::ScrubberView;

/// Scrubber controller bound to one media element.
///
/// Host listeners are registered on construction. Dropping the controller
/// deregisters every listener and cancels a pending transition timer.
pub struct ScrubberController<H: MediaHost, P: Platform> {
    host: H,
    platform: P,
    config: ScrubberConfig,
    state: PlaybackState,
    host_listeners: Option<ListenerId>,
    drag_listeners: Option<ListenerId>,
}

impl<H: MediaHost, P: Platform> ScrubberController<H, P> {
    /// Mount a scrubber on `host`.
    ///
    /// Autoplay itself is left to the host element; the controller only
    /// records that playback is expected to be running.
    pub fn mount(host: H, mut platform: P, config: ScrubberConfig) -> Self {
        let host_listeners = Some(platform.attach(ListenerScope::Host));
        let state = PlaybackState::mounted(config.autoplay);

        tracing::debug!(autoplay = config.autoplay, looping = config.looping, "scrubber mounted");

        Self {
            host,
            platform,
            config,
            state,
            host_listeners,
            drag_listeners: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &ScrubberConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Render-ready snapshot of the current state.
    pub fn view(&self) -> ScrubberView {
        ScrubberView::from_state(&self.state)
    }

    /// Unmount the scrubber, releasing listeners and timers.
    pub fn unmount(self) {}

    // Host notifications

    /// Host reported a new playback position.
    pub fn on_host_time_update(&mut self, current_time: f64, duration: f64) {
        if let Some(duration) = usable_duration(duration) {
            self.state.readout = format_readout(current_time, duration);
        }

        if self.state.is_dragging() {
            return;
        }

        let Some(duration) = usable_duration(duration) else {
            return;
        };

        self.state.progress_percent = clamp_percent(100.0 * current_time / duration);
    }

    /// Host reported the media length (`durationchange` / `loadedmetadata`).
    pub fn on_host_duration_known(&mut self, duration: f64) {
        if duration.is_finite() && duration >= 0.0 {
            self.state.duration = Some(duration);
        }
    }

    /// Host reached the end of the media.
    pub fn on_host_ended(&mut self) {
        if self.state.is_dragging() {
            tracing::debug!("ended during drag, ignored");
            return;
        }

        if self.config.looping {
            let playing = self.start_playback();
            self.state.phase = Phase::Idle { playing };
        } else {
            self.state.phase = Phase::Idle { playing: false };
        }
    }

    // Seeking

    /// Pointer went down on the seek track.
    pub fn begin_seek(&mut self, pointer_percent: f64) {
        let Phase::Idle { playing } = self.state.phase else {
            self.update_seek(pointer_percent);
            return;
        };

        if playing {
            self.host.pause();
        }
        self.state.phase = Phase::Dragging {
            was_playing: playing,
        };

        if self.drag_listeners.is_none() {
            self.drag_listeners = Some(self.platform.attach(ListenerScope::Global));
        }

        tracing::debug!(was_playing = playing, "drag started");
        self.seek_to(pointer_percent);
    }

    /// Move the playback position to `pointer_percent` of the media.
    pub fn seek_to(&mut self, pointer_percent: f64) {
        let percent = clamp_percent(pointer_percent);

        self.suppress_transitions();

        match usable_duration(self.host.duration()) {
            Some(duration) => self.host.set_current_time(percent / 100.0 * duration),
            None => tracing::debug!("duration unknown, host position unchanged"),
        }

        self.state.progress_percent = percent;
    }

    /// Pointer moved while dragging.
    pub fn update_seek(&mut self, pointer_percent: f64) {
        if self.state.is_dragging() {
            self.seek_to(pointer_percent);
        }
    }

    /// Pointer released. No-op outside a drag.
    pub fn end_seek(&mut self) {
        let Phase::Dragging { was_playing } = self.state.phase else {
            return;
        };

        if let Some(id) = self.drag_listeners.take() {
            self.platform.detach(id);
        }

        let playing = was_playing && self.start_playback();
        self.state.phase = Phase::Idle { playing };

        tracing::debug!(resumed = playing, "drag ended");
    }

    // Hover preview

    pub fn set_hover_percent(&mut self, pointer_percent: f64) {
        self.state.hover_percent = Some(clamp_percent(pointer_percent));
    }

    pub fn clear_hover(&mut self) {
        self.state.hover_percent = None;
    }

    // Controls

    /// Play/pause control. Ignored while a drag owns playback.
    pub fn toggle_play(&mut self) {
        match self.state.phase {
            Phase::Dragging { .. } => {}
            Phase::Idle { playing: true } => {
                self.host.pause();
                self.state.phase = Phase::Idle { playing: false };
            }
            Phase::Idle { playing: false } => {
                let playing = self.start_playback();
                self.state.phase = Phase::Idle { playing };
            }
        }
    }

    /// Enter or leave fullscreen. Failures are logged and otherwise ignored.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.host.is_fullscreen() {
            self.host.exit_fullscreen()
        } else {
            self.host.request_fullscreen()
        };

        if let Err(e) = result {
            tracing::error!("Error toggling fullscreen: {}", e);
        }
    }

    /// A timer scheduled through the platform fired.
    pub fn on_timer(&mut self, id: TimerId) {
        if self.state.transition == Transition::Suppressed(id) {
            self.state.transition = Transition::Enabled;
        }
    }

    // Pointer and keyboard wiring

    pub fn track_pointer_down(&mut self, pointer_x: f64, track: TrackRect) {
        self.begin_seek(track.percent_at(pointer_x));
    }

    pub fn track_pointer_move(&mut self, pointer_x: f64, track: TrackRect) {
        self.set_hover_percent(track.percent_at(pointer_x));
    }

    /// Leaving the track hides the hover marker but never ends a drag.
    pub fn track_pointer_leave(&mut self) {
        self.clear_hover();
    }

    /// Viewport-wide pointer move, delivered while a drag is in progress.
    pub fn global_pointer_move(&mut self, pointer_x: f64, track: TrackRect) {
        if self.state.is_dragging() {
            self.update_seek(track.percent_at(pointer_x));
        }
    }

    /// Viewport-wide pointer up, delivered while a drag is in progress.
    pub fn global_pointer_up(&mut self) {
        self.end_seek();
    }

    pub fn play_control_key(&mut self, key: Key) {
        if key.activates() {
            self.toggle_play();
        }
    }

    pub fn fullscreen_control_key(&mut self, key: Key) {
        if key.activates() {
            self.toggle_fullscreen();
        }
    }

    fn start_playback(&mut self) -> bool {
        match self.host.play() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Playback did not start: {}", e);
                false
            }
        }
    }

    fn suppress_transitions(&mut self) {
        if let Transition::Suppressed(pending) = self.state.transition {
            self.platform.cancel(pending);
        }
        let id = self.platform.schedule(self.config.transition_cooldown());
        self.state.transition = Transition::Suppressed(id);
    }
}

impl<H: MediaHost, P: Platform> Drop for ScrubberController<H, P> {
    fn drop(&mut self) {
        if let Transition::Suppressed(pending) = self.state.transition {
            self.platform.cancel(pending);
        }
        if let Some(id) = self.drag_listeners.take() {
            self.platform.detach(id);
        }
        if let Some(id) = self.host_listeners.take() {
            self.platform.detach(id);
        }
        tracing::debug!("scrubber unmounted");
    }
}
