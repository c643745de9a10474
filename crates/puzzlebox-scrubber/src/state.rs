//! Playback state owned by a single controller.

use std::time::Duration;

use serde::Deserialize;

use crate::format::format_readout;
use crate::host::TimerId;

/// Default window during which position changes do not animate after a seek.
pub const DEFAULT_TRANSITION_COOLDOWN: Duration = Duration::from_millis(50);

/// Scrubber behaviour configured by the embedding page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrubberConfig {
    /// Start playing on mount
    pub autoplay: bool,

    /// Restart from the beginning when playback ends
    #[serde(rename = "loop")]
    pub looping: bool,

    /// Cooldown after a programmatic seek, in milliseconds
    pub transition_cooldown_ms: u64,
}

impl ScrubberConfig {
    pub fn transition_cooldown(&self) -> Duration {
        Duration::from_millis(self.transition_cooldown_ms)
    }
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: true,
            transition_cooldown_ms: DEFAULT_TRANSITION_COOLDOWN.as_millis() as u64,
        }
    }
}

/// Who currently owns the playback position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Host time updates drive progress.
    Idle { playing: bool },
    /// The pointer drives progress; playback is paused for the session.
    Dragging { was_playing: bool },
}

/// Whether the seek indicator animates position changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enabled,
    /// Suppressed until the given timer fires.
    Suppressed(TimerId),
}

/// Seek bar state for one media element.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub(crate) progress_percent: f64,
    pub(crate) phase: Phase,
    pub(crate) duration: Option<f64>,
    pub(crate) hover_percent: Option<f64>,
    pub(crate) transition: Transition,
    pub(crate) readout: String,
}

impl PlaybackState {
    /// Fresh state for a newly mounted scrubber.
    pub fn mounted(autoplay: bool) -> Self {
        Self {
            progress_percent: 0.0,
            phase: Phase::Idle { playing: autoplay },
            duration: None,
            hover_percent: None,
            transition: Transition::Enabled,
            readout: format_readout(0.0, 0.0),
        }
    }

    /// Seek bar fill, in `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the media is advancing. Always false during a drag.
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Idle { playing: true })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Playback snapshot taken at drag start; `None` outside a drag.
    pub fn was_playing_before_drag(&self) -> Option<bool> {
        match self.phase {
            Phase::Dragging { was_playing } => Some(was_playing),
            Phase::Idle { .. } => None,
        }
    }

    /// Total length once the host has reported it.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration
    }

    /// Hover marker position while the pointer is over the track.
    pub fn hover_percent(&self) -> Option<f64> {
        self.hover_percent
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transition == Transition::Enabled
    }

    /// Formatted `m:ss / m:ss` time readout.
    pub fn readout(&self) -> &str {
        &self.readout
    }
}

/// A duration usable as a divisor: known, finite and positive.
pub(crate) fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounted_state_defaults() {
        let state = PlaybackState::mounted(false);

        assert_eq!(state.progress_percent(), 0.0);
        assert!(!state.is_playing());
        assert!(!state.is_dragging());
        assert_eq!(state.duration_seconds(), None);
        assert_eq!(state.hover_percent(), None);
        assert!(state.transitions_enabled());
        assert_eq!(state.readout(), "0:00 / 0:00");
    }

    #[test]
    fn autoplay_mounts_playing() {
        assert!(PlaybackState::mounted(true).is_playing());
    }

    #[test]
    fn drag_snapshot_only_exists_while_dragging() {
        let mut state = PlaybackState::mounted(true);
        assert_eq!(state.was_playing_before_drag(), None);

        state.phase = Phase::Dragging { was_playing: true };
        assert_eq!(state.was_playing_before_drag(), Some(true));
        assert!(!state.is_playing());
    }

    #[test]
    fn rejects_unusable_durations() {
        assert_eq!(usable_duration(0.0), None);
        assert_eq!(usable_duration(f64::NAN), None);
        assert_eq!(usable_duration(f64::INFINITY), None);
        assert_eq!(usable_duration(-1.0), None);
        assert_eq!(usable_duration(12.5), Some(12.5));
    }

    #[test]
    fn config_reads_component_props() {
        let config: ScrubberConfig =
            serde_json::from_str(r#"{"autoplay": false, "loop": false}"#).unwrap();

        assert!(!config.autoplay);
        assert!(!config.looping);
        assert_eq!(config.transition_cooldown(), DEFAULT_TRANSITION_COOLDOWN);
    }
}
