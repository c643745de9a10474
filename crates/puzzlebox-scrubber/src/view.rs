//! Render-ready snapshot of the seek bar and controls.

use serde::Serialize;

use crate::state::{PlaybackState, ScrubberConfig};

/// What the page layer draws for one scrubber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrubberView {
    /// Fill width and knob position, in percent
    pub progress_percent: f64,

    /// Hover marker position, when the pointer is over the track
    pub hover_percent: Option<f64>,

    /// Whether the fill and knob animate towards their position
    pub animate: bool,

    /// `m:ss / m:ss` readout
    pub readout: String,

    /// Accessible label of the play/pause control
    pub play_label: &'static str,

    pub playing: bool,
    pub dragging: bool,
}

impl ScrubberView {
    pub fn from_state(state: &PlaybackState) -> Self {
        let playing = state.is_playing();
        let dragging = state.is_dragging();

        Self {
            progress_percent: state.progress_percent(),
            hover_percent: state.hover_percent(),
            animate: state.transitions_enabled() && !dragging,
            readout: state.readout().to_string(),
            play_label: if playing { "Pause" } else { "Play" },
            playing,
            dragging,
        }
    }

    /// View of a scrubber that has just mounted.
    pub fn initial(config: &ScrubberConfig) -> Self {
        Self::from_state(&PlaybackState::mounted(config.autoplay))
    }
}
