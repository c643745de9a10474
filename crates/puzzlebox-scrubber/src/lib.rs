//! Video scrubber state machine.
//!
//! Tracks playback progress of one media element, reconciles it with
//! pointer-driven seeking, and produces a view of the seek bar for the page
//! layer. Platform access goes through the [`MediaHost`] and [`Platform`]
//! traits so the controller runs the same against a browser binding or a
//! test double.

pub mod controller;
pub mod format;
pub mod host;
pub mod pointer;
pub mod state;
pub mod view;

pub use controller::ScrubberController;
pub use format::{format_readout, format_time};
pub use host::{HostError, ListenerId, ListenerScope, MediaHost, Platform, TimerId};
pub use pointer::{Key, TrackRect};
pub use state::{Phase, PlaybackState, ScrubberConfig, Transition, DEFAULT_TRANSITION_COOLDOWN};
pub use view::ScrubberView;
