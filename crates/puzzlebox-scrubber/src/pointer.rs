//! Pointer and keyboard input mapping.

/// Horizontal extent of the seek track in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Map a pointer x coordinate onto the track as a percentage in `[0, 100]`.
    ///
    /// Coordinates outside the track clamp to its ends. A track with no
    /// width maps everything to 0.
    pub fn percent_at(&self, pointer_x: f64) -> f64 {
        if !(self.width > 0.0) || !pointer_x.is_finite() {
            return 0.0;
        }
        let position = (pointer_x - self.left) / self.width;
        position.clamp(0.0, 1.0) * 100.0
    }
}

/// Clamp an arbitrary percentage into `[0, 100]`. NaN maps to 0.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Keys that activate the player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            _ => Self::Other,
        }
    }

    pub fn activates(&self) -> bool {
        matches!(self, Self::Space | Self::Enter)
    }
}
