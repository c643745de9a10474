//! Time readout formatting.

/// Format seconds as `m:ss`. Negative and non-finite values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format the `current / total` readout shown next to the play control.
pub fn format_readout(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}
