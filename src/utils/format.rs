//! Display formatting for elapsed durations

use std::time::Duration;

/// Render an elapsed duration as `H:MM:SS.mmm`.
///
/// Hours are unpadded and unbounded; minutes and seconds are padded to two
/// digits and milliseconds to three.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_millis();
    let ms = total % 1000;
    let seconds = (total / 1000) % 60;
    let minutes = (total / 60_000) % 60;
    let hours = total / 3_600_000;
    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, ms)
}

/// Fill percentage of a progress ring that completes once per minute.
///
/// Progress moves in 500ms steps and wraps back to 0 every 60 seconds.
pub fn progress_percent(elapsed: Duration) -> f64 {
    let stepped = elapsed.as_millis() / 500 * 500;
    (stepped % 60_000) as f64 / 600.0
}
