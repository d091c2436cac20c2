/// Sentinel shown for negative durations, which mean "unknown".
pub const UNKNOWN_DURATION: &str = "N/A";

/// Format an elapsed number of seconds for display.
///
/// Hours and minutes are floored and drop the sub-minute remainder; under a
/// minute the seconds keep two decimals.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 {
        return UNKNOWN_DURATION.to_string();
    }

    if seconds >= 3600.0 {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).floor();
        format!("{} hour(s) {} minutes", hours, minutes)
    } else if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        let secs = (seconds % 60.0).floor();
        format!("{} minute(s) {} seconds", minutes, secs)
    } else {
        format!("{} seconds", fixed_two(seconds))
    }
}

/// Two-decimal fixed point of the exact binary value, with exact ties
/// rounded up.
fn fixed_two(value: f64) -> String {
    // adding 0.0 turns -0.0 into 0.0
    let value = value + 0.0;

    // A third-decimal tie is exactly representable only as an odd multiple
    // of 1/8; std formatting would round it to even.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let rounded = (value * 100.0 + 0.5).floor() / 100.0;
        return format!("{:.2}", rounded);
    }

    format!("{:.2}", value)
}
