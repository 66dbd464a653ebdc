use chrono::{DateTime, Duration, Utc};

/// Age of `timestamp` relative to `now` (the current time when `None`).
///
/// Seconds below 90 s, minutes below 90 min, hours beyond; always floored.
/// Timestamps ahead of `now` read as `0 s`.
pub fn format_elapsed(timestamp: DateTime<Utc>, now: Option<DateTime<Utc>>) -> String {
    let now = now.unwrap_or_else(Utc::now);
    let seconds = (now - timestamp).num_seconds().max(0);

    if seconds < 90 {
        format!("{} s", seconds)
    } else if seconds / 60 < 90 {
        format!("{} m", seconds / 60)
    } else {
        format!("{} h", seconds / 3600)
    }
}

/// Short human form of an exchange duration, e.g. `532 ms` or `2.41 s`
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    if millis < 1000 {
        format!("{} ms", millis)
    } else {
        format!("{:.2} s", millis as f64 / 1000.0)
    }
}
