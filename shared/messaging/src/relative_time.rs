use chrono::{DateTime, Utc};

/// Short age label for a message timestamp: "Just now", "5m", "3h", "Yesterday" or a date.
///
/// Each unit is rounded to the nearest whole value of the previous one, so 89 seconds
/// reads as "1m" and 90 seconds as "2m".
pub fn format_relative(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - date).num_milliseconds() as f64;
    let seconds = (diff_ms / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();

    if seconds < 60.0 {
        "Just now".to_string()
    } else if minutes < 60.0 {
        format!("{minutes}m")
    } else if hours < 24.0 {
        format!("{hours}h")
    } else if days == 1.0 {
        "Yesterday".to_string()
    } else {
        date.format("%m/%d/%Y").to_string()
    }
}
