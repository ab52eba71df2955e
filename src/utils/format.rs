use chrono::{DateTime, NaiveDate, Utc};

/// Format seconds as "HH:MM:SS"
pub fn format_time(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format metres as "800m", "5k" or "10.55k"
pub fn format_distance(metres: f64) -> String {
    if metres < 1000.0 {
        return format!("{}m", metres);
    }
    let km = (metres / 1000.0 * 100.0).round() / 100.0;
    if km.fract() == 0.0 {
        format!("{}k", km as i64)
    } else {
        format!("{:.2}k", km)
    }
}

/// Format seconds as "1 hour 5 minutes"; sub-minute remainders are dropped.
pub fn format_moving_time(total_secs: i64) -> String {
    let total_minutes = total_secs.max(0) / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{} {}", n, pluralize(*n, unit)))
        .collect();
    parts.join(" ")
}

/// Format a timestamp as "Tuesday 2023-08-15 05:12"
pub fn format_activity_date(date: DateTime<Utc>) -> String {
    date.format("%A %Y-%m-%d %H:%M").to_string()
}

/// Format a day as "August 11, 2023"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Rough age of `then` relative to `now`, e.g. "3 days ago"
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let (n, unit) = match secs {
        s if s < 3600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    format!("{} {} ago", n, pluralize(n, unit))
}

pub fn pluralize(n: i64, word: &str) -> String {
    if n == 1 || n == -1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}
