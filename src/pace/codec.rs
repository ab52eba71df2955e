//! Conversion between typed durations and the stored pace value.
//!
//! A pace is kept as milliseconds per metre: the duration for
//! `distance` metres divided by `distance`. Display strings are always
//! derived from that number, so every row of the pace table stays in sync.

use crate::error::PaceError;
use crate::pace::time_to_add_from_cursor;

pub const DEFAULT_DISTANCE: f64 = 1000.0;
pub const ONE_MILE: f64 = 1609.34;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

fn check_distance(distance: f64) -> Result<(), PaceError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(PaceError::InvalidDistance(distance))
    }
}

fn digits(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse `[[H:]MM:]SS[.mmm]` into milliseconds per metre at `distance`.
///
/// Fractions shorter than three digits are right-padded, so `"4:30.5"` means
/// 500 ms. A lone fraction such as `".5"` is half a second.
pub fn parse_pace(duration: &str, distance: f64) -> Result<f64, PaceError> {
    check_distance(distance)?;
    let malformed = || PaceError::MalformedDuration(duration.to_string());

    let (whole, fraction) = match duration.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (duration, None),
    };

    let ms = match fraction {
        Some(f) if f.len() <= 3 => digits(f).ok_or_else(malformed)? * 10u64.pow(3 - f.len() as u32),
        Some(_) => return Err(malformed()),
        None => 0,
    };

    let parts: Vec<&str> = whole.split(':').collect();
    if parts.len() > 3 {
        return Err(malformed());
    }

    let mut units = [0u64; 3];
    if parts.len() == 1 && parts[0].is_empty() {
        if fraction.is_none() {
            return Err(malformed());
        }
    } else {
        // seconds, minutes, hours from the right
        for (slot, part) in units.iter_mut().zip(parts.iter().rev()) {
            *slot = digits(part).ok_or_else(malformed)?;
        }
    }
    let [seconds, minutes, hours] = units;

    let total = hours
        .checked_mul(MS_PER_HOUR)
        .zip(minutes.checked_mul(MS_PER_MINUTE))
        .zip(seconds.checked_mul(MS_PER_SECOND))
        .and_then(|((h, m), s)| h.checked_add(m)?.checked_add(s)?.checked_add(ms))
        .ok_or_else(malformed)?;
    Ok(total as f64 / distance)
}

/// Render a pace at `distance` in the shortest natural form.
///
/// `"4:30"`, `"1:04:30.500"`, `"9.750"`. Leading segments are dropped while
/// zero and only padded when something precedes them, so a whole hour is
/// `"1:00:00"` and always parses back to the same duration. Negative and
/// non-finite paces render as zero.
pub fn format_pace(ms_per_unit: f64, distance: f64, show_ms: bool) -> String {
    let raw = ms_per_unit * distance;
    // Snap away float noise such as 3870499.9999999995 before flooring.
    let total = if raw.is_finite() && raw > 0.0 {
        ((raw * 1000.0).round() / 1000.0).floor() as u64
    } else {
        0
    };

    let hours = total / MS_PER_HOUR;
    let minutes = (total % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (total % MS_PER_MINUTE) / MS_PER_SECOND;
    let ms = total % MS_PER_SECOND;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}:{:02}:", hours, minutes));
    } else if minutes > 0 {
        out.push_str(&format!("{}:", minutes));
    }

    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{:02}", seconds));
    } else {
        out.push_str(&seconds.to_string());
    }

    if show_ms {
        out.push_str(&format!(".{:03}", ms));
    }
    out
}

/// A pace bound to one distance and display precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceCodec {
    pub distance: f64,
    pub show_ms: bool,
}

impl PaceCodec {
    pub fn new(distance: f64, show_ms: bool) -> Self {
        Self { distance, show_ms }
    }

    pub fn per_km() -> Self {
        Self::new(DEFAULT_DISTANCE, false)
    }

    pub fn parse(&self, duration: &str) -> Result<f64, PaceError> {
        parse_pace(duration, self.distance)
    }

    pub fn format(&self, ms_per_unit: f64) -> String {
        format_pace(ms_per_unit, self.distance, self.show_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Nudge a pace by the unit under the cursor of `input`, as typed at `distance`.
pub fn step_pace(
    ms_per_unit: f64,
    input: &str,
    cursor: usize,
    distance: f64,
    direction: StepDirection,
) -> Result<f64, PaceError> {
    let unit = time_to_add_from_cursor(input, cursor);
    let step = parse_pace(unit.as_duration(), distance)?;
    let next = match direction {
        StepDirection::Up => ms_per_unit + step,
        StepDirection::Down => ms_per_unit - step,
    };
    Ok(next.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_accepted_layout() {
        let cases = [
            (1000.0, "4:30", 270.0),
            (1000.0, "04:30", 270.0),
            (1000.0, "4:30.0", 270.0),
            (1000.0, "4:30.00", 270.0),
            (1000.0, "4:30.000", 270.0),
            (1000.0, "4:30.500", 270.5),
            (1000.0, "4:30.50", 270.5),
            (1000.0, "4:30.5", 270.5),
            (1000.0, "00:04:30.05", 270.05),
            (10_000.0, "00:04:30.5", 27.05),
            (10_000.0, "01:04:30.5", 387.05),
            (100.0, "9.75", 97.5),
            (100.0, "0.5", 5.0),
            (1000.0, "30.500", 30.5),
            (1000.0, "15:15.250", 915.25),
            (1000.0, ".5", 0.5),
        ];
        for (distance, duration, expected) in cases {
            assert_eq!(parse_pace(duration, distance).unwrap(), expected, "{duration} @ {distance}");
        }
    }

    #[test]
    fn formats_with_and_without_milliseconds() {
        let cases = [
            (1000.0, 270.0, false, "4:30"),
            (1000.0, 270.0, true, "4:30.000"),
            (1000.0, 270.5, true, "4:30.500"),
            (1000.0, 270.5, false, "4:30"),
            (10_000.0, 27.05, true, "4:30.500"),
            (10_000.0, 387.05, true, "1:04:30.500"),
            (10_000.0, 387.05, false, "1:04:30"),
            (100.0, 97.5, true, "9.750"),
            (100.0, 5.0, true, "0.500"),
            (1000.0, 30.5, true, "30.500"),
            (1000.0, 915.25, true, "15:15.250"),
            (1000.0, 915.0, true, "15:15.000"),
            (1000.0, 240.0, false, "4:00"),
            (1000.0, 0.0, false, "0"),
        ];
        for (distance, ms, show_ms, expected) in cases {
            assert_eq!(format_pace(ms, distance, show_ms), expected, "{ms} @ {distance}");
        }
    }

    #[test]
    fn whole_hours_keep_their_minutes() {
        assert_eq!(format_pace(3600.0, 1000.0, false), "1:00:00");
        assert_eq!(format_pace(3605.0, 1000.0, false), "1:00:05");
        assert_eq!(parse_pace("1:00:05", 1000.0).unwrap(), 3605.0);
    }

    #[test]
    fn nonsense_paces_render_as_zero() {
        assert_eq!(format_pace(-12.0, 1000.0, true), "0.000");
        assert_eq!(format_pace(f64::NAN, 1000.0, false), "0");
        assert_eq!(format_pace(f64::INFINITY, 1000.0, false), "0");
    }

    #[test]
    fn formatted_paces_parse_back() {
        let distances = [100.0, 400.0, 1000.0, ONE_MILE, 5000.0, 42_195.0];
        let paces = [0.0, 0.001, 2.5, 97.5, 183.3, 270.05, 387.05, 1234.567];
        for distance in distances {
            for pace in paces {
                let text = format_pace(pace, distance, true);
                let back = parse_pace(&text, distance).unwrap();
                // Formatting truncates to whole milliseconds over the distance.
                let tolerance = 1.0 / distance + 1e-9;
                assert!(
                    (back - pace).abs() <= tolerance,
                    "{pace} @ {distance} -> {text} -> {back}"
                );
            }
        }
    }

    #[test]
    fn parsed_durations_format_canonically() {
        let cases = [
            ("04:30", "4:30.000"),
            ("00:04:30.05", "4:30.050"),
            ("1:4:30.5", "1:04:30.500"),
            ("90", "1:30.000"),
            ("0.5", "0.500"),
        ];
        for (input, canonical) in cases {
            let pace = parse_pace(input, 1000.0).unwrap();
            assert_eq!(format_pace(pace, 1000.0, true), canonical, "{input}");
        }
    }

    #[test]
    fn malformed_durations_are_rejected() {
        for bad in ["", "4:30.5000", "1:2:3:4", "4:", ":30", "4:3a", "4.30.5", "-4:30", " 4:30", "."] {
            assert_eq!(
                parse_pace(bad, 1000.0),
                Err(PaceError::MalformedDuration(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn distance_must_be_positive() {
        assert_eq!(parse_pace("4:30", 0.0), Err(PaceError::InvalidDistance(0.0)));
        assert!(matches!(
            parse_pace("4:30", f64::NAN),
            Err(PaceError::InvalidDistance(_))
        ));
    }

    #[test]
    fn codec_converts_between_distances() {
        let per_km = PaceCodec::per_km();
        let pace = per_km.parse("4:30").unwrap();
        assert_eq!(PaceCodec::new(10_000.0, false).format(pace), "45:00");
        assert_eq!(PaceCodec::new(100.0, true).format(pace), "27.000");
        assert_eq!(per_km.format(pace), "4:30");
    }

    #[test]
    fn stepping_follows_the_cursor() {
        let pace = 270.0;
        // cursor in the minutes of "4:30" at 1 km
        assert_eq!(step_pace(pace, "4:30", 0, 1000.0, StepDirection::Up).unwrap(), 330.0);
        // cursor in the seconds
        assert_eq!(step_pace(pace, "4:30", 3, 1000.0, StepDirection::Down).unwrap(), 269.0);
        // cursor in the fraction of "4:30.000"
        let stepped = step_pace(pace, "4:30.000", 6, 1000.0, StepDirection::Up).unwrap();
        assert!((stepped - 270.1).abs() < 1e-9);
        // hours of a 10k time
        let stepped = step_pace(387.05, "1:04:30", 0, 10_000.0, StepDirection::Down).unwrap();
        assert!((stepped - 27.05).abs() < 1e-9);
    }

    #[test]
    fn stepping_down_stops_at_zero() {
        assert_eq!(step_pace(0.5, "0.500", 0, 1000.0, StepDirection::Down).unwrap(), 0.0);
    }
}
