//! Input gates for the live pace editor.
//!
//! These only decide whether the text in an input box is acceptable while
//! typing; `parse_pace` does its own checking.

use regex::Regex;
use std::sync::LazyLock;

/// `[HHH:][MM:][SS][.]mmm`, each segment with flexible digit counts.
pub const VALID_TIME_PATTERN: &str =
    r"^(?:[0-9]{1,3}:)?(?:[0-9]{1,2}:)?(?:[0-9]{1,2})?(?:\.?[0-9]{1,3})$";

/// `SSS.FF` speeds.
pub const VALID_SPEED_PATTERN: &str = r"^(?:[0-9]{1,3}\.)?(?:[0-9]{1,2})$";

static TIME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(VALID_TIME_PATTERN).ok());
static SPEED_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(VALID_SPEED_PATTERN).ok());

pub fn is_valid_time(input: &str) -> bool {
    TIME_RE.as_ref().is_some_and(|re| re.is_match(input))
}

pub fn is_valid_speed(input: &str) -> bool {
    SPEED_RE.as_ref().is_some_and(|re| re.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_times() {
        for ok in ["4:30", "04:30", "4:30.5", "4:30.500", "1:04:30", "01:04:30.05", "30.5", "9", "0.500", ".5"] {
            assert!(is_valid_time(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_partial_or_foreign_times() {
        for bad in ["", "4:", "4:30.", "4:30.5000", "4:30,5", "1:2:3:4", "abc", "4 30"] {
            assert!(!is_valid_time(bad), "{bad}");
        }
    }

    #[test]
    fn speeds_have_two_fraction_digits_at_most() {
        assert!(is_valid_speed("12.5"));
        assert!(is_valid_speed("120.25"));
        assert!(is_valid_speed("7"));
        assert!(!is_valid_speed("12.505"));
        assert!(!is_valid_speed("1234.5"));
        assert!(!is_valid_speed("12,5"));
    }
}
