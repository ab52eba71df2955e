/// Which part of a typed duration an arrow key or scroll should change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Hour,
    Minute,
    Second,
    Tenth,
}

impl StepUnit {
    /// The increment as a duration string, ready for `parse_pace`.
    pub fn as_duration(&self) -> &'static str {
        match self {
            StepUnit::Hour => "1:00:00",
            StepUnit::Minute => "1:00",
            StepUnit::Second => "1",
            StepUnit::Tenth => "0.1",
        }
    }
}

fn in_hours(value: &str, cursor: usize) -> bool {
    value.matches(':').count() == 2 && value.find(':').is_some_and(|first| cursor <= first)
}

fn in_minutes(value: &str, cursor: usize) -> bool {
    match value.matches(':').count() {
        1 => value.find(':').is_some_and(|first| cursor <= first),
        2 => value.rfind(':').is_some_and(|last| cursor <= last),
        _ => false,
    }
}

fn in_fraction(value: &str, cursor: usize) -> bool {
    value.rfind('.').is_some_and(|dot| cursor > dot)
}

/// Classify the cursor position (a byte offset) inside `value`.
///
/// A cursor sitting right before a separator belongs to the segment on its
/// left, so `|4:30` and `4|:30` both step minutes.
pub fn time_to_add_from_cursor(value: &str, cursor: usize) -> StepUnit {
    if in_hours(value, cursor) {
        StepUnit::Hour
    } else if in_minutes(value, cursor) {
        StepUnit::Minute
    } else if in_fraction(value, cursor) {
        StepUnit::Tenth
    } else {
        StepUnit::Second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_only_exist_with_two_colons() {
        assert_eq!(time_to_add_from_cursor("1:04:30", 0), StepUnit::Hour);
        assert_eq!(time_to_add_from_cursor("1:04:30", 1), StepUnit::Hour);
        assert_eq!(time_to_add_from_cursor("1:04:30", 2), StepUnit::Minute);
        assert_eq!(time_to_add_from_cursor("4:30", 0), StepUnit::Minute);
    }

    #[test]
    fn minutes_end_at_the_relevant_colon() {
        assert_eq!(time_to_add_from_cursor("4:30", 1), StepUnit::Minute);
        assert_eq!(time_to_add_from_cursor("4:30", 2), StepUnit::Second);
        assert_eq!(time_to_add_from_cursor("1:04:30", 4), StepUnit::Minute);
        assert_eq!(time_to_add_from_cursor("1:04:30", 5), StepUnit::Second);
    }

    #[test]
    fn fraction_starts_after_the_dot() {
        assert_eq!(time_to_add_from_cursor("4:30.500", 4), StepUnit::Second);
        assert_eq!(time_to_add_from_cursor("4:30.500", 5), StepUnit::Tenth);
        assert_eq!(time_to_add_from_cursor("9.750", 8), StepUnit::Tenth);
        assert_eq!(time_to_add_from_cursor("9.750", 0), StepUnit::Second);
    }

    #[test]
    fn plain_seconds_and_empty_input_step_by_one() {
        assert_eq!(time_to_add_from_cursor("30", 1), StepUnit::Second);
        assert_eq!(time_to_add_from_cursor("", 0), StepUnit::Second);
        assert_eq!(StepUnit::Second.as_duration(), "1");
    }
}
