//! Run-streak arithmetic over activity days.
//!
//! A streak is a chain of days, newest first, where each accepted day lies at
//! most one day before the previously accepted one. The chain starts at a
//! reference date that itself need not hold an activity, so a streak that
//! ended yesterday is still "current" today.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::debug;

use crate::error::StreakError;
use crate::models::{StreakReport, StreakSummary};

/// Anything that can be truncated to a UTC calendar day.
pub trait ActivityDay {
    fn activity_day(&self) -> Option<NaiveDate>;
}

impl ActivityDay for NaiveDate {
    fn activity_day(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl ActivityDay for NaiveDateTime {
    fn activity_day(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> ActivityDay for DateTime<Tz> {
    fn activity_day(&self) -> Option<NaiveDate> {
        Some(self.with_timezone(&Utc).date_naive())
    }
}

impl ActivityDay for str {
    fn activity_day(&self) -> Option<NaiveDate> {
        let s = self.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.activity_day();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}

impl ActivityDay for String {
    fn activity_day(&self) -> Option<NaiveDate> {
        self.as_str().activity_day()
    }
}

impl<T: ActivityDay + ?Sized> ActivityDay for &T {
    fn activity_day(&self) -> Option<NaiveDate> {
        (**self).activity_day()
    }
}

/// Truncate every input to its day, newest first, one entry per day.
fn normalize<D: ActivityDay + std::fmt::Debug>(dates: &[D]) -> Result<Vec<NaiveDate>, StreakError> {
    let mut days = dates
        .iter()
        .enumerate()
        .map(|(index, d)| {
            d.activity_day().ok_or_else(|| StreakError::InvalidInput {
                index,
                value: format!("{:?}", d),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    Ok(days)
}

/// Current streak ending within one day of `reference`.
///
/// `streak_start` is the oldest day of the run, or `reference` when there is
/// no run.
pub fn calculate_streak<D: ActivityDay + std::fmt::Debug>(
    dates: &[D],
    reference: NaiveDate,
) -> Result<StreakSummary, StreakError> {
    let days = normalize(dates)?;

    let mut anchor = reference;
    let mut count = 0u32;
    for day in days {
        if (anchor - day).num_days() > 1 {
            break;
        }
        count += 1;
        anchor = day;
    }

    debug!("streak of {} day(s) from {} as of {}", count, anchor, reference);
    Ok(StreakSummary {
        streak_count: count,
        streak_start: anchor,
    })
}

/// Current streak plus the longest run in the whole history.
///
/// Runs of equal length resolve to the one found last in the newest-first
/// walk, i.e. the chronologically oldest.
pub fn calculate_streaks<D: ActivityDay + std::fmt::Debug>(
    dates: &[D],
    reference: NaiveDate,
) -> Result<StreakReport, StreakError> {
    let days = normalize(dates)?;

    let mut anchor = reference;
    let mut in_current = true;
    let mut current = 0u32;
    let mut current_start = reference;

    let mut run = 0u32;
    let mut run_end = reference;
    let mut longest = 0u32;
    let mut longest_start = reference;
    let mut longest_end = reference;

    for &day in &days {
        if (anchor - day).num_days() > 1 {
            in_current = false;
            run = 1;
            run_end = day;
        } else {
            if run == 0 {
                run_end = day;
            }
            run += 1;
            if in_current {
                current += 1;
                current_start = day;
            }
        }

        if run >= longest {
            longest = run;
            longest_start = day;
            longest_end = run_end;
        }
        anchor = day;
    }

    debug!(
        "current streak {} from {}, longest {} ({}..={})",
        current, current_start, longest, longest_start, longest_end
    );
    Ok(StreakReport {
        current_streak: current,
        current_streak_start: current_start,
        longest_streak: longest,
        longest_streak_start: longest_start,
        longest_streak_end: longest_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn august() -> Vec<NaiveDate> {
        [
            "2023-08-15",
            "2023-08-14",
            "2023-08-13",
            "2023-08-12",
            "2023-08-11",
            "2023-08-08",
            "2023-08-06",
        ]
        .iter()
        .map(|s| d(s))
        .collect()
    }

    fn august_and_july() -> Vec<NaiveDate> {
        [
            "2023-08-15",
            "2023-08-13",
            "2023-08-12",
            "2023-08-11",
            "2023-08-08",
            "2023-08-06",
            "2023-08-05",
            "2023-08-04",
            "2023-08-02",
            "2023-08-01",
            "2023-07-20",
            "2023-07-19",
            "2023-07-18",
            "2023-07-17",
            "2023-07-16",
            "2023-07-15",
            "2023-07-14",
            "2023-07-10",
            "2023-07-09",
        ]
        .iter()
        .map(|s| d(s))
        .collect()
    }

    #[test]
    fn streak_survives_until_the_day_after_tomorrow() {
        let dates = august();

        let tomorrow = calculate_streak(&dates, d("2023-08-16")).unwrap();
        assert_eq!(tomorrow.streak_count, 5);
        assert_eq!(tomorrow.streak_start, d("2023-08-11"));

        let today = calculate_streak(&dates, d("2023-08-15")).unwrap();
        assert_eq!(today.streak_count, 5);
        assert_eq!(today.streak_start, d("2023-08-11"));

        let broken = calculate_streak(&dates, d("2023-08-17")).unwrap();
        assert_eq!(broken.streak_count, 0);
        assert_eq!(broken.streak_start, d("2023-08-17"));
    }

    #[test]
    fn empty_history_starts_at_the_reference() {
        let none: Vec<NaiveDate> = Vec::new();
        let summary = calculate_streak(&none, d("2024-02-29")).unwrap();
        assert_eq!(summary.streak_count, 0);
        assert_eq!(summary.streak_start, d("2024-02-29"));

        let report = calculate_streaks(&none, d("2024-02-29")).unwrap();
        assert_eq!(report.current_streak, 0);
        assert_eq!(report.longest_streak, 0);
        assert_eq!(report.longest_streak_start, d("2024-02-29"));
        assert_eq!(report.longest_streak_end, d("2024-02-29"));
    }

    #[test]
    fn report_matches_summary_for_the_current_run() {
        let dates = august();
        for reference in ["2023-08-15", "2023-08-16", "2023-08-17"] {
            let summary = calculate_streak(&dates, d(reference)).unwrap();
            let report = calculate_streaks(&dates, d(reference)).unwrap();
            assert_eq!(report.current_streak, summary.streak_count);
            assert_eq!(report.current_streak_start, summary.streak_start);
        }
    }

    #[test]
    fn longest_run_is_independent_of_the_reference() {
        let dates = august();
        for reference in ["2023-08-15", "2023-08-16", "2023-08-17"] {
            let report = calculate_streaks(&dates, d(reference)).unwrap();
            assert_eq!(report.longest_streak, 5);
            assert_eq!(report.longest_streak_start, d("2023-08-11"));
            assert_eq!(report.longest_streak_end, d("2023-08-15"));
        }
    }

    #[test]
    fn single_gap_breaks_the_current_run() {
        let dates: Vec<NaiveDate> = august_and_july()[..6].to_vec();
        assert_eq!(calculate_streaks(&dates, d("2023-08-17")).unwrap().current_streak, 0);
        assert_eq!(calculate_streaks(&dates, d("2023-08-16")).unwrap().current_streak, 1);
        assert_eq!(calculate_streaks(&dates, d("2023-08-15")).unwrap().current_streak, 1);
    }

    #[test]
    fn finds_the_seven_day_run_in_july() {
        let dates = august_and_july();
        for reference in ["2023-08-16", "2023-08-15", "2023-01-17"] {
            let report = calculate_streaks(&dates, d(reference)).unwrap();
            assert_eq!(report.longest_streak, 7);
            assert_eq!(report.longest_streak_start, d("2023-07-14"));
            assert_eq!(report.longest_streak_end, d("2023-07-20"));
        }

        let without_tail = &dates[..17];
        assert_eq!(
            calculate_streaks(without_tail, d("2023-08-16")).unwrap().longest_streak,
            7
        );

        let only_july = &dates[10..17];
        assert_eq!(
            calculate_streaks(only_july, d("2023-08-16")).unwrap().longest_streak,
            7
        );
    }

    #[test]
    fn equal_runs_resolve_to_the_oldest() {
        let dates: Vec<NaiveDate> = ["2023-08-15", "2023-08-14", "2023-08-10", "2023-08-09"]
            .iter()
            .map(|s| d(s))
            .collect();
        let report = calculate_streaks(&dates, d("2023-08-15")).unwrap();
        assert_eq!(report.longest_streak, 2);
        assert_eq!(report.longest_streak_start, d("2023-08-09"));
        assert_eq!(report.longest_streak_end, d("2023-08-10"));
        assert_eq!(report.current_streak, 2);
        assert_eq!(report.current_streak_start, d("2023-08-14"));
    }

    #[test]
    fn isolated_day_counts_as_a_run_of_one() {
        let dates = vec![d("2023-08-15")];
        let report = calculate_streaks(&dates, d("2023-08-20")).unwrap();
        assert_eq!(report.current_streak, 0);
        assert_eq!(report.longest_streak, 1);
        assert_eq!(report.longest_streak_start, d("2023-08-15"));
        assert_eq!(report.longest_streak_end, d("2023-08-15"));
    }

    #[test]
    fn time_of_day_is_discarded() {
        let dates = [
            "2023-01-13T02:12:00Z",
            "2023-01-12T23:59:00Z",
            "2023-01-11T01:00:00Z",
            "2023-01-04T00:00:01Z",
            "2023-01-01T02:00:00Z",
        ];
        assert_eq!(calculate_streaks(&dates, d("2023-01-13")).unwrap().current_streak, 3);
        assert_eq!(calculate_streaks(&dates, d("2023-01-14")).unwrap().current_streak, 3);
        assert_eq!(calculate_streaks(&dates, d("2023-01-15")).unwrap().current_streak, 0);
    }

    #[test]
    fn offsets_are_truncated_in_utc() {
        // 00:30 in UTC+02:00 is still the previous day in UTC.
        let dt = DateTime::parse_from_rfc3339("2023-08-15T00:30:00+02:00").unwrap();
        assert_eq!(dt.activity_day(), Some(d("2023-08-14")));
    }

    #[test]
    fn unordered_input_is_sorted_first() {
        let mut dates = august();
        dates.reverse();
        dates.swap(1, 4);
        let summary = calculate_streak(&dates, d("2023-08-16")).unwrap();
        assert_eq!(summary.streak_count, 5);
        assert_eq!(summary.streak_start, d("2023-08-11"));
    }

    #[test]
    fn several_activities_on_one_day_count_once() {
        let dates = [
            "2023-08-15T18:00:00Z",
            "2023-08-15T06:00:00Z",
            "2023-08-14T07:00:00Z",
            "2023-08-14",
        ];
        let report = calculate_streaks(&dates, d("2023-08-15")).unwrap();
        assert_eq!(report.current_streak, 2);
        assert_eq!(report.longest_streak, 2);
    }

    #[test]
    fn rejects_values_that_are_not_dates() {
        let dates = ["2023-08-15", "yesterday", "2023-08-13"];
        let err = calculate_streak(&dates, d("2023-08-15")).unwrap_err();
        assert_eq!(
            err,
            StreakError::InvalidInput {
                index: 1,
                value: "\"yesterday\"".to_string()
            }
        );
        assert!(calculate_streaks(&dates, d("2023-08-15")).is_err());
    }

    #[test]
    fn caller_dates_are_left_untouched() {
        let dates = vec![
            "2023-08-15T18:00:00Z".to_string(),
            "2023-08-14T07:00:00Z".to_string(),
        ];
        let before = dates.clone();
        calculate_streaks(&dates, d("2023-08-15")).unwrap();
        assert_eq!(dates, before);
    }

    #[test]
    fn count_never_exceeds_the_number_of_days() {
        let dates = august();
        for offset in -3..10 {
            let reference = d("2023-08-15") + chrono::Duration::days(offset);
            let summary = calculate_streak(&dates, reference).unwrap();
            assert!(summary.streak_count as usize <= dates.len());
        }
    }
}
