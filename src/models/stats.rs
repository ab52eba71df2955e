use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The run that is still alive relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub streak_count: u32,
    pub streak_start: NaiveDate,
}

/// Current run plus the best run found anywhere in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    pub current_streak: u32,
    pub current_streak_start: NaiveDate,
    pub longest_streak: u32,
    pub longest_streak_start: NaiveDate,
    pub longest_streak_end: NaiveDate,
}

/// Streak as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStreak {
    #[serde(flatten)]
    pub summary: StreakSummary,
    pub ran_today: bool,
}

impl RunStreak {
    /// Fraction of a full year covered by the streak, capped at 1.0.
    pub fn year_progress(&self) -> f64 {
        (self.summary.streak_count as f64 / 365.0).min(1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub count: u32,
    pub distance: f64,
    pub moving_time: i64,
    pub total_elevation_gain: f64,
}
