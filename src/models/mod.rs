pub mod activity;
pub mod distance;
pub mod stats;

pub use activity::{Activity, SportType};
pub use distance::Distance;
pub use stats::{ActivityTotals, RunStreak, StreakReport, StreakSummary};
