pub mod calculator;

pub use calculator::{ActivityDay, calculate_streak, calculate_streaks};
