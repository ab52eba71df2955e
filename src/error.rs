use thiserror::Error;

/// Failures raised while walking activity dates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreakError {
    #[error("Invalid date at position {index}: '{value}'")]
    InvalidInput { index: usize, value: String },
}

/// Failures raised by the pace parser.
#[derive(Debug, Error, PartialEq)]
pub enum PaceError {
    #[error("Malformed duration '{0}'. Use [[H:]MM:]SS[.mmm]")]
    MalformedDuration(String),

    #[error("Distance must be a positive number of metres, got {0}")]
    InvalidDistance(f64),
}
