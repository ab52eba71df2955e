use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stride", version, author, about = "A terminal companion for run streaks and pace calculations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current and longest run streak
    Streak {
        /// Reference date (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        date: Option<String>,
        /// Print the streak as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show activity totals
    Stats,
    /// List recorded activities, newest first
    List {
        /// Maximum number of rows
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Record an activity by hand
    Add {
        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        date: String,
        /// Distance in metres
        #[arg(long)]
        distance: f64,
        /// Moving time as [[H:]MM:]SS
        #[arg(long)]
        time: String,
        /// Sport type (Run, TrailRun, Ride, ...)
        #[arg(long, default_value = "Run")]
        sport: String,
        /// Activity name
        #[arg(long)]
        name: Option<String>,
    },
    /// Import an activity export (JSON array of summary activities)
    Import {
        /// Path to the export file
        file: std::path::PathBuf,
    },
    /// Pace calculator
    Pace {
        #[command(subcommand)]
        action: PaceCommands,
    },
    /// Manage the distances in the pace table
    Distance {
        #[command(subcommand)]
        action: DistanceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PaceCommands {
    /// Show a pace at every configured distance
    Show {
        /// Duration for --distance metres, defaults to the saved pace
        duration: Option<String>,
        /// Distance the duration refers to, in metres
        #[arg(long, default_value = "1000")]
        distance: f64,
        /// Use a speed in km/h instead of a duration
        #[arg(long, conflicts_with = "duration")]
        speed: Option<String>,
    },
    /// Save the pace per kilometre used as a starting point
    Set {
        /// Duration per kilometre, e.g. 4:30
        duration: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DistanceCommands {
    /// List configured distances
    List,
    /// Add a distance
    Add {
        /// Label shown next to the pace
        #[arg(required_unless_present = "preset")]
        label: Option<String>,
        /// Distance in metres
        #[arg(required_unless_present = "preset")]
        metres: Option<f64>,
        /// Show milliseconds for this distance
        #[arg(long)]
        show_ms: bool,
        /// Add a preset instead (400m, 800m, mile, half, marathon)
        #[arg(long, conflicts_with_all = ["label", "metres"])]
        preset: Option<String>,
    },
    /// Remove a distance by id
    Remove {
        id: String,
    },
    /// Sort distances from shortest to longest
    Sort,
    /// Restore the default distances
    Reset,
}
