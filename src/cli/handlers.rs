use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use rusqlite::Connection;
use std::path::Path;

use crate::cli::args::{DistanceCommands, PaceCommands};
use crate::config::AppConfig;
use crate::db::repository::{ActivityRepo, MetaRepo, StatsRepo};
use crate::models::activity::SummaryActivity;
use crate::models::distance::unique_id;
use crate::models::{Activity, ActivityTotals, Distance, SportType};
use crate::pace::{DEFAULT_DISTANCE, PaceCodec, format_pace, is_valid_speed, is_valid_time, parse_pace};
use crate::utils::format::{
    format_activity_date, format_distance, format_long_date, format_moving_time, format_time,
    pluralize, progress_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ORANGE: &str = "\x1b[38;2;252;76;2m";

const LAST_IMPORT_KEY: &str = "last_import";

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_reference(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow!("Bad date '{}': {}. Use YYYY-MM-DD", s, e)),
        None => Ok(today()),
    }
}

fn parse_start_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow!("Bad date '{}'. Use YYYY-MM-DD or RFC 3339", s))
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn handle_streak(
    conn: &Connection,
    config: &AppConfig,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let reference = parse_reference(date)?;
    let streak = StatsRepo::run_streak(conn, &config.streak, reference)?;
    let report = StatsRepo::streak_report(conn, &config.streak, reference)?;

    if json {
        let out = serde_json::json!({
            "reference": reference,
            "streak": streak,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let count = i64::from(streak.summary.streak_count);
    println!();
    let color = if streak.ran_today { ORANGE } else { BOLD };
    println_colored!(color, "  Run streak: {} {}", count, pluralize(count, "day"));
    println_colored!(DIM, "  since {}", format_long_date(streak.summary.streak_start));
    if streak.year_progress() < 1.0 {
        println!(
            "  {}  {:.0}% of a full year",
            progress_bar(streak.year_progress(), 24),
            streak.year_progress() * 100.0
        );
    }
    println!();
    let longest = i64::from(report.longest_streak);
    println_colored!(
        GREEN,
        "  Longest:    {} {} ({} – {})",
        longest,
        pluralize(longest, "day"),
        report.longest_streak_start,
        report.longest_streak_end
    );
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

fn print_totals(label: &str, totals: &ActivityTotals) {
    println!(
        "  {:<16} {:>5}  {:>10}  {:>10}  {:>7.0}m",
        label,
        totals.count,
        format_distance(totals.distance),
        format_time(totals.moving_time),
        totals.total_elevation_gain
    );
}

pub fn handle_stats(conn: &Connection, config: &AppConfig) -> Result<()> {
    let all = ActivityRepo::totals(conn, None)?;
    let runs = ActivityRepo::totals(conn, Some(SportType::runs().as_slice()))?;
    let skis = ActivityRepo::totals(conn, Some(SportType::skis().as_slice()))?;
    let by_sport = ActivityRepo::totals_by_sport(conn)?;
    let report = StatsRepo::streak_report(conn, &config.streak, today())?;

    println!();
    println_colored!(ORANGE, "  Statistics");
    println!();
    println_colored!(
        DIM,
        "  {:<16} {:>5}  {:>10}  {:>10}  {:>8}",
        "",
        "count",
        "distance",
        "moving",
        "climb"
    );
    print_totals("All activities", &all);
    print_totals("Runs", &runs);
    print_totals("Ski", &skis);
    println!();
    for (sport, totals) in &by_sport {
        print_totals(sport.as_str(), totals);
    }
    println!();
    println_colored!(
        BOLD,
        "  Streak:  {} days current  |  {} days best",
        report.current_streak,
        report.longest_streak
    );
    if let Some(when) = MetaRepo::get(conn, LAST_IMPORT_KEY)? {
        println_colored!(DIM, "  Last import: {}", when);
    }
    println!();
    Ok(())
}

// ─── Activities ──────────────────────────────────────────────────────────────

pub fn handle_list(conn: &Connection, limit: u32) -> Result<()> {
    let activities = ActivityRepo::list_desc(conn, Some(limit))?;
    println!();
    if activities.is_empty() {
        println_colored!(DIM, "  No activities yet. Use `stride import` or `stride add`.");
        println!();
        return Ok(());
    }
    for a in &activities {
        println!(
            "  {:<28} {}  {:<12} {}  {:>8}  {:>5.0}m",
            a.name,
            format_activity_date(a.date),
            a.sport_type.as_str(),
            format_time(a.moving_time),
            format_distance(a.distance),
            a.total_elevation_gain
        );
    }
    println!();
    Ok(())
}

pub fn handle_add(
    conn: &Connection,
    date: &str,
    distance: f64,
    time: &str,
    sport: &str,
    name: Option<&str>,
) -> Result<()> {
    if !distance.is_finite() || distance < 0.0 {
        bail!("Distance must be a non-negative number of metres");
    }
    let date = parse_start_date(date)?;
    // At a distance of one metre the pace is the total duration.
    let moving_ms = parse_pace(time, 1.0)?;
    let moving_time = (moving_ms / 1000.0).round() as i64;
    let sport_type = SportType::from(sport.to_string());

    let activity = Activity {
        id: ActivityRepo::next_manual_id(conn)?,
        name: name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Manual {}", sport_type)),
        date,
        sport_type,
        distance,
        moving_time,
        elapsed_time: moving_time,
        total_elevation_gain: 0.0,
    };
    ActivityRepo::upsert(conn, &activity)?;
    println_colored!(
        GREEN,
        "  ✓ Added {} — {} in {}",
        activity.name,
        format_distance(activity.distance),
        format_moving_time(activity.moving_time)
    );
    Ok(())
}

pub fn handle_import(conn: &Connection, file: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Reading {:?}", file))?;
    let summaries: Vec<SummaryActivity> =
        serde_json::from_str(&content).with_context(|| format!("Parsing {:?}", file))?;
    let activities: Vec<Activity> = summaries.into_iter().map(Activity::from).collect();

    let written = ActivityRepo::upsert_all(conn, &activities)?;
    MetaRepo::set(conn, LAST_IMPORT_KEY, &Utc::now().to_rfc3339())?;
    info!("imported {} activities from {:?}", written, file);
    println_colored!(
        GREEN,
        "  ✓ Imported {} {}",
        written,
        if written == 1 { "activity" } else { "activities" }
    );
    Ok(())
}

// ─── Pace ────────────────────────────────────────────────────────────────────

/// Milliseconds per metre from a km/h speed such as "12.5".
fn pace_from_speed(speed: &str) -> Result<f64> {
    if !is_valid_speed(speed) {
        bail!("Bad speed '{}'. Use km/h like 12 or 12.5", speed);
    }
    let kmh: f64 = speed.parse()?;
    if kmh <= 0.0 {
        bail!("Speed must be above zero");
    }
    Ok(3_600_000.0 / (kmh * 1000.0))
}

fn parse_user_pace(duration: &str, distance: f64) -> Result<f64> {
    if !is_valid_time(duration) {
        bail!("Bad duration '{}'. Use [[H:]MM:]SS[.mmm], e.g. 4:30", duration);
    }
    Ok(parse_pace(duration, distance)?)
}

pub fn handle_pace(config: &mut AppConfig, action: &PaceCommands) -> Result<()> {
    match action {
        PaceCommands::Show {
            duration,
            distance,
            speed,
        } => {
            let ms_per_metre = match (duration, speed) {
                (_, Some(speed)) => pace_from_speed(speed)?,
                (Some(duration), None) => parse_user_pace(duration, *distance)?,
                (None, None) => parse_user_pace(&config.pace.initial, DEFAULT_DISTANCE)?,
            };
            print_pace_table(ms_per_metre, &config.pace.distances);
        }
        PaceCommands::Set { duration } => {
            let ms_per_metre = parse_user_pace(duration, DEFAULT_DISTANCE)?;
            config.pace.initial = PaceCodec::per_km().format(ms_per_metre);
            config.save()?;
            println_colored!(GREEN, "  ✓ Saved pace {} /km", config.pace.initial);
        }
    }
    Ok(())
}

fn print_pace_table(ms_per_metre: f64, distances: &[Distance]) {
    println!();
    println_colored!(
        ORANGE,
        "  Pace — {} /km",
        format_pace(ms_per_metre, DEFAULT_DISTANCE, false)
    );
    println!();
    for d in distances {
        let codec = PaceCodec::new(d.distance_m, d.show_ms);
        println!("  {:>12}  {}", codec.format(ms_per_metre), d.label);
    }
    println!();
}

// ─── Distances ───────────────────────────────────────────────────────────────

pub fn handle_distance(config: &mut AppConfig, action: &DistanceCommands) -> Result<()> {
    match action {
        DistanceCommands::List => {
            println!();
            for d in &config.pace.distances {
                let ms = if d.show_ms { "  (ms)" } else { "" };
                println!("  {:<12} {:<20} {:>10}m{}", d.id, d.label, d.distance_m, ms);
            }
            println!();
            return Ok(());
        }
        DistanceCommands::Add {
            label,
            metres,
            show_ms,
            preset,
        } => {
            let mut distance = match (preset, label, metres) {
                (Some(name), _, _) => Distance::find_preset(name)
                    .ok_or_else(|| anyhow!("Unknown preset '{}'", name))?,
                (None, Some(label), Some(metres)) => Distance::new("", label, *metres, *show_ms),
                _ => bail!("Give a label and a distance, or --preset"),
            };
            distance.id = unique_id(&distance.label, &config.pace.distances);
            distance.validate()?;
            println_colored!(GREEN, "  ✓ Added {} ({})", distance.label, distance.id);
            config.pace.distances.push(distance);
        }
        DistanceCommands::Remove { id } => {
            let before = config.pace.distances.len();
            config.pace.distances.retain(|d| &d.id != id);
            if config.pace.distances.len() == before {
                bail!("No distance with id '{}'", id);
            }
            println_colored!(AMBER, "  Removed {}", id);
        }
        DistanceCommands::Sort => {
            config
                .pace
                .distances
                .sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
            println_colored!(GREEN, "  ✓ Sorted by distance");
        }
        DistanceCommands::Reset => {
            config.pace.distances = Distance::defaults();
            println_colored!(GREEN, "  ✓ Restored default distances");
        }
    }
    config.save()
}
