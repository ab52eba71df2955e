use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::config::settings::StreakConfig;
use crate::models::{Activity, ActivityTotals, RunStreak, SportType, StreakReport};
use crate::streak::{ActivityDay, calculate_streak, calculate_streaks};

const ACTIVITY_COLUMNS: &str =
    "id, name, date, sport_type, distance, moving_time, elapsed_time, total_elevation_gain";

type ActivityRow = (i64, String, String, String, f64, i64, i64, f64);

fn to_db_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivityRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_activity(row: ActivityRow) -> Result<Activity> {
    let (id, name, date, sport_type, distance, moving_time, elapsed_time, total_elevation_gain) =
        row;
    let date = DateTime::parse_from_rfc3339(&date)
        .map_err(|e| anyhow!("Bad date '{}' on activity {}: {}", date, id, e))?
        .with_timezone(&Utc);
    Ok(Activity {
        id,
        name,
        date,
        sport_type: SportType::from(sport_type),
        distance,
        moving_time,
        elapsed_time,
        total_elevation_gain,
    })
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn sport_names(sports: &[SportType]) -> Vec<String> {
    sports.iter().map(|s| s.as_str().to_string()).collect()
}

// ─── Activity repo ───────────────────────────────────────────────────────────

pub struct ActivityRepo;

impl ActivityRepo {
    pub fn upsert(conn: &Connection, activity: &Activity) -> Result<()> {
        conn.execute(
            "INSERT INTO activities
                (id, name, date, sport_type, distance, moving_time, elapsed_time, total_elevation_gain)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                name = ?2, date = ?3, sport_type = ?4, distance = ?5,
                moving_time = ?6, elapsed_time = ?7, total_elevation_gain = ?8",
            params![
                activity.id,
                activity.name,
                to_db_date(activity.date),
                activity.sport_type.as_str(),
                activity.distance,
                activity.moving_time,
                activity.elapsed_time,
                activity.total_elevation_gain,
            ],
        )?;
        Ok(())
    }

    /// Upsert a batch atomically. Returns how many rows were written.
    pub fn upsert_all(conn: &Connection, activities: &[Activity]) -> Result<usize> {
        let tx = conn.unchecked_transaction()?;
        for activity in activities {
            Self::upsert(&tx, activity)?;
        }
        tx.commit()?;
        debug!("upserted {} activities", activities.len());
        Ok(activities.len())
    }

    /// Manual entries get negative ids so they never collide with provider ids.
    pub fn next_manual_id(conn: &Connection) -> Result<i64> {
        let lowest: i64 = conn.query_row(
            "SELECT COALESCE(MIN(id), 0) FROM activities WHERE id < 0",
            [],
            |row| row.get(0),
        )?;
        Ok(lowest - 1)
    }

    pub fn list_desc(conn: &Connection, limit: Option<u32>) -> Result<Vec<Activity>> {
        let sql = format!(
            "SELECT {} FROM activities ORDER BY date DESC, id DESC LIMIT ?1",
            ACTIVITY_COLUMNS
        );
        let limit = limit.map(i64::from).unwrap_or(-1);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![limit], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(into_activity).collect()
    }

    /// Newest activity of one of `sports`.
    pub fn last_of(conn: &Connection, sports: &[SportType]) -> Result<Option<Activity>> {
        if sports.is_empty() {
            return Ok(None);
        }
        let sql = format!(
            "SELECT {} FROM activities WHERE sport_type IN ({}) ORDER BY date DESC, id DESC LIMIT 1",
            ACTIVITY_COLUMNS,
            placeholders(sports.len())
        );
        let row = conn
            .query_row(&sql, params_from_iter(sport_names(sports)), read_row)
            .optional()?;
        row.map(into_activity).transpose()
    }

    /// Dates of the activities that keep a streak alive on or before `until`
    /// (UTC), newest first.
    pub fn qualifying_dates(
        conn: &Connection,
        rule: &StreakConfig,
        until: NaiveDate,
    ) -> Result<Vec<String>> {
        if rule.sport_types.is_empty() {
            return Ok(Vec::new());
        }
        // Stored dates are fixed-width RFC 3339 in UTC, so text order is time order.
        let before = until
            .succ_opt()
            .map(|next| to_db_date(next.and_time(NaiveTime::MIN).and_utc()));
        let sql = format!(
            "SELECT date FROM activities
             WHERE sport_type IN ({}) AND distance > ?{}
             ORDER BY date DESC",
            placeholders(rule.sport_types.len()),
            if before.is_some() { " AND date < ?" } else { "" }
        );
        let mut values: Vec<rusqlite::types::Value> = sport_names(&rule.sport_types)
            .into_iter()
            .map(rusqlite::types::Value::from)
            .collect();
        values.push(rule.min_distance_m.into());
        if let Some(before) = before {
            values.push(before.into());
        }

        let mut stmt = conn.prepare(&sql)?;
        let dates = stmt
            .query_map(params_from_iter(values), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(dates)
    }

    /// Totals over `sports`, or over everything when `None`.
    pub fn totals(conn: &Connection, sports: Option<&[SportType]>) -> Result<ActivityTotals> {
        let base = "SELECT COUNT(*), COALESCE(SUM(distance), 0), COALESCE(SUM(moving_time), 0),
                           COALESCE(SUM(total_elevation_gain), 0)
                    FROM activities";
        let map = |row: &rusqlite::Row<'_>| {
            Ok(ActivityTotals {
                count: row.get(0)?,
                distance: row.get(1)?,
                moving_time: row.get(2)?,
                total_elevation_gain: row.get(3)?,
            })
        };
        let totals = match sports {
            None => conn.query_row(base, [], map)?,
            Some([]) => ActivityTotals::default(),
            Some(sports) => {
                let sql = format!("{} WHERE sport_type IN ({})", base, placeholders(sports.len()));
                conn.query_row(&sql, params_from_iter(sport_names(sports)), map)?
            }
        };
        Ok(totals)
    }

    pub fn totals_by_sport(conn: &Connection) -> Result<Vec<(SportType, ActivityTotals)>> {
        let mut stmt = conn.prepare(
            "SELECT sport_type, COUNT(*), SUM(distance), SUM(moving_time), SUM(total_elevation_gain)
             FROM activities
             GROUP BY sport_type
             ORDER BY COUNT(*) DESC, sport_type",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                SportType::from(row.get::<_, String>(0)?),
                ActivityTotals {
                    count: row.get(1)?,
                    distance: row.get(2)?,
                    moving_time: row.get(3)?,
                    total_elevation_gain: row.get(4)?,
                },
            ))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Stats repo ──────────────────────────────────────────────────────────────

pub struct StatsRepo;

impl StatsRepo {
    /// Dashboard streak as of `today`.
    pub fn run_streak(conn: &Connection, rule: &StreakConfig, today: NaiveDate) -> Result<RunStreak> {
        let dates = ActivityRepo::qualifying_dates(conn, rule, today)?;
        let summary = calculate_streak(&dates, today)?;
        let ran_today = dates
            .first()
            .and_then(|d| d.activity_day())
            .is_some_and(|d| d == today);
        Ok(RunStreak { summary, ran_today })
    }

    pub fn streak_report(
        conn: &Connection,
        rule: &StreakConfig,
        today: NaiveDate,
    ) -> Result<StreakReport> {
        let dates = ActivityRepo::qualifying_dates(conn, rule, today)?;
        Ok(calculate_streaks(&dates, today)?)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
