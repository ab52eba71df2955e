use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS activities (
            id                    INTEGER PRIMARY KEY,
            name                  TEXT NOT NULL,
            date                  TEXT NOT NULL,
            sport_type            TEXT NOT NULL,
            distance              REAL NOT NULL DEFAULT 0,
            moving_time           INTEGER NOT NULL DEFAULT 0,
            elapsed_time          INTEGER NOT NULL DEFAULT 0,
            total_elevation_gain  REAL NOT NULL DEFAULT 0,
            created_at            TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}
