mod cli;
mod config;
mod db;
mod error;
mod models;
mod pace;
mod streak;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    debug!("Using database at {:?}", db_path);

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Streak { date, json }) => {
            handlers::handle_streak(&conn, &config, date.as_deref(), json)?;
        }
        Some(Commands::Stats) => {
            handlers::handle_stats(&conn, &config)?;
        }
        Some(Commands::List { limit }) => {
            handlers::handle_list(&conn, limit)?;
        }
        Some(Commands::Add {
            date,
            distance,
            time,
            sport,
            name,
        }) => {
            handlers::handle_add(&conn, &date, distance, &time, &sport, name.as_deref())?;
        }
        Some(Commands::Import { file }) => {
            handlers::handle_import(&conn, &file)?;
        }
        Some(Commands::Pace { action }) => {
            handlers::handle_pace(&mut config, &action)?;
        }
        Some(Commands::Distance { action }) => {
            handlers::handle_distance(&mut config, &action)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}
