use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::cli::handlers::today;
use crate::config::AppConfig;
use crate::db::repository::{ActivityRepo, StatsRepo};
use crate::models::{Activity, ActivityTotals, RunStreak, SportType, StreakReport, StreakSummary};
use crate::pace::{DEFAULT_DISTANCE, PaceCodec, StepDirection, parse_pace};
use crate::tui::editor::PaceEditor;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, last_run, pace, statusbar, streak};
use crate::utils::format::{format_distance, format_time};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub editor: PaceEditor,
    pub should_quit: bool,
    /// Transient line shown under the pace table
    pub notice: Option<String>,

    // Cached state (refreshed on load)
    pub today: NaiveDate,
    pub run_streak: RunStreak,
    pub report: StreakReport,
    pub last_run: Option<Activity>,
    pub run_totals: ActivityTotals,
    pub by_sport: Vec<(SportType, ActivityTotals)>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let today = today();
        let ms_per_metre = match parse_pace(&config.pace.initial, DEFAULT_DISTANCE) {
            Ok(pace) => pace,
            Err(e) => {
                warn!("Ignoring saved pace: {}", e);
                parse_pace("4:30", DEFAULT_DISTANCE).unwrap_or(270.0)
            }
        };
        let editor = PaceEditor::new(ms_per_metre, config.pace.distances.clone());

        App {
            view: View::Dashboard,
            config,
            editor,
            should_quit: false,
            notice: None,
            today,
            run_streak: RunStreak {
                summary: StreakSummary {
                    streak_count: 0,
                    streak_start: today,
                },
                ran_today: false,
            },
            report: StreakReport {
                current_streak: 0,
                current_streak_start: today,
                longest_streak: 0,
                longest_streak_start: today,
                longest_streak_end: today,
            },
            last_run: None,
            run_totals: ActivityTotals::default(),
            by_sport: Vec::new(),
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.today = today();
        let rule = &self.config.streak;

        self.run_streak = StatsRepo::run_streak(conn, rule, self.today)?;
        self.report = StatsRepo::streak_report(conn, rule, self.today)?;
        self.last_run = ActivityRepo::last_of(conn, &rule.sport_types)?;
        self.run_totals = ActivityRepo::totals(conn, Some(rule.sport_types.as_slice()))?;
        self.by_sport = ActivityRepo::totals_by_sport(conn)?;

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Only handle actual key presses, some terminals also report releases
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard if self.editor.is_editing() => self.handle_edit_key(key),
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Stats => self.handle_stats_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    pub fn handle_scroll(&mut self, direction: StepDirection) {
        if self.view == View::Dashboard {
            self.editor.step(direction);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        self.notice = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Char('r') => {
                if let Err(e) = self.load(conn) {
                    self.notice = Some(format!("Reload failed: {}", e));
                }
            }
            KeyCode::Up => self.editor.select_prev(),
            KeyCode::Down => self.editor.select_next(),
            KeyCode::Enter | KeyCode::Char('e') => self.editor.begin_edit(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.editor.step(StepDirection::Up),
            KeyCode::Char('-') => self.editor.step(StepDirection::Down),
            KeyCode::Char('w') => self.save_pace(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.editor.finish_edit(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Left => self.editor.move_cursor(-1),
            KeyCode::Right => self.editor.move_cursor(1),
            KeyCode::Home => self.editor.move_cursor(isize::MIN),
            KeyCode::End => self.editor.move_cursor(isize::MAX),
            KeyCode::Up => self.editor.step(StepDirection::Up),
            KeyCode::Down => self.editor.step(StepDirection::Down),
            KeyCode::Char(c) => self.editor.insert(c),
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn save_pace(&mut self) {
        let text = PaceCodec::per_km().format(self.editor.ms_per_metre);
        self.config.pace.initial = text.clone();
        self.notice = Some(match self.config.save() {
            Ok(()) => format!("Saved {} /km", text),
            Err(e) => format!("Could not save: {}", e),
        });
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.today);
        statusbar::render(frame, outer_chunks[2], self.editor.is_editing());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // streak
                Constraint::Length(5), // last run
                Constraint::Min(0),    // totals
            ])
            .split(columns[0]);

        streak::render(frame, left_chunks[0], &self.run_streak, &self.report);
        last_run::render(frame, left_chunks[1], self.last_run.as_ref());
        self.draw_totals(frame, left_chunks[2]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(columns[1]);

        pace::render(frame, right_chunks[0], &self.editor, true);
        if let Some(notice) = &self.notice {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {}", notice), theme::green())),
                right_chunks[1],
            );
        }
    }

    fn draw_totals(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Running totals ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border())
            .style(theme::surface());

        let totals = &self.run_totals;
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Runs:      ", theme::dim()),
                Span::styled(totals.count.to_string(), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("  Distance:  ", theme::dim()),
                Span::styled(format_distance(totals.distance), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("  Time:      ", theme::dim()),
                Span::styled(format_time(totals.moving_time), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("  Climb:     ", theme::dim()),
                Span::styled(format!("{:.0}m", totals.total_elevation_gain), theme::bold()),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  Stats  ", theme::accent().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let report = &self.report;
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak (current):  ", theme::dim()),
                Span::styled(
                    format!("{} days", report.current_streak),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  since {}", report.current_streak_start),
                    theme::dim(),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak (best):     ", theme::dim()),
                Span::styled(format!("{} days", report.longest_streak), theme::green()),
                Span::styled(
                    format!(
                        "  {} – {}",
                        report.longest_streak_start, report.longest_streak_end
                    ),
                    theme::dim(),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled("  By sport", theme::accent())),
            Line::from(""),
        ];

        if self.by_sport.is_empty() {
            lines.push(Line::from(Span::styled(
                "  Nothing imported yet. Try `stride import <file>`",
                theme::dim(),
            )));
        }

        for (sport, totals) in &self.by_sport {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", sport.as_str()), theme::amber()),
                Span::styled(format!("{:>5}  ", totals.count), theme::bold()),
                Span::styled(format!("{:>10}  ", format_distance(totals.distance)), theme::dim()),
                Span::styled(format_time(totals.moving_time), theme::dim()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(14).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [↑ ↓]        ", "Select distance"),
            ("  [Enter] [e]  ", "Type a time for the distance"),
            ("  [+ -] wheel  ", "Step the pace"),
            ("  [← →]        ", "Move cursor while typing"),
            ("  [w]          ", "Save pace as default"),
            ("  [r]          ", "Reload activities"),
            ("  [s]          ", "Stats view"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc]        ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::accent()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let mut app = App::new(config);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let events = EventHandler::new(500);

    let outcome = event_loop(&mut terminal, &mut app, &events, &conn);

    execute!(std::io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    outcome
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    events: &EventHandler,
    conn: &Connection,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, conn);
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Scroll(direction) => app.handle_scroll(direction),
            Event::Tick => {
                // Roll the dashboard over at midnight
                if today() != app.today {
                    app.load(conn)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (App, Connection) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let mut app = App::new(AppConfig::default());
        app.load(&conn).unwrap();
        (app, conn)
    }

    #[test]
    fn starts_from_the_configured_pace() {
        let (app, _conn) = app();
        assert_eq!(app.editor.ms_per_metre, 270.0);
        assert_eq!(app.run_streak.summary.streak_count, 0);
        assert!(app.last_run.is_none());
    }

    #[test]
    fn editing_keys_drive_the_pace_table() {
        let (mut app, conn) = app();
        app.handle_key(press(KeyCode::Down), &conn);
        app.handle_key(press(KeyCode::Enter), &conn);
        assert!(app.editor.is_editing());

        for _ in 0..4 {
            app.handle_key(press(KeyCode::Backspace), &conn);
        }
        for c in "5:00".chars() {
            app.handle_key(press(KeyCode::Char(c)), &conn);
        }
        app.handle_key(press(KeyCode::Enter), &conn);

        assert!(!app.editor.is_editing());
        assert_eq!(app.editor.ms_per_metre, 300.0);
    }

    #[test]
    fn scroll_only_steps_on_the_dashboard() {
        let (mut app, conn) = app();
        app.handle_scroll(StepDirection::Down);
        let stepped = app.editor.ms_per_metre;
        assert!(stepped < 270.0);

        app.handle_key(press(KeyCode::Char('s')), &conn);
        assert_eq!(app.view, View::Stats);
        app.handle_scroll(StepDirection::Down);
        assert_eq!(app.editor.ms_per_metre, stepped);
    }

    #[test]
    fn escape_quits_from_the_dashboard() {
        let (mut app, conn) = app();
        app.handle_key(press(KeyCode::Char('?')), &conn);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert!(!app.should_quit);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert!(app.should_quit);
    }
}
