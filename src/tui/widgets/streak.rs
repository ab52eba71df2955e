use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{RunStreak, StreakReport};
use crate::tui::theme;
use crate::utils::format::{format_long_date, pluralize, progress_bar};

pub fn render(frame: &mut Frame, area: Rect, streak: &RunStreak, report: &StreakReport) {
    let block = Block::default()
        .title(Span::styled(" Run streak ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let count = i64::from(streak.summary.streak_count);
    // A run logged today gets the accent colour.
    let count_style = if streak.ran_today {
        theme::accent().add_modifier(Modifier::BOLD)
    } else if count == 0 {
        theme::red()
    } else {
        theme::bold()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", theme::dim()),
            Span::styled(format!("{} {}", count, pluralize(count, "day")), count_style),
            Span::styled(
                format!("  since {}", format_long_date(streak.summary.streak_start)),
                theme::dim(),
            ),
        ]),
        Line::from(""),
    ];

    if streak.year_progress() < 1.0 {
        lines.push(Line::from(vec![
            Span::styled("  ", theme::dim()),
            Span::styled(progress_bar(streak.year_progress(), 24), theme::green()),
            Span::styled("  full year", theme::dim()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "  Best: {} days  ·  {} – {}",
            report.longest_streak, report.longest_streak_start, report.longest_streak_end
        ),
        theme::dim(),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
