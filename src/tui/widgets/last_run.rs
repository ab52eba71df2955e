use chrono::Utc;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::Activity;
use crate::tui::theme;
use crate::utils::format::{format_distance, format_moving_time, format_relative};

pub fn render(frame: &mut Frame, area: Rect, last_run: Option<&Activity>) {
    let block = Block::default()
        .title(Span::styled(" Last run ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let text = match last_run {
        Some(run) => vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", run.name), theme::bold())),
            Line::from(Span::styled(
                format!(
                    "  {} in {}, {}.",
                    format_distance(run.distance),
                    format_moving_time(run.moving_time),
                    format_relative(run.date, Utc::now())
                ),
                theme::dim(),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled("  No runs recorded yet", theme::dim())),
        ],
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}
