use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate) {
    let title_line = Line::from(vec![
        Span::styled("  stride  ", theme::accent().add_modifier(Modifier::BOLD)),
        Span::styled("run streak & pace", theme::dim()),
    ]);

    let date_line = Line::from(Span::styled(
        today.format("%A, %b %d, %Y").to_string(),
        theme::dim(),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(""), date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
