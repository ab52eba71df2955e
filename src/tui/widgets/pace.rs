use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::editor::PaceEditor;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, editor: &PaceEditor, focused: bool) {
    let border_style = if focused { theme::accent() } else { theme::border() };
    let block = Block::default()
        .title(Span::styled(" Pace ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    for (idx, distance) in editor.distances.iter().enumerate() {
        let is_selected = focused && idx == editor.selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let value = format!("{:>12}", editor.display(idx));

        let value_span = match &editor.input {
            Some(input) if is_selected => {
                let style = if editor.input_is_valid() {
                    theme::bold()
                } else {
                    theme::invalid()
                };
                // Draw the cursor as a block inside the right-aligned value.
                let pad = value.len() - input.buffer.len();
                let at = pad + input.cursor;
                let (left, right) = value.split_at(at.min(value.len()));
                vec![
                    Span::styled(left.to_string(), style),
                    Span::styled("▏", theme::accent()),
                    Span::styled(right.to_string(), style),
                ]
            }
            _ if is_selected => vec![Span::styled(value, theme::accent().add_modifier(Modifier::BOLD))],
            _ => vec![Span::styled(value, theme::bold())],
        };

        let mut spans = vec![Span::styled(marker, theme::accent())];
        spans.extend(value_span);
        spans.push(Span::styled(format!("  {}", distance.label), theme::dim()));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
