use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(16, 17, 20);
pub const SURFACE: Color = Color::Rgb(26, 28, 33);
pub const BORDER: Color = Color::Rgb(52, 56, 64);
pub const TEXT: Color = Color::Rgb(226, 228, 232);
pub const TEXT_DIM: Color = Color::Rgb(120, 126, 138);
pub const ORANGE: Color = Color::Rgb(252, 76, 2);
pub const GREEN: Color = Color::Rgb(88, 166, 110);
pub const AMBER: Color = Color::Rgb(214, 160, 64);
pub const RED: Color = Color::Rgb(190, 70, 60);
pub const INVALID_BG: Color = Color::Rgb(90, 24, 24);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ORANGE)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn invalid() -> Style {
    Style::default().fg(TEXT).bg(INVALID_BG)
}
