use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, game_display::*, key_binding_display::*,
    stats_display::*,
};

mod board_display;
mod cell_display;
mod game_display;
mod key_binding_display;
mod stats_display;

mod color {
    use ratatui::style::Color;
    use tetrino_engine::{Palette, Rgb};

    pub const fn rgb(color: Rgb) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    pub const BACKGROUND: Color = rgb(Palette::background());
    pub const DOT: Color = Color::Rgb(64, 64, 64);
    pub const TEXT: Color = Color::Rgb(255, 255, 255);
    pub const HIGHLIGHT: Color = Color::Rgb(255, 255, 255);
    pub const ACCENT: Color = Color::Rgb(255, 255, 0);
    pub const WARNING: Color = Color::Rgb(255, 64, 64);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::TEXT, color::BACKGROUND);
    pub const EMPTY: Style = fg_bg(color::DOT, color::BACKGROUND);
    pub const HIGHLIGHT: Style = bg_only(color::HIGHLIGHT);
    pub const TITLE: Style = fg_bg(color::ACCENT, color::BACKGROUND).add_modifier(Modifier::BOLD);
    pub const GAME_OVER: Style =
        fg_bg(color::WARNING, color::BACKGROUND).add_modifier(Modifier::BOLD);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
