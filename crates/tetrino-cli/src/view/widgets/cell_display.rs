use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetrino_engine::{Block, Palette, Rgb};

use super::{color, style};

const BEVEL: &str = "▀▀";

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    pub(super) style: Style,
    pub(super) symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// A settled or falling block, or an empty dot.
    ///
    /// Blocks are bevelled: the upper half glyph carries the light shade over
    /// the base fill.
    pub fn from_block(block: Block) -> Self {
        match block {
            Block::Empty => Self::new(style::EMPTY, " ."),
            Block::Piece(_) => Self::bevel(Palette::light(block), Palette::base(block)),
        }
    }

    /// A cell in the hidden spawn rows, one shade darker than the playfield.
    pub fn hidden(block: Block) -> Self {
        match block {
            Block::Empty => Self::new(style::DEFAULT, "  "),
            Block::Piece(_) => Self::bevel(Palette::base(block), Palette::dark(block)),
        }
    }

    fn bevel(top: Rgb, fill: Rgb) -> Self {
        Self::new(Style::new().fg(color::rgb(top)).bg(color::rgb(fill)), BEVEL)
    }

    /// Outline of where the falling piece would land.
    pub fn ghost(block: Block) -> Self {
        Self::new(
            Style::new()
                .fg(color::rgb(Palette::light(block)))
                .bg(color::BACKGROUND),
            "[]",
        )
    }

    /// A cell in a row about to be cleared.
    pub const fn highlight() -> Self {
        Self::new(style::HIGHLIGHT, "")
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill the whole area, not just the cells covered by the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use tetrino_engine::PieceKind;

    use super::*;

    #[test]
    fn test_block_uses_light_over_base() {
        let block = Block::Piece(PieceKind::I);
        let cell = CellDisplay::from_block(block);
        assert_eq!(cell.symbol, BEVEL);
        assert_eq!(cell.style.fg, Some(Color::Rgb(0x44, 0xE5, 0xE5)));
        assert_eq!(cell.style.bg, Some(Color::Rgb(0x2D, 0x99, 0x99)));
    }

    #[test]
    fn test_hidden_block_uses_base_over_dark() {
        let block = Block::Piece(PieceKind::I);
        let cell = CellDisplay::hidden(block);
        assert_eq!(cell.style.fg, Some(color::rgb(Palette::base(block))));
        assert_eq!(cell.style.bg, Some(color::rgb(Palette::dark(block))));

        let empty = CellDisplay::hidden(Block::Empty);
        assert_eq!(empty.symbol.trim(), "");
        assert_eq!(empty.style.bg, Some(color::BACKGROUND));
    }
}
