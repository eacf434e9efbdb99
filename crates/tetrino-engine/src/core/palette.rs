use serde::Serialize;

use super::board::Block;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self { r, g, b }
    }
}

type Shades = [Rgb; 8];

const fn shades(hex: [u32; 8]) -> Shades {
    let mut out = [Rgb::from_hex(0); 8];
    let mut i = 0;
    while i < 8 {
        out[i] = Rgb::from_hex(hex[i]);
        i += 1;
    }
    out
}

// Indexed by cell value; entry 0 is the board background.
const BASE: Shades = shades([
    0x28_28_28, 0x2D_99_99, 0x99_99_2D, 0x99_2D_99, 0x2D_99_51, 0x99_2D_2D, 0x2D_63_99, 0x99_63_2D,
]);
const LIGHT: Shades = shades([
    0x28_28_28, 0x44_E5_E5, 0xE5_E5_44, 0xE5_44_E5, 0x44_E5_7A, 0xE5_44_44, 0x44_95_E5, 0xE5_95_44,
]);
const DARK: Shades = shades([
    0x28_28_28, 0x1E_66_66, 0x66_66_1E, 0x66_1E_66, 0x1E_66_36, 0x66_1E_1E, 0x1E_42_66, 0x66_42_1E,
]);

/// Read-only cell colors.
///
/// Each block has a base fill plus a light and a dark shade for bevelled
/// rendering. Empty cells map to the background color in all three tables.
///
/// ```
/// use tetrino_engine::{Block, Palette, PieceKind, Rgb};
///
/// assert_eq!(Palette::base(Block::Empty), Rgb::from_hex(0x282828));
/// assert_eq!(Palette::light(Block::Piece(PieceKind::I)), Rgb::from_hex(0x44E5E5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Palette;

impl Palette {
    #[must_use]
    pub const fn base(block: Block) -> Rgb {
        BASE[block.value() as usize]
    }

    #[must_use]
    pub const fn light(block: Block) -> Rgb {
        LIGHT[block.value() as usize]
    }

    #[must_use]
    pub const fn dark(block: Block) -> Rgb {
        DARK[block.value() as usize]
    }

    /// Background color of an empty board.
    #[must_use]
    pub const fn background() -> Rgb {
        BASE[0]
    }
}
