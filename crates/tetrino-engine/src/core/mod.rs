//! Board, tetromino catalog, collision and palette.
//!
//! Everything in this module is plain data plus pure functions over it. The
//! phase state machine in [`crate::engine`] is the only caller that mutates a
//! [`Board`].

pub use self::{board::*, palette::*, piece::*};

pub(crate) mod board;
pub(crate) mod palette;
pub(crate) mod piece;
mod placement;

/// Board width in cells.
pub const WIDTH: usize = 10;
/// Board height in cells, including the hidden rows above the visible area.
pub const HEIGHT: usize = 22;
/// Number of rows a host presents (the bottom part of the board).
pub const VISIBLE_HEIGHT: usize = 20;
/// Rows at the top of the board that hosts do not present.
pub const HIDDEN_HEIGHT: usize = HEIGHT - VISIBLE_HEIGHT;
