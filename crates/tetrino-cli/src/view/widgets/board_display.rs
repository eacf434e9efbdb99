use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tetrino_engine::{Block, Board, HEIGHT, HIDDEN_HEIGHT, LineClear, Piece, WIDTH};

use super::CellDisplay;

#[expect(clippy::cast_possible_truncation)]
const COLUMNS: u16 = WIDTH as u16;
#[expect(clippy::cast_possible_truncation)]
const ROWS: u16 = HEIGHT as u16;

/// The board with the falling piece, its ghost and the rows pending removal.
///
/// The hidden spawn rows are drawn above the playfield in darker shades.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<Piece>,
    ghost: Option<Piece>,
    pending_lines: Option<&'a LineClear>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            ghost: None,
            pending_lines: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn pending_lines(self, lines: Option<&'a LineClear>) -> Self {
        Self {
            pending_lines: lines,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        COLUMNS * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        ROWS * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_at(&self, board: &Board, row: usize, col: usize) -> CellDisplay {
        if self.pending_lines.is_some_and(|lines| lines.is_marked(row)) {
            return CellDisplay::highlight();
        }
        let block = board.get(row, col);
        if row < HIDDEN_HEIGHT {
            return CellDisplay::hidden(block);
        }
        if !block.is_empty() {
            return CellDisplay::from_block(block);
        }
        if let Some(ghost) = self.ghost
            && covers(&ghost, row, col)
        {
            return CellDisplay::ghost(Block::Piece(ghost.kind()));
        }
        CellDisplay::from_block(Block::Empty)
    }
}

fn covers(piece: &Piece, row: usize, col: usize) -> bool {
    piece.cells().iter().any(|&(r, c)| {
        usize::try_from(r).is_ok_and(|r| r == row) && usize::try_from(c).is_ok_and(|c| c == col)
    })
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = self.falling_piece {
            board.merge(&piece);
        }

        let col_constraints = (0..WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<WIDTH>(&horizontal));

        for (row, grid_row) in grid_cells.enumerate() {
            for (col, grid_cell) in grid_row.into_iter().enumerate() {
                self.cell_at(&board, row, col).render(grid_cell, buf);
            }
        }
    }
}
