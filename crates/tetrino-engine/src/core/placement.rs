use super::{
    board::{Block, Board},
    piece::Piece,
};

impl Board {
    /// Returns whether every occupied cell of `piece` is on the board and empty.
    ///
    /// This is the single legality check for movement, rotation, drops and
    /// spawns.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(row, col)| self.cell(row, col).is_some_and(Block::is_empty))
    }

    /// Writes the occupied cells of `piece` into the board.
    ///
    /// The pose is not re-checked; callers merge only poses that passed
    /// [`is_valid`](Self::is_valid). Cells outside the board are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (row, col) in piece.cells() {
            if let Some(cell) = self.cell_mut(row, col) {
                *cell = block;
            }
        }
    }

    /// Returns the lowest pose `piece` reaches by moving straight down.
    ///
    /// An invalid starting pose is returned unchanged.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut dropped = *piece;
        if !self.is_valid(&dropped) {
            return dropped;
        }
        loop {
            let candidate = dropped.down();
            if !self.is_valid(&candidate) {
                return dropped;
            }
            dropped = candidate;
        }
    }
}
