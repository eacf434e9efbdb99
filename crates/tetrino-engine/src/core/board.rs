use serde::{Serialize, Serializer};

use super::{HEIGHT, HIDDEN_HEIGHT, WIDTH, piece::PieceKind};

/// Content of a single board cell.
///
/// The numeric [`value`](Self::value) of a cell is `0` for empty and `1..=7`
/// for the kind that locked there. Game logic only cares about empty versus
/// occupied; the kind is kept for color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Block {
    /// Converts a cell value (`0..=7`) back into a block.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        if value == 0 {
            return Some(Self::Empty);
        }
        match PieceKind::from_index(value as usize - 1) {
            Some(kind) => Some(Self::Piece(kind)),
            None => None,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Piece(kind) => kind.value(),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.value())
    }
}

/// A single board row.
pub type BoardRow = [Block; WIDTH];

const EMPTY_ROW: BoardRow = [Block::Empty; WIDTH];

/// Fixed-size cell matrix, `WIDTH` columns by `HEIGHT` rows, row 0 at the top.
///
/// Accessors take `(row, col)` and index directly: bounds are the caller's
/// responsibility, and the collision checks in this crate are the only callers
/// that build coordinates from piece poses.
///
/// # Example
///
/// ```
/// use tetrino_engine::{Block, Board, PieceKind};
///
/// let mut board = Board::EMPTY;
/// for col in 0..Board::WIDTH {
///     board.set(21, col, Block::Piece(PieceKind::I));
/// }
///
/// let lines = board.find_full_rows();
/// assert_eq!(lines.count(), 1);
///
/// board.collapse_rows(&lines);
/// assert!(board.row_is_empty(21));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; HEIGHT],
    };

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Block {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, block: Block) {
        self.rows[row][col] = block;
    }

    /// Returns the cell at signed coordinates, or `None` outside the board.
    pub(crate) fn cell(&self, row: i32, col: i32) -> Option<Block> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.rows.get(row)?.get(col).copied()
    }

    pub(crate) fn cell_mut(&mut self, row: i32, col: i32) -> Option<&mut Block> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.rows.get_mut(row)?.get_mut(col)
    }

    #[must_use]
    pub fn row_is_filled(&self, row: usize) -> bool {
        self.rows[row].iter().all(|block| !block.is_empty())
    }

    #[must_use]
    pub fn row_is_empty(&self, row: usize) -> bool {
        self.rows[row].iter().all(|block| block.is_empty())
    }

    /// Marks every filled row.
    #[must_use]
    pub fn find_full_rows(&self) -> LineClear {
        let mut lines = LineClear::NONE;
        for row in 0..HEIGHT {
            if self.row_is_filled(row) {
                lines.mark(row);
            }
        }
        lines
    }

    /// Removes the rows marked in `lines` and shifts the rows above them down.
    ///
    /// Rows are compacted in one bottom-up pass. A source cursor walks up from
    /// the bottom, skipping marked rows; each destination row takes the next
    /// surviving source row, or an empty row once the cursor runs off the top.
    pub fn collapse_rows(&mut self, lines: &LineClear) {
        // `src` is one past the next source row to copy.
        let mut src = HEIGHT;
        for dst in (0..HEIGHT).rev() {
            while src > 0 && lines.is_marked(src - 1) {
                src -= 1;
            }
            if src == 0 {
                self.rows[dst] = EMPTY_ROW;
                continue;
            }
            src -= 1;
            if src != dst {
                self.rows[dst] = self.rows[src];
            }
        }
    }

    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; HEIGHT];
    }

    /// Returns all rows from top to bottom, hidden rows included.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the rows a host presents, from top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows[HIDDEN_HEIGHT..].iter()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.iter().map(|row| row.map(Block::value)))
    }
}

/// Rows found full by [`Board::find_full_rows`].
///
/// One flag per board row plus the number of flagged rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    rows: [bool; HEIGHT],
    count: usize,
}

impl LineClear {
    pub const NONE: Self = Self {
        rows: [false; HEIGHT],
        count: 0,
    };

    fn mark(&mut self, row: usize) {
        if !self.rows[row] {
            self.rows[row] = true;
            self.count += 1;
        }
    }

    #[must_use]
    pub fn is_marked(&self, row: usize) -> bool {
        self.rows[row]
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the indices of the marked rows, top to bottom.
    pub fn marked_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row, &marked)| marked.then_some(row))
    }
}

impl Serialize for LineClear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.marked_rows())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const I: Block = Block::Piece(PieceKind::I);

    fn fill_row(board: &mut Board, row: usize, block: Block) {
        for col in 0..WIDTH {
            board.set(row, col, block);
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        for row in 0..HEIGHT {
            assert!(board.row_is_empty(row));
            assert!(!board.row_is_filled(row));
        }
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_block_values() {
        assert_eq!(Block::Empty.value(), 0);
        assert_eq!(Block::Piece(PieceKind::I).value(), 1);
        assert_eq!(Block::Piece(PieceKind::L).value(), 7);
        for value in 0..=7 {
            assert_eq!(Block::from_value(value).map(Block::value), Some(value));
        }
        assert_eq!(Block::from_value(8), None);
    }

    #[test]
    fn test_row_predicates() {
        let mut board = Board::EMPTY;
        board.set(5, 3, I);
        assert!(!board.row_is_empty(5));
        assert!(!board.row_is_filled(5));

        fill_row(&mut board, 5, I);
        assert!(board.row_is_filled(5));
    }

    #[test]
    fn test_find_full_rows_marks_only_filled_rows() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 21, I);
        fill_row(&mut board, 19, I);
        // Almost full.
        fill_row(&mut board, 20, I);
        board.set(20, 9, Block::Empty);

        let lines = board.find_full_rows();
        assert_eq!(lines.count(), 2);
        assert_eq!(lines.marked_rows().collect::<Vec<_>>(), [19, 21]);
        assert!(!lines.is_marked(20));
    }

    #[test]
    fn test_collapse_single_bottom_row() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 21, I);
        board.set(20, 0, Block::Piece(PieceKind::T));

        let lines = board.find_full_rows();
        board.collapse_rows(&lines);

        assert_eq!(board.get(21, 0), Block::Piece(PieceKind::T));
        assert!(board.row_is_empty(20));
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_collapse_non_adjacent_rows() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 21, I);
        board.set(20, 1, Block::Piece(PieceKind::S));
        fill_row(&mut board, 19, I);
        board.set(18, 2, Block::Piece(PieceKind::Z));

        let lines = board.find_full_rows();
        board.collapse_rows(&lines);

        assert_eq!(board.get(21, 1), Block::Piece(PieceKind::S));
        assert_eq!(board.get(20, 2), Block::Piece(PieceKind::Z));
        for row in 0..20 {
            assert!(board.row_is_empty(row), "row {row} should be empty");
        }
    }

    #[test]
    fn test_collapse_all_rows() {
        let mut board = Board::EMPTY;
        for row in 0..HEIGHT {
            fill_row(&mut board, row, I);
        }
        let lines = board.find_full_rows();
        assert_eq!(lines.count(), HEIGHT);

        board.collapse_rows(&lines);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_collapse_without_marks_is_noop() {
        let mut board = Board::EMPTY;
        board.set(10, 4, Block::Piece(PieceKind::O));
        let before = board.clone();

        board.collapse_rows(&LineClear::NONE);
        assert_eq!(board, before);
    }

    #[test]
    fn test_hidden_rows_are_not_visible() {
        let mut board = Board::EMPTY;
        board.set(0, 0, I);
        board.set(HIDDEN_HEIGHT, 0, Block::Piece(PieceKind::O));

        let first_visible = board.visible_rows().next().unwrap();
        assert_eq!(first_visible[0], Block::Piece(PieceKind::O));
        assert_eq!(board.visible_rows().count(), 20);
        assert_eq!(board.rows().count(), HEIGHT);
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::EMPTY;
        board.set(21, 0, Block::Piece(PieceKind::J));

        let value = serde_json::to_value(&board).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), HEIGHT);
        assert_eq!(rows[21][0], 6);
        assert_eq!(rows[0][0], 0);

        let lines = board.find_full_rows();
        assert_eq!(serde_json::to_string(&lines).unwrap(), "[]");
    }

    fn arb_row() -> impl Strategy<Value = BoardRow> {
        (any::<bool>(), prop::array::uniform10(0u8..=7)).prop_map(|(full, values)| {
            values.map(|value| {
                let value = if full { value.max(1) } else { value };
                Block::from_value(value).unwrap()
            })
        })
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::array::uniform22(arb_row()).prop_map(|rows| Board { rows })
    }

    proptest! {
        #[test]
        fn test_collapse_removes_full_rows_and_keeps_order(mut board in arb_board()) {
            let survivors: Vec<BoardRow> = board
                .rows()
                .copied()
                .filter(|row| row.iter().any(|block| block.is_empty()))
                .collect();

            let lines = board.find_full_rows();
            prop_assert_eq!(lines.count() + survivors.len(), HEIGHT);

            board.collapse_rows(&lines);
            prop_assert!(board.find_full_rows().is_empty());

            let padding = HEIGHT - survivors.len();
            for row in 0..padding {
                prop_assert!(board.row_is_empty(row));
            }
            let collapsed: Vec<BoardRow> = board.rows().skip(padding).copied().collect();
            prop_assert_eq!(collapsed, survivors);
        }
    }
}
