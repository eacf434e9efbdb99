use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::ParsePieceError;

use super::{WIDTH, board::Block};

/// Maximum number of occupied cells in any tetromino.
pub const PIECE_CELLS: usize = 4;

/// The active piece: a kind plus a pose on the board.
///
/// `row` and `col` locate the top-left corner of the kind's bounding box and
/// may be negative or past the board edge; only [`Board::is_valid`] decides
/// whether a pose is legal. Pieces are plain values: moves and rotations
/// return a new `Piece` and leave the original untouched.
///
/// [`Board::is_valid`]: super::Board::is_valid
///
/// # Example
///
/// ```
/// use tetrino_engine::{Board, Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T);
/// let candidate = piece.left().rotated_right();
///
/// let board = Board::EMPTY;
/// assert!(board.is_valid(&candidate));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    row: i32,
    col: i32,
    rotation: Rotation,
}

impl Piece {
    pub const SPAWN_ROW: i32 = 0;
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN_COL: i32 = (WIDTH / 2) as i32;

    #[must_use]
    pub const fn new(kind: PieceKind, row: i32, col: i32, rotation: Rotation) -> Self {
        Self {
            kind,
            row,
            col,
            rotation,
        }
    }

    /// Returns a piece of `kind` in the spawn pose.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Self::SPAWN_ROW, Self::SPAWN_COL, Rotation::SPAWN)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self {
            col: self.col - 1,
            ..self
        }
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self {
            col: self.col + 1,
            ..self
        }
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self {
            row: self.row + 1,
            ..self
        }
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..self
        }
    }

    /// Returns the board coordinates `(row, col)` of every occupied cell.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<(i32, i32), PIECE_CELLS> {
        self.kind
            .tetromino()
            .occupied_cells(self.rotation)
            .into_iter()
            .map(|(row, col)| (self.row + to_offset(row), self.col + to_offset(col)))
            .collect()
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn to_offset(local: usize) -> i32 {
    // Local coordinates never exceed the largest side (4).
    local as i32
}

/// Text form `kind#rotation@row,col`, e.g. `T#1@3,5`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.index(),
            self.row,
            self.col
        )
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ParsePieceError::Format(s.to_owned());

        let (kind, rest) = s.split_once('#').ok_or_else(format_error)?;
        let (rotation, offset) = rest.split_once('@').ok_or_else(format_error)?;
        let (row, col) = offset.split_once(',').ok_or_else(format_error)?;

        let mut chars = kind.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParsePieceError::Kind(kind.to_owned()))?;

        let rotation = rotation
            .parse::<u8>()
            .ok()
            .filter(|&r| usize::from(r) < Rotation::COUNT)
            .map(Rotation::new)
            .ok_or_else(|| ParsePieceError::Rotation(rotation.to_owned()))?;

        let parse_offset = |value: &str| {
            value
                .parse::<i32>()
                .map_err(|_| ParsePieceError::Offset(value.to_owned()))
        };

        Ok(Self::new(kind, parse_offset(row)?, parse_offset(col)?, rotation))
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rotation state of a piece, always in `0..4`.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const COUNT: usize = 4;
    pub const SPAWN: Self = Self(0);

    /// Builds a rotation from any turn count, wrapping modulo 4.
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One of the seven tetromino kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
    ];

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cell value this kind leaves on the board (`1..=7`).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub const fn tetromino(self) -> &'static Tetromino {
        &TETROMINOES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use tetrino_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::from_char('T'), Some(PieceKind::T));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::O => 'O',
            Self::T => 'T',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::J => 'J',
            Self::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'O' => Some(Self::O),
            'T' => Some(Self::T),
            'S' => Some(Self::S),
            'Z' => Some(Self::Z),
            'J' => Some(Self::J),
            'L' => Some(Self::L),
            _ => None,
        }
    }
}

/// Shape definition of one kind: an `side × side` occupancy template.
///
/// Only the spawn orientation is stored. The other three orientations are
/// produced by [`sample`](Self::sample) remapping coordinates at read time.
#[derive(Debug)]
pub struct Tetromino {
    kind: PieceKind,
    side: usize,
    template: &'static [bool],
}

impl Tetromino {
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side length of the bounding box (2, 3 or 4).
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Reads local cell `(row, col)` of the shape in the given rotation.
    ///
    /// Both coordinates must be below [`side`](Self::side).
    #[must_use]
    pub fn sample(&self, row: usize, col: usize, rotation: Rotation) -> Block {
        let side = self.side;
        let (row, col) = match rotation.index() {
            0 => (row, col),
            1 => (side - 1 - col, row),
            2 => (side - 1 - row, side - 1 - col),
            _ => (col, side - 1 - row),
        };
        if self.template[row * side + col] {
            Block::Piece(self.kind)
        } else {
            Block::Empty
        }
    }

    /// Returns the local `(row, col)` of every occupied cell in the given rotation.
    #[must_use]
    pub fn occupied_cells(&self, rotation: Rotation) -> ArrayVec<(usize, usize), PIECE_CELLS> {
        let mut cells = ArrayVec::new();
        for row in 0..self.side {
            for col in 0..self.side {
                if !self.sample(row, col, rotation).is_empty() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Number of occupied cells in the template.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.template.iter().filter(|&&occupied| occupied).count()
    }
}

const TETROMINOES: [Tetromino; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    [
        Tetromino {
            kind: PieceKind::I,
            side: 4,
            #[rustfmt::skip]
            template: &[
                E, E, E, E,
                X, X, X, X,
                E, E, E, E,
                E, E, E, E,
            ],
        },
        Tetromino {
            kind: PieceKind::O,
            side: 2,
            #[rustfmt::skip]
            template: &[
                X, X,
                X, X,
            ],
        },
        Tetromino {
            kind: PieceKind::T,
            side: 3,
            #[rustfmt::skip]
            template: &[
                E, E, E,
                X, X, X,
                E, X, E,
            ],
        },
        Tetromino {
            kind: PieceKind::S,
            side: 3,
            #[rustfmt::skip]
            template: &[
                E, X, X,
                X, X, E,
                E, E, E,
            ],
        },
        Tetromino {
            kind: PieceKind::Z,
            side: 3,
            #[rustfmt::skip]
            template: &[
                X, X, E,
                E, X, X,
                E, E, E,
            ],
        },
        Tetromino {
            kind: PieceKind::J,
            side: 3,
            #[rustfmt::skip]
            template: &[
                X, E, E,
                X, X, X,
                E, E, E,
            ],
        },
        Tetromino {
            kind: PieceKind::L,
            side: 3,
            #[rustfmt::skip]
            template: &[
                E, E, X,
                X, X, X,
                E, E, E,
            ],
        },
    ]
};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rotations() -> impl Iterator<Item = Rotation> {
        (0..4).map(Rotation::new)
    }

    #[test]
    fn test_catalog_order_matches_kind_index() {
        for (index, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), index);
            assert_eq!(kind.tetromino().kind(), kind);
            assert_eq!(PieceKind::from_index(index), Some(kind));
        }
        assert_eq!(PieceKind::from_index(PieceKind::LEN), None);
    }

    #[test]
    fn test_sides() {
        assert_eq!(PieceKind::I.tetromino().side(), 4);
        assert_eq!(PieceKind::O.tetromino().side(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(kind.tetromino().side(), 3);
        }
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for kind in PieceKind::ALL {
            let tetromino = kind.tetromino();
            assert_eq!(tetromino.cell_count(), 4);
            for rotation in rotations() {
                assert_eq!(
                    tetromino.occupied_cells(rotation).len(),
                    tetromino.cell_count(),
                    "{kind:?} rotation {}",
                    rotation.index()
                );
            }
        }
    }

    #[test]
    fn test_i_piece_rotations() {
        let i = PieceKind::I.tetromino();
        assert_eq!(
            i.occupied_cells(Rotation::new(0)).as_slice(),
            &[(1, 0), (1, 1), (1, 2), (1, 3)]
        );
        // Clockwise: the horizontal bar becomes column 2.
        assert_eq!(
            i.occupied_cells(Rotation::new(1)).as_slice(),
            &[(0, 2), (1, 2), (2, 2), (3, 2)]
        );
        assert_eq!(
            i.occupied_cells(Rotation::new(2)).as_slice(),
            &[(2, 0), (2, 1), (2, 2), (2, 3)]
        );
        assert_eq!(
            i.occupied_cells(Rotation::new(3)).as_slice(),
            &[(0, 1), (1, 1), (2, 1), (3, 1)]
        );
    }

    #[test]
    fn test_t_piece_rotations() {
        let t = PieceKind::T.tetromino();
        // Spawn: flat top row with the nub pointing down.
        assert_eq!(t.sample(2, 1, Rotation::new(0)), Block::Piece(PieceKind::T));
        // 90° clockwise: nub points left.
        assert_eq!(t.sample(1, 0, Rotation::new(1)), Block::Piece(PieceKind::T));
        assert_eq!(t.sample(1, 2, Rotation::new(1)), Block::Empty);
        // 180°: nub points up.
        assert_eq!(t.sample(0, 1, Rotation::new(2)), Block::Piece(PieceKind::T));
        // 270°: nub points right.
        assert_eq!(t.sample(1, 2, Rotation::new(3)), Block::Piece(PieceKind::T));
        assert_eq!(t.sample(1, 0, Rotation::new(3)), Block::Empty);
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let o = PieceKind::O.tetromino();
        let spawn = o.occupied_cells(Rotation::SPAWN);
        for rotation in rotations() {
            assert_eq!(o.occupied_cells(rotation), spawn);
        }
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::new(4), Rotation::SPAWN);
        assert_eq!(Rotation::new(3).rotated_right(), Rotation::SPAWN);
        let mut rotation = Rotation::SPAWN;
        for _ in 0..8 {
            rotation = rotation.rotated_right();
            assert!(rotation.index() < Rotation::COUNT);
        }
    }

    #[test]
    fn test_spawn_pose() {
        let piece = Piece::spawn(PieceKind::J);
        assert_eq!(piece.row(), 0);
        assert_eq!(piece.col(), 5);
        assert_eq!(piece.rotation(), Rotation::SPAWN);
        assert_eq!(piece.cells().as_slice(), &[(0, 5), (1, 5), (1, 6), (1, 7)]);
    }

    #[test]
    fn test_moves_return_new_values() {
        let piece = Piece::spawn(PieceKind::S);
        let moved = piece.left().down().rotated_right();
        assert_eq!(piece.col(), 5);
        assert_eq!(moved.col(), 4);
        assert_eq!(moved.row(), 1);
        assert_eq!(moved.rotation(), Rotation::new(1));
        assert_eq!(piece.right().col(), 6);
    }

    #[test]
    fn test_piece_text_format() {
        let piece = Piece::new(PieceKind::S, 18, -1, Rotation::new(1));
        assert_eq!(piece.to_string(), "S#1@18,-1");
        assert_eq!("S#1@18,-1".parse::<Piece>().unwrap(), piece);

        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"S#1@18,-1\"");
        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_parse_errors() {
        assert!(matches!(
            "S1@4,18".parse::<Piece>(),
            Err(ParsePieceError::Format(_))
        ));
        assert!(matches!(
            "S#1@4".parse::<Piece>(),
            Err(ParsePieceError::Format(_))
        ));
        assert!(matches!(
            "X#1@4,18".parse::<Piece>(),
            Err(ParsePieceError::Kind(_))
        ));
        assert!(matches!(
            "SS#1@4,18".parse::<Piece>(),
            Err(ParsePieceError::Kind(_))
        ));
        assert!(matches!(
            "S#4@4,18".parse::<Piece>(),
            Err(ParsePieceError::Rotation(_))
        ));
        assert!(matches!(
            "S#1@a,18".parse::<Piece>(),
            Err(ParsePieceError::Offset(_))
        ));
        assert!(serde_json::from_str::<Piece>("\"S#1@4,xyz\"").is_err());
    }

    #[test]
    fn test_uniform_distribution_covers_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    proptest! {
        #[test]
        fn test_rotation_is_a_bijection(kind_index in 0..PieceKind::LEN, turns in 0u8..16) {
            let tetromino = PieceKind::ALL[kind_index].tetromino();
            let rotation = Rotation::new(turns);
            let cells = tetromino.occupied_cells(rotation);
            prop_assert_eq!(cells.len(), tetromino.cell_count());

            // Four clockwise turns return to the same shape.
            let mut full_turn = rotation;
            for _ in 0..4 {
                full_turn = full_turn.rotated_right();
            }
            prop_assert_eq!(tetromino.occupied_cells(full_turn), cells);
        }
    }
}
