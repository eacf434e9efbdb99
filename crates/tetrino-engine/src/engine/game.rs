use tracing::{debug, trace};

use crate::core::{Board, LineClear, Piece};

use super::{
    Button, GameConfig, InputSnapshot, Phase, PieceSeed, PieceSource, Snapshot,
    progression::{LINE_CLEAR_DELAY, drop_interval, lines_for_next_level, points},
};

/// Result of a single soft-drop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move; it was merged and a new piece spawned.
    Locked,
}

/// The whole game state, advanced one tick at a time.
///
/// A `Game` is owned by the host loop and mutated only through
/// [`advance`](Self::advance) and [`toggle_pause`](Self::toggle_pause). All
/// times are seconds on the host's monotonic clock.
///
/// # Example
///
/// ```
/// use tetrino_engine::{Button, Buttons, Game, GameConfig, InputSnapshot, Phase};
///
/// let mut game = Game::new(&GameConfig::default());
/// assert_eq!(game.phase(), Phase::Start);
///
/// let start = InputSnapshot::pressed(Buttons::NONE.with(Button::HardDrop));
/// game.advance(&start, 0.0);
/// assert_eq!(game.phase(), Phase::Play);
///
/// // Gravity pulls the piece one row once the drop interval has passed.
/// let row = game.snapshot().piece().unwrap().row();
/// game.advance(&InputSnapshot::default(), 1.0);
/// assert_eq!(game.snapshot().piece().unwrap().row(), row + 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    piece: Option<Piece>,
    pending_lines: LineClear,
    phase: Phase,
    paused: bool,
    start_level: usize,
    level: usize,
    lines: usize,
    points: usize,
    next_drop_time: f64,
    highlight_end_time: f64,
    time: f64,
    pieces: PieceSource,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl Game {
    /// Creates a game waiting on the START screen.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let pieces = config
            .seed
            .map_or_else(PieceSource::new, PieceSource::with_seed);
        debug!(
            start_level = config.start_level,
            seed = %pieces.seed(),
            "new game"
        );
        Self {
            board: Board::EMPTY,
            piece: None,
            pending_lines: LineClear::NONE,
            phase: Phase::Start,
            paused: false,
            start_level: config.start_level,
            level: config.start_level,
            lines: 0,
            points: 0,
            next_drop_time: 0.0,
            highlight_end_time: 0.0,
            time: 0.0,
            pieces,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn start_level(&self) -> usize {
        self.start_level
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn points(&self) -> usize {
        self.points
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Seed of the piece sequence, for replaying the same game.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.pieces.seed()
    }

    #[must_use]
    pub fn next_drop_time(&self) -> f64 {
        self.next_drop_time
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, phase = %self.phase, "pause changed");
        }
        self.paused = paused;
    }

    /// Returns the read-only view a host presents after a tick.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let piece = self.piece.filter(|_| self.phase.is_play());
        Snapshot {
            board: &self.board,
            piece,
            ghost: piece.map(|piece| self.board.drop_position(&piece)),
            pending_lines: self.phase.is_line().then_some(&self.pending_lines),
            phase: self.phase,
            paused: self.paused,
            start_level: self.start_level,
            level: self.level,
            lines: self.lines,
            points: self.points,
            time: self.time,
        }
    }

    /// Advances the game by one tick.
    ///
    /// `time` is the host clock in seconds. It is recorded even while paused,
    /// but no phase logic runs until the game is resumed.
    pub fn advance(&mut self, input: &InputSnapshot, time: f64) {
        self.time = time;
        if self.paused {
            return;
        }
        match self.phase {
            Phase::Start => self.update_start(input),
            Phase::Play => self.update_play(input),
            Phase::Line => self.update_line(),
            Phase::GameOver => self.update_game_over(input),
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, time = self.time, "phase transition");
        self.phase = phase;
    }

    fn update_start(&mut self, input: &InputSnapshot) {
        if input.just_pressed(Button::Rotate) {
            self.start_level += 1;
            debug!(start_level = self.start_level, "start level raised");
        }
        if input.just_pressed(Button::SoftDrop) && self.start_level > 0 {
            self.start_level -= 1;
            debug!(start_level = self.start_level, "start level lowered");
        }
        if input.just_pressed(Button::HardDrop) {
            self.board.clear();
            self.pending_lines = LineClear::NONE;
            self.level = self.start_level;
            self.lines = 0;
            self.points = 0;
            self.spawn();
            self.enter(Phase::Play);
        }
    }

    fn update_play(&mut self, input: &InputSnapshot) {
        let Some(piece) = self.piece else {
            return;
        };

        // Translation and rotation are validated together as one candidate.
        let mut candidate = piece;
        if input.just_pressed(Button::Left) {
            candidate = candidate.left();
        }
        if input.just_pressed(Button::Right) {
            candidate = candidate.right();
        }
        if input.just_pressed(Button::Rotate) {
            candidate = candidate.rotated_right();
        }
        if self.board.is_valid(&candidate) {
            self.piece = Some(candidate);
        }

        if input.just_pressed(Button::SoftDrop) {
            self.soft_drop();
        }
        if input.just_pressed(Button::HardDrop) {
            while self.soft_drop().is_moved() {}
        }
        while self.time >= self.next_drop_time {
            self.soft_drop();
            // A clock too large for the interval to move it stops the catch-up.
            if self.next_drop_time <= self.time {
                break;
            }
        }

        self.pending_lines = self.board.find_full_rows();
        if !self.pending_lines.is_empty() {
            self.highlight_end_time = self.time + LINE_CLEAR_DELAY;
            self.enter(Phase::Line);
        } else if !self.board.row_is_empty(0) {
            self.piece = None;
            self.enter(Phase::GameOver);
        }
    }

    fn update_line(&mut self) {
        if self.time < self.highlight_end_time {
            return;
        }

        let cleared = self.pending_lines.count();
        self.board.collapse_rows(&self.pending_lines);
        self.pending_lines = LineClear::NONE;

        self.lines += cleared;
        self.points += points(self.level, cleared);
        if self.lines >= lines_for_next_level(self.start_level, self.level) {
            self.level += 1;
            debug!(level = self.level, lines = self.lines, "level up");
        }
        debug!(cleared, points = self.points, "rows cleared");

        self.enter(Phase::Play);
    }

    fn update_game_over(&mut self, input: &InputSnapshot) {
        if input.just_pressed(Button::HardDrop) {
            self.enter(Phase::Start);
        }
    }

    /// Replaces the active piece with a fresh one in the spawn pose.
    fn spawn(&mut self) {
        let piece = Piece::spawn(self.pieces.next_kind());
        trace!(%piece, "piece spawned");
        self.piece = Some(piece);
        self.next_drop_time = self.time + drop_interval(self.level);
    }

    /// Moves the active piece down one row, or locks it if it cannot move.
    ///
    /// With no active piece nothing moves and the step reports a lock.
    fn soft_drop(&mut self) -> DropOutcome {
        let Some(piece) = self.piece else {
            return DropOutcome::Locked;
        };

        let candidate = piece.down();
        if self.board.is_valid(&candidate) {
            self.piece = Some(candidate);
            self.next_drop_time = self.time + drop_interval(self.level);
            return DropOutcome::Moved;
        }

        self.board.merge(&piece);
        trace!(%piece, "piece locked");
        self.spawn();
        DropOutcome::Locked
    }
}
