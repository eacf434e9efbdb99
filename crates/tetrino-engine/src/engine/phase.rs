use serde::Serialize;

/// Phase of the game state machine.
///
/// ```text
///         hard drop             full rows
/// START -----------> PLAY -----------------> LINE
///   ^                 |  ^                    |
///   |                 |  +---- delay over ----+
///   |    hard drop    | top row occupied
///   +--- GAMEOVER <---+
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting for the player to pick a starting level and start.
    #[default]
    #[display("START")]
    Start,
    /// A piece is falling.
    #[display("PLAY")]
    Play,
    /// Full rows are highlighted and about to be removed.
    #[display("LINE")]
    Line,
    /// The stack reached the top row.
    #[display("GAMEOVER")]
    GameOver,
}
