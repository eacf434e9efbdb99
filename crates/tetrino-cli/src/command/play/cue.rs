use tetrino_engine::Phase;

/// A host reaction to a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Cue {
    /// A game started.
    Theme,
    /// Full rows are being highlighted.
    LineClear,
    /// The stack reached the top.
    GameOver,
}

impl Cue {
    /// Picks the cue for a tick that moved the game from `previous` to
    /// `current`, if any.
    pub(crate) fn between(previous: Phase, current: Phase) -> Option<Self> {
        match (previous, current) {
            (Phase::Start, Phase::Play) => Some(Self::Theme),
            (Phase::Play, Phase::Line) => Some(Self::LineClear),
            (Phase::Play, Phase::GameOver) => Some(Self::GameOver),
            _ => None,
        }
    }
}
