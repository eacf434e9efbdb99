use serde::Serialize;

use crate::core::{Board, LineClear, Piece};

use super::Phase;

/// Read-only view of a [`Game`](super::Game) taken after a tick.
///
/// Hosts render from a snapshot and compare the phases of consecutive
/// snapshots to decide when to play cues. The piece and ghost are present only
/// in [`Phase::Play`]; the pending rows only in [`Phase::Line`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub(super) board: &'a Board,
    pub(super) piece: Option<Piece>,
    pub(super) ghost: Option<Piece>,
    pub(super) pending_lines: Option<&'a LineClear>,
    pub(super) phase: Phase,
    pub(super) paused: bool,
    pub(super) start_level: usize,
    pub(super) level: usize,
    pub(super) lines: usize,
    pub(super) points: usize,
    pub(super) time: f64,
}

impl<'a> Snapshot<'a> {
    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// Where the active piece would land after a hard drop.
    #[must_use]
    pub fn ghost(&self) -> Option<Piece> {
        self.ghost
    }

    #[must_use]
    pub fn pending_lines(&self) -> Option<&'a LineClear> {
        self.pending_lines
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
}
