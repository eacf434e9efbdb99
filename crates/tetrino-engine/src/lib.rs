//! Deterministic game-logic engine for a falling-block puzzle.
//!
//! The engine owns no clock, input device, renderer or audio handle. A host
//! calls [`Game::advance`] once per tick with an [`InputSnapshot`] and the
//! current time, then reads [`Game::snapshot`] to present the result.
//!
//! - [`core`] - board matrix, tetromino catalog, collision and palette data
//! - [`engine`] - phase state machine, timing, scoring and leveling

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed: expected 32 hex digits, got '{input}'")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl ParseSeedError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParsePieceError {
    #[display("expected format 'kind#rotation@row,col', got '{_0}'")]
    Format(#[error(not(source))] String),
    #[display("invalid piece kind: '{_0}'")]
    Kind(#[error(not(source))] String),
    #[display("invalid rotation: '{_0}'")]
    Rotation(#[error(not(source))] String),
    #[display("invalid offset: '{_0}'")]
    Offset(#[error(not(source))] String),
}
