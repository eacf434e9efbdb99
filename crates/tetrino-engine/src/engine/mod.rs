//! Phase state machine, input model, piece supply and game progression.

pub use self::{
    config::*, game::*, input::*, phase::*, piece_source::*, progression::*, snapshot::*,
};

mod config;
mod game;
mod input;
mod phase;
mod piece_source;
pub mod progression;
mod snapshot;
