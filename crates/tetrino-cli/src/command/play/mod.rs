use anyhow::Context as _;
use tetrino_engine::{GameConfig, PieceSeed};

use crate::tui::Runtime;

use self::app::PlayApp;

mod app;
mod cue;
mod key_tracker;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Ticks per second
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    /// Starting level preselected on the start screen
    #[clap(long, default_value_t = 0)]
    start_level: usize,
    /// Piece seed as 32 hex digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Ring the terminal bell on line clears, game over and game start
    #[clap(long)]
    bell: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            fps: 60.0,
            start_level: 0,
            seed: None,
            bell: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        fps,
        start_level,
        seed,
        bell,
    } = arg;
    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "--fps must be a positive number, got {fps}"
    );

    let config = GameConfig {
        start_level: *start_level,
        seed: *seed,
    };
    let mut app = PlayApp::new(&config, *fps, *bell);
    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    let game = app.game();
    tracing::info!(
        seed = %game.seed(),
        level = game.level(),
        lines = game.lines(),
        points = game.points(),
        "session ended"
    );
    Ok(())
}
