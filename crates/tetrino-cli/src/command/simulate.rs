use std::io::{self, Write as _};

use anyhow::Context as _;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tetrino_engine::{Button, Buttons, Game, GameConfig, InputSnapshot, PieceSeed, Snapshot};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hex digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Seed for the simulated button presses (defaults to the piece seed)
    #[clap(long)]
    input_seed: Option<PieceSeed>,
    /// Number of ticks to run
    #[clap(long, default_value_t = 3600)]
    ticks: usize,
    /// Starting level
    #[clap(long, default_value_t = 0)]
    start_level: usize,
    /// Ticks per simulated second
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    /// Stop at the first game over instead of running every tick
    #[clap(long)]
    until_game_over: bool,
    /// Pretty-print the JSON output
    #[clap(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    seed: PieceSeed,
    input_seed: PieceSeed,
    ticks: usize,
    snapshot: Snapshot<'a>,
}

/// Chance per tick that each button goes down, in `Button::ALL` order.
const PRESS_CHANCE: [f64; Button::LEN] = [0.12, 0.12, 0.10, 0.08, 0.02];

/// Draws the held set for one simulated tick.
fn random_buttons<R: Rng + ?Sized>(rng: &mut R) -> Buttons {
    Button::ALL
        .into_iter()
        .zip(PRESS_CHANCE)
        .filter(|&(_, chance)| rng.random_bool(chance))
        .map(|(button, _)| button)
        .collect()
}

struct Simulation {
    game: Game,
    input_seed: PieceSeed,
    ticks: usize,
}

fn simulate(arg: &SimulateArg) -> Simulation {
    let SimulateArg {
        seed,
        input_seed,
        ticks,
        start_level,
        fps,
        until_game_over,
        pretty: _,
    } = arg;

    let mut game = Game::new(&GameConfig {
        start_level: *start_level,
        seed: *seed,
    });
    let input_seed = input_seed.unwrap_or_else(|| game.seed());
    let mut rng = Pcg32::from_seed(input_seed.to_bytes());

    let mut previous = Buttons::NONE;
    let mut ran = 0;
    for tick in 0..*ticks {
        // Always leave the start screen on the first tick.
        let buttons = if tick == 0 {
            Buttons::NONE.with(Button::HardDrop)
        } else {
            random_buttons(&mut rng)
        };
        let input = InputSnapshot::between(previous, buttons);
        previous = buttons;

        #[expect(clippy::cast_precision_loss)]
        let time = tick as f64 / fps;
        game.advance(&input, time);
        ran = tick + 1;

        if *until_game_over && game.phase().is_game_over() {
            break;
        }
    }

    tracing::info!(
        seed = %game.seed(),
        %input_seed,
        ticks = ran,
        phase = %game.phase(),
        points = game.points(),
        "simulation finished"
    );
    Simulation {
        game,
        input_seed,
        ticks: ran,
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.fps.is_finite() && arg.fps > 0.0,
        "--fps must be a positive number, got {}",
        arg.fps
    );

    let simulation = simulate(arg);
    let report = Report {
        seed: simulation.game.seed(),
        input_seed: simulation.input_seed,
        ticks: simulation.ticks,
        snapshot: simulation.game.snapshot(),
    };

    let mut stdout = io::stdout().lock();
    let written = if arg.pretty {
        serde_json::to_writer_pretty(&mut stdout, &report)
    } else {
        serde_json::to_writer(&mut stdout, &report)
    };
    written.context("failed to write simulation report")?;
    writeln!(stdout).context("failed to write simulation report")?;
    Ok(())
}
