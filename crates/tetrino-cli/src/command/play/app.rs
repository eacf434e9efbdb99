use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetrino_engine::{Button, Buttons, Game, GameConfig, InputSnapshot, Phase};

use crate::{
    tui::{App, Runtime},
    view::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
};

use super::{cue::Cue, key_tracker::KeyTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Press(Button),
    TogglePause,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Left => Some(Self::Press(Button::Left)),
            KeyCode::Right => Some(Self::Press(Button::Right)),
            KeyCode::Up => Some(Self::Press(Button::Rotate)),
            KeyCode::Down => Some(Self::Press(Button::SoftDrop)),
            KeyCode::Char(' ') => Some(Self::Press(Button::HardDrop)),
            KeyCode::Char('p') => Some(Self::TogglePause),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings(phase: Phase, paused: bool) -> &'static [KeyBinding] {
        if paused {
            return &[(&["p"], "Resume"), (&["q", "Esc"], "Quit")];
        }
        match phase {
            Phase::Start => &[
                (&["↑", "↓"], "Level"),
                (&["Space"], "Start"),
                (&["q", "Esc"], "Quit"),
            ],
            Phase::Play | Phase::Line => &[
                (&["←", "→"], "Move"),
                (&["↑"], "Rotate"),
                (&["↓"], "Soft Drop"),
                (&["Space"], "Hard Drop"),
                (&["p"], "Pause"),
                (&["q", "Esc"], "Quit"),
            ],
            Phase::GameOver => &[(&["Space"], "Continue"), (&["q", "Esc"], "Quit")],
        }
    }
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    game: Game,
    keys: KeyTracker,
    previous_buttons: Buttons,
    tick_rate: f64,
    bell: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(config: &GameConfig, tick_rate: f64, bell: bool) -> Self {
        Self {
            game: Game::new(config),
            keys: KeyTracker::new(false),
            previous_buttons: Buttons::NONE,
            tick_rate,
            bell,
            is_exiting: false,
        }
    }

    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    fn play_cue(&self, runtime: &mut Runtime, cue: Cue) {
        tracing::info!(
            ?cue,
            level = self.game.level(),
            lines = self.game.lines(),
            points = self.game.points(),
            "cue"
        );
        if self.bell {
            runtime.ring_bell();
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(self.tick_rate);
        self.keys = KeyTracker::new(runtime.reports_key_release());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        let Some(action) = Action::from_key_event(&event) else {
            return;
        };
        match action {
            Action::Press(button) => self.keys.handle(button, event.kind),
            Action::TogglePause if event.kind == KeyEventKind::Press => self.game.toggle_pause(),
            Action::Quit if event.kind == KeyEventKind::Press => self.is_exiting = true,
            Action::TogglePause | Action::Quit => {}
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let buttons = self.keys.sample();
        let input = InputSnapshot::between(self.previous_buttons, buttons);
        self.previous_buttons = buttons;

        let previous = self.game.phase();
        self.game.advance(&input, runtime.elapsed());
        if let Some(cue) = Cue::between(previous, self.game.phase()) {
            self.play_cue(runtime, cue);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.game.snapshot();
        let bindings = Action::bindings(snapshot.phase(), snapshot.is_paused());

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(GameDisplay::new(snapshot), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}
