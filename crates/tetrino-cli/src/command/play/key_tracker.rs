use crossterm::event::KeyEventKind;
use tetrino_engine::{Button, Buttons};

/// Turns terminal key events into a per-tick held set.
///
/// Terminals report key presses, and only some report releases. When releases
/// are reported a button stays held until its release arrives. Otherwise a
/// press counts as held for the tick it arrived in. A press and release inside
/// one tick still shows up as held for that tick.
#[derive(Debug, Clone)]
pub(crate) struct KeyTracker {
    reports_release: bool,
    held: Buttons,
    pressed: Buttons,
}

impl KeyTracker {
    pub(crate) fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: Buttons::NONE,
            pressed: Buttons::NONE,
        }
    }

    pub(crate) fn handle(&mut self, button: Button, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press => {
                self.pressed.set(button, true);
                if self.reports_release {
                    self.held.set(button, true);
                }
            }
            // Auto-repeat of a key that is already held.
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.held.set(button, false),
        }
    }

    /// Returns the buttons held during the tick that just ended.
    pub(crate) fn sample(&mut self) -> Buttons {
        let buttons = self.held.union(self.pressed);
        self.pressed = Buttons::NONE;
        buttons
    }
}
