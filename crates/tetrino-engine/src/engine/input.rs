/// A logical game button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Button {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("rotate")]
    Rotate,
    #[display("soft drop")]
    SoftDrop,
    #[display("hard drop")]
    HardDrop,
}

impl Button {
    pub const LEN: usize = 5;

    pub const ALL: [Self; Self::LEN] = [
        Self::Left,
        Self::Right,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// The set of buttons held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons([bool; Button::LEN]);

impl Buttons {
    pub const NONE: Self = Self([false; Button::LEN]);

    #[must_use]
    pub const fn with(mut self, button: Button) -> Self {
        self.0[button.index()] = true;
        self
    }

    pub fn set(&mut self, button: Button, held: bool) {
        self.0[button.index()] = held;
    }

    #[must_use]
    pub const fn contains(self, button: Button) -> bool {
        self.0[button.index()]
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] || other.0[i]))
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0.iter().all(|&held| !held)
    }
}

impl FromIterator<Button> for Buttons {
    fn from_iter<T: IntoIterator<Item = Button>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Per-tick input: which buttons are held and how that changed since the
/// previous tick.
///
/// The engine only reacts to [`just_pressed`](Self::just_pressed), so holding a
/// button down triggers its action once.
///
/// # Example
///
/// ```
/// use tetrino_engine::{Button, Buttons, InputSnapshot};
///
/// let first = Buttons::NONE.with(Button::Left);
/// let input = InputSnapshot::between(Buttons::NONE, first);
/// assert!(input.just_pressed(Button::Left));
///
/// // Still held on the next tick: no new press.
/// let input = InputSnapshot::between(first, first);
/// assert!(input.held(Button::Left));
/// assert!(!input.just_pressed(Button::Left));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: Buttons,
    delta: [i8; Button::LEN],
}

impl InputSnapshot {
    /// Builds the snapshot for a tick from the previous and current held sets.
    #[must_use]
    pub fn between(previous: Buttons, current: Buttons) -> Self {
        let delta =
            std::array::from_fn(|i| i8::from(current.0[i]) - i8::from(previous.0[i]));
        Self {
            held: current,
            delta,
        }
    }

    /// Snapshot in which `buttons` were pressed this tick after being released.
    #[must_use]
    pub fn pressed(buttons: Buttons) -> Self {
        Self::between(Buttons::NONE, buttons)
    }

    #[must_use]
    pub fn held_buttons(&self) -> Buttons {
        self.held
    }

    #[must_use]
    pub fn held(&self, button: Button) -> bool {
        self.held.contains(button)
    }

    /// Change in held state since the previous tick: `1`, `0` or `-1`.
    #[must_use]
    pub fn delta(&self, button: Button) -> i8 {
        self.delta[button.index()]
    }

    #[must_use]
    pub fn just_pressed(&self, button: Button) -> bool {
        self.delta(button) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let input = InputSnapshot::default();
        for button in Button::ALL {
            assert!(!input.held(button));
            assert_eq!(input.delta(button), 0);
        }
    }

    #[test]
    fn test_press_hold_release() {
        let held = Buttons::NONE.with(Button::Rotate);

        let press = InputSnapshot::between(Buttons::NONE, held);
        assert_eq!(press.delta(Button::Rotate), 1);
        assert!(press.just_pressed(Button::Rotate));

        let hold = InputSnapshot::between(held, held);
        assert_eq!(hold.delta(Button::Rotate), 0);
        assert!(!hold.just_pressed(Button::Rotate));

        let release = InputSnapshot::between(held, Buttons::NONE);
        assert_eq!(release.delta(Button::Rotate), -1);
        assert!(!release.held(Button::Rotate));
        assert!(!release.just_pressed(Button::Rotate));
    }

    #[test]
    fn test_buttons_are_independent() {
        let previous: Buttons = [Button::Left, Button::SoftDrop].into_iter().collect();
        let current: Buttons = [Button::Left, Button::HardDrop].into_iter().collect();
        let input = InputSnapshot::between(previous, current);

        assert!(!input.just_pressed(Button::Left));
        assert!(input.just_pressed(Button::HardDrop));
        assert_eq!(input.delta(Button::SoftDrop), -1);
        assert_eq!(input.delta(Button::Right), 0);
        assert_eq!(input.held_buttons(), current);
    }

    #[test]
    fn test_buttons_set_and_union() {
        let mut buttons = Buttons::NONE;
        assert!(buttons.is_empty());
        buttons.set(Button::Right, true);
        assert!(buttons.contains(Button::Right));
        buttons.set(Button::Right, false);
        assert!(buttons.is_empty());

        let union = Buttons::NONE
            .with(Button::Left)
            .union(Buttons::NONE.with(Button::Rotate));
        assert!(union.contains(Button::Left));
        assert!(union.contains(Button::Rotate));
        assert!(!union.contains(Button::HardDrop));
    }
}
