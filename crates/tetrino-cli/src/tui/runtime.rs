use std::{
    io::{self, Write as _},
    time::{Duration, Instant},
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};

use super::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal application runtime.
///
/// Owns the tick schedule and the application clock, and executes an [`App`]
/// until it asks to exit.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    started_at: Instant,
    key_release_events: bool,
    bell: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            started_at: Instant::now(),
            key_release_events: false,
            bell: false,
        }
    }

    /// Sets the tick rate in ticks per second.
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Seconds since the runtime was created.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Whether the terminal reports key release events.
    ///
    /// Only meaningful once [`App::init`] has been called.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.key_release_events
    }

    /// Rings the terminal bell after the current event is handled.
    pub fn ring_bell(&mut self) {
        self.bell = true;
    }

    /// Runs the application.
    ///
    /// 1. Sets up the terminal and asks it for key release events
    /// 2. Calls `app.init()`
    /// 3. Dispatches events until `app.should_exit()` returns true
    ///    - `Tick`: calls `app.update()`
    ///    - `Render`: calls `app.draw()`
    ///    - terminal events: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if self.key_release_events {
                execute!(
                    terminal.backend_mut(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }
            tracing::debug!(
                key_release_events = self.key_release_events,
                "terminal ready"
            );

            app.init(&mut self);

            let result = (|| -> io::Result<()> {
                while !app.should_exit() {
                    match self.events.next()? {
                        TuiEvent::Tick => app.update(&mut self),
                        TuiEvent::Render => {
                            terminal.draw(|f| app.draw(f))?;
                        }
                        TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                    }
                    if self.bell {
                        self.bell = false;
                        let backend = terminal.backend_mut();
                        backend.write_all(b"\x07")?;
                        backend.flush()?;
                    }
                }
                Ok(())
            })();

            if self.key_release_events {
                execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }
}
