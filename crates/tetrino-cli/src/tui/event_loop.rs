use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Default ticks per second.
pub(super) const DEFAULT_TICK_RATE: f64 = 60.0;

/// Schedules ticks at a fixed interval and a redraw after every state change.
///
/// Ticks take priority over rendering, and a render is only produced when a
/// tick or a terminal event happened since the last one.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE),
            last_tick: Instant::now(),
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Blocks until the next tick is due, a render is pending or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let next_tick_at = self.last_tick + self.tick_interval;
            if now >= next_tick_at {
                // Late ticks are not replayed; the schedule restarts from now.
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if event::poll(next_tick_at.saturating_duration_since(now))? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
