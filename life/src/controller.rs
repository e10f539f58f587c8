use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::brush::{Brush, CursorKind};
use crate::config::Config;
use crate::error::Result;
use crate::grid::Grid;
use crate::input::Event;
use crate::state::State;

/// Fixed-rate timer that drops missed fires instead of catching up.
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Ticker { interval, last: now }
    }

    /// True when at least one interval has passed since the last fire.
    /// Re-arms from `now`, so a long stall yields a single fire.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.interval {
            return false;
        }
        self.last = now;
        true
    }
}

/// Read-only snapshot handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub grid: &'a Grid,
    pub paused: bool,
    pub brush: Brush,
    pub cursor: CursorKind,
}

/// Owns the interaction state and feeds events through [`State::reduce`].
pub struct Controller {
    state: State,
    rng: StdRng,
    ticker: Ticker,
    config: Config,
}

impl Controller {
    /// Starts running with a random board, seeded from the OS.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Same as [`Controller::new`] but reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, mut rng: StdRng) -> Self {
        let grid = Grid::random(config.grid_size, &mut rng, config.density);
        log::info!(
            "{0}x{0} grid at {1} generations per second",
            grid.size(),
            config.update_rate
        );
        Controller {
            state: State::new(grid),
            rng,
            ticker: Ticker::new(config.tick_interval(), Instant::now()),
            config,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> View<'_> {
        View {
            grid: &self.state.grid,
            paused: self.state.paused,
            brush: self.state.brush,
            cursor: self.state.brush.cursor(),
        }
    }

    /// Applies `event` and reports whether the board changed.
    pub fn handle(&mut self, event: Event) -> Result<bool> {
        let next = self.state.reduce(event, &mut self.rng, self.config.density)?;
        let changed = next.grid != self.state.grid;
        self.state = next;
        Ok(changed)
    }

    pub fn tick(&mut self) -> Result<bool> {
        self.handle(Event::Tick)
    }

    /// Fires a tick if the ticker is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Result<bool> {
        if !self.ticker.due(now) {
            return Ok(false);
        }
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, Pointer};

    #[test]
    fn test_ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100), start);
        assert!(!ticker.due(start + Duration::from_millis(50)));
        assert!(ticker.due(start + Duration::from_millis(100)));
        assert!(!ticker.due(start + Duration::from_millis(150)));
    }

    #[test]
    fn test_ticker_drops_backlog() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100), start);
        let late = start + Duration::from_secs(5);
        assert!(ticker.due(late));
        assert!(!ticker.due(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::with_seed(Config::default(), 11);
        let view = controller.view();
        assert_eq!(view.grid.size(), 15);
        assert!(!view.paused);
        assert_eq!(view.brush, Brush::None);
        assert_eq!(view.cursor, CursorKind::Pointer);
    }

    #[test]
    fn test_view_follows_brush() {
        let mut controller = Controller::with_seed(Config::default(), 11);
        controller
            .handle(Event::PointerDown { row: 0, col: 0, pointer: Pointer::Mouse(Button::Secondary) })
            .unwrap();
        assert_eq!(controller.view().cursor, CursorKind::Cell);
    }

    #[test]
    fn test_handle_reports_changes() {
        let mut controller = Controller::with_seed(Config::default(), 5);
        controller.handle(Event::Clear).unwrap();
        assert!(!controller.handle(Event::Clear).unwrap());
        assert!(!controller.tick().unwrap());
        assert!(!controller.handle(Event::TogglePause).unwrap());
    }

    #[test]
    fn test_poll_waits_for_interval() {
        let start = Instant::now();
        let mut controller = Controller::with_seed(Config::default(), 5);
        controller.handle(Event::Clear).unwrap();
        let painted = controller
            .handle(Event::PointerDown { row: 7, col: 7, pointer: Pointer::Mouse(Button::Primary) })
            .unwrap();
        assert!(painted);
        controller.handle(Event::PointerUp { pointer: Pointer::Mouse(Button::Primary) }).unwrap();
        // Not due yet: the ticker was armed after `start`.
        assert!(!controller.poll(start).unwrap());
        assert_eq!(controller.state().grid.population(), 1);
        // A lone cell dies on the first tick that actually fires.
        let now = Instant::now() + controller.config().tick_interval();
        assert!(controller.poll(now).unwrap());
        assert_eq!(controller.state().grid.population(), 0);
    }
}
