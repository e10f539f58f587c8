use log::{debug, trace};
use rand::Rng;

use crate::brush::Brush;
use crate::error::Result;
use crate::grid::Grid;
use crate::input::{Event, Pointer};
use crate::rule;

/// Everything a frame needs: the board, the pause flag and the active brush.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct State {
    pub grid: Grid,
    pub paused: bool,
    pub brush: Brush,
}

impl State {
    /// Running, no brush, with the given board.
    pub fn new(grid: Grid) -> Self {
        State {
            grid,
            paused: false,
            brush: Brush::None,
        }
    }

    /// Ticks only advance the board while running and not painting.
    pub fn is_ticking(&self) -> bool {
        !self.paused && !self.brush.is_active()
    }

    /// Returns the state that follows `event`.
    ///
    /// `rng` and `density` are only used by [`Event::Randomize`]. The only
    /// error is a rule failure while advancing the board on [`Event::Tick`].
    pub fn reduce<R: Rng + ?Sized>(&self, event: Event, rng: &mut R, density: f64) -> Result<State> {
        let next = match event {
            Event::Tick => {
                if !self.is_ticking() {
                    return Ok(self.clone());
                }
                trace!("tick");
                State {
                    grid: rule::advance(&self.grid)?,
                    ..self.clone()
                }
            }
            Event::TogglePause => {
                debug!("paused: {}", !self.paused);
                State {
                    paused: !self.paused,
                    ..self.clone()
                }
            }
            Event::Clear => {
                debug!("clearing grid");
                State {
                    grid: Grid::dead(self.grid.size()),
                    ..self.clone()
                }
            }
            Event::Randomize => {
                debug!("randomizing grid");
                State {
                    grid: Grid::random(self.grid.size(), rng, density),
                    ..self.clone()
                }
            }
            Event::Key(key) => match key.command() {
                Some(command) => return self.reduce(command, rng, density),
                None => self.clone(),
            },
            Event::PointerDown { row, col, pointer } => self.press(row, col, pointer),
            Event::PointerEnter { row, col } => self.paint(row, col),
            Event::PointerUp { pointer } => self.release(pointer),
            Event::PointerLeave => self.end_gesture(),
            Event::ContextMenu { touch } => {
                if touch {
                    return self.reduce(Event::TogglePause, rng, density);
                }
                self.clone()
            }
        };
        Ok(next)
    }

    fn press(&self, row: usize, col: usize, pointer: Pointer) -> State {
        let Some(target) = self.grid.get(row, col) else {
            return self.clone();
        };
        let Some(brush) = Brush::for_press(pointer, target) else {
            return self.clone();
        };
        debug!("brush {brush:?} at ({row}, {col})");
        State {
            brush,
            ..self.clone()
        }
        .paint(row, col)
    }

    fn paint(&self, row: usize, col: usize) -> State {
        let Some(cell) = self.brush.cell() else {
            return self.clone();
        };
        match self.grid.get(row, col) {
            Some(current) if current != cell => {
                trace!("paint ({row}, {col}) {cell:?}");
                State {
                    grid: self.grid.with_cell(row, col, cell),
                    ..self.clone()
                }
            }
            _ => self.clone(),
        }
    }

    fn release(&self, pointer: Pointer) -> State {
        if let Pointer::Mouse(button) = pointer {
            if Brush::for_button(button).is_none() {
                return self.clone();
            }
        }
        self.end_gesture()
    }

    fn end_gesture(&self) -> State {
        if self.brush.is_active() {
            debug!("brush released");
        }
        State {
            brush: Brush::None,
            ..self.clone()
        }
    }
}
