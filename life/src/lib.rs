//! Conway's Game of Life on a small square board, with a paintable
//! interaction layer on top.
//!
//! [`rule`] computes generations. [`state::State`] is the interaction state
//! with a pure [`State::reduce`](state::State::reduce) step, and
//! [`controller::Controller`] owns that state together with the random
//! source and the fixed-rate ticker that frontends drive.

pub mod brush;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod rule;
pub mod state;

pub use brush::{Brush, CursorKind};
pub use config::Config;
pub use controller::{Controller, Ticker, View};
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid};
pub use input::{Button, Event, Key, Pointer};
pub use state::State;
