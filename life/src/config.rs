use std::time::Duration;

pub const GRID_SIZE: usize = 15;
/// Generations per second.
pub const UPDATE_RATE: u32 = 10;
pub const DENSITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub grid_size: usize,
    pub update_rate: u32,
    /// Chance of a cell starting alive when the board is randomized.
    pub density: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: GRID_SIZE,
            update_rate: UPDATE_RATE,
            density: DENSITY,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.update_rate.max(1)
    }
}
