use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::Cell::{Alive, Dead};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// The opposite state, used by the touch toggle gesture.
    pub fn inverted(self) -> Cell {
        match self {
            Alive => Dead,
            Dead => Alive,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Alive
        } else {
            Dead
        }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

/// A square board of cells, stored row by row.
///
/// Every constructor keeps the board N×N with N > 0, so code walking the
/// rows never has to deal with ragged or empty boards.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// An all-dead board of `size` × `size` cells.
    ///
    /// A `size` of zero is bumped to one.
    pub fn dead(size: usize) -> Self {
        let size = size.max(1);
        Grid {
            cells: vec![vec![Dead; size]; size],
        }
    }

    /// A board where each cell is independently alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R, density: f64) -> Self {
        let size = size.max(1);
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let cells = (0..size)
            .map(|_| (0..size).map(|_| Cell::from(rng.random_bool(density))).collect())
            .collect();
        Grid { cells }
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(LifeError::EmptyGrid);
        }
        let expected = rows.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, cells)| cells.len() != expected) {
            return Err(LifeError::NotSquare {
                row,
                len: cells.len(),
                expected,
            });
        }
        Ok(Grid { cells: rows })
    }

    /// Number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_alive()).count()
    }

    /// Returns a copy with the cell at (`row`, `col`) set to `cell`.
    /// Coordinates outside the board leave it unchanged.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *slot = cell;
        }
        next
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Parses rows of `#` (alive) and `.` (dead), one row per line.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '#' => Ok(Alive),
                        '.' => Ok(Dead),
                        other => Err(LifeError::InvalidCell(other)),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dead_grid() {
        let grid = Grid::dead(15);
        assert_eq!(grid.size(), 15);
        assert!(grid.rows().all(|row| row.len() == 15));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_dead_grid_is_never_empty() {
        assert_eq!(Grid::dead(0).size(), 1);
    }

    #[test]
    fn test_random_grid_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(100, &mut rng, 0.5);
        assert_eq!(grid.size(), 100);
        let pop = grid.population();
        // 10000 cells at 50% density
        assert!(pop > 4000 && pop < 6000, "population {pop}");
    }

    #[test]
    fn test_random_grid_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(10, &mut rng, 0.0).population(), 0);
        assert_eq!(Grid::random(10, &mut rng, 1.0).population(), 100);
    }

    #[test]
    fn test_random_grid_nan_density_is_dead() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(4, &mut rng, f64::NAN), Grid::dead(4));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![Dead, Dead], vec![Dead]];
        assert_eq!(
            Grid::from_rows(rows),
            Err(LifeError::NotSquare { row: 1, len: 1, expected: 2 })
        );
        assert_eq!(Grid::from_rows(Vec::new()), Err(LifeError::EmptyGrid));
    }

    #[test]
    fn test_from_rows_rejects_rectangular() {
        let rows = vec![vec![Dead, Dead, Dead], vec![Dead, Dead, Dead]];
        assert!(matches!(Grid::from_rows(rows), Err(LifeError::NotSquare { row: 0, .. })));
    }

    #[test]
    fn test_parse_and_display() {
        let grid: Grid = "
            .#.
            ##.
            ...
        "
        .parse()
        .unwrap();
        assert_eq!(grid.get(0, 1), Some(Alive));
        assert_eq!(grid.get(1, 0), Some(Alive));
        assert_eq!(grid.get(2, 2), Some(Dead));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.to_string(), ".#.\n##.\n...");
    }

    #[test]
    fn test_parse_invalid_cell() {
        assert_eq!("#x\n..".parse::<Grid>(), Err(LifeError::InvalidCell('x')));
    }

    #[test]
    fn test_with_cell_copies() {
        let grid = Grid::dead(3);
        let painted = grid.with_cell(1, 2, Alive);
        assert_eq!(grid.population(), 0);
        assert_eq!(painted.get(1, 2), Some(Alive));
        assert_eq!(painted.population(), 1);
        assert_eq!(painted.with_cell(5, 5, Alive), painted);
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(Cell::from(true), Alive);
        assert!(!bool::from(Dead));
        assert_eq!(Alive.inverted(), Dead);
        assert_eq!(Dead.inverted(), Alive);
    }
}
