/*!
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell with more than three live neighbors dies.
* A dead cell will be brought back to live if it has exactly three live neighbors.
*/

use crate::error::{LifeError, Result};
use crate::grid::Cell::{Alive, Dead};
use crate::grid::{Cell, Grid};

/// Maps a cell and its live neighbor count to the cell's next state.
pub type Rule = fn(Cell, usize) -> Result<Cell>;

#[derive(Clone, Copy)]
enum Next {
    Dies,
    Keeps,
    Lives,
}

/// Outcome per live neighbor count, 0 through 8.
const LIFE_TABLE: [Next; 9] = [
    Next::Dies,
    Next::Dies,
    Next::Keeps,
    Next::Lives,
    Next::Dies,
    Next::Dies,
    Next::Dies,
    Next::Dies,
    Next::Dies,
];

/// Conway's rule as a lookup table. Counts above 8 mean neighbor counting is broken.
pub fn transition(cell: Cell, live_neighbors: usize) -> Result<Cell> {
    match LIFE_TABLE.get(live_neighbors) {
        Some(Next::Dies) => Ok(Dead),
        Some(Next::Keeps) => Ok(cell),
        Some(Next::Lives) => Ok(Alive),
        None => Err(LifeError::InvalidNeighborCount(live_neighbors)),
    }
}

/// Advance the grid by one generation using Conway's rule.
pub fn advance(grid: &Grid) -> Result<Grid> {
    advance_with(grid, transition)
}

/// Advance the grid by one generation. Cells past the edge count as dead.
pub fn advance_with(grid: &Grid, rule: Rule) -> Result<Grid> {
    let rows = grid
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| rule(*cell, alive_neighbors(grid, row, col)))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Grid::from_rows(rows)
}

/// Count the number of alive neighbors for a cell
pub fn alive_neighbors(grid: &Grid, row: usize, col: usize) -> usize {
    let mut count = 0;

    for dr in [-1, 0, 1] {
        for dc in [-1, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }

            let neighbor = row
                .checked_add_signed(dr)
                .zip(col.checked_add_signed(dc))
                .and_then(|(r, c)| grid.get(r, c));

            if neighbor == Some(Alive) {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn test_underpopulation() {
        assert_eq!(transition(Dead, 0), Ok(Dead));
        assert_eq!(transition(Dead, 1), Ok(Dead));
        assert_eq!(transition(Alive, 0), Ok(Dead));
        assert_eq!(transition(Alive, 1), Ok(Dead));
    }

    #[test]
    fn test_survival() {
        assert_eq!(transition(Alive, 2), Ok(Alive));
        assert_eq!(transition(Alive, 3), Ok(Alive));
    }

    #[test]
    fn test_overpopulation() {
        for count in 4..=8 {
            assert_eq!(transition(Alive, count), Ok(Dead));
            assert_eq!(transition(Dead, count), Ok(Dead));
        }
    }

    #[test]
    fn test_reproduction() {
        assert_eq!(transition(Dead, 3), Ok(Alive));
    }

    #[test]
    fn test_two_neighbors_keeps_dead_cell_dead() {
        assert_eq!(transition(Dead, 2), Ok(Dead));
    }

    #[test]
    fn test_invalid_neighbor_count() {
        assert_eq!(transition(Alive, 9), Err(LifeError::InvalidNeighborCount(9)));
    }

    #[test]
    fn test_advance_dead_grid() {
        let dead = Grid::dead(15);
        assert_eq!(advance(&dead), Ok(Grid::dead(15)));
    }

    #[test]
    fn test_advance_leaves_input_untouched() {
        let before = grid("
            .#..
            .##.
            #..#
            ..#.
        ");
        let snapshot = before.clone();
        let after = advance(&before).unwrap();
        assert_eq!(before, snapshot);
        assert_ne!(after, before);
    }

    #[test]
    fn test_lonely_corner_dies() {
        for (row, col) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            let start = Grid::dead(5).with_cell(row, col, Alive);
            assert_eq!(advance(&start), Ok(Grid::dead(5)));
        }
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // A blinker against the left edge would gain births on the right if the board wrapped.
        let start = grid("
            .....
            #....
            #....
            #....
            .....
        ");
        let expected = grid("
            .....
            .....
            ##...
            .....
            .....
        ");
        assert_eq!(advance(&start), Ok(expected));
    }

    #[test]
    fn test_blinker() {
        let start = grid("
            ...
            ###
            ...
        ");
        let expected = grid("
            .#.
            .#.
            .#.
        ");
        assert_eq!(advance(&start), Ok(expected.clone()));
        assert_eq!(advance(&expected), Ok(start));
    }

    #[test]
    fn test_block_is_still() {
        let block = grid("
            ....
            .##.
            .##.
            ....
        ");
        assert_eq!(advance(&block), Ok(block));
    }

    #[test]
    fn test_alive_neighbors_at_border() {
        let full = grid("
            ###
            ###
            ###
        ");
        assert_eq!(alive_neighbors(&full, 0, 0), 3);
        assert_eq!(alive_neighbors(&full, 0, 1), 5);
        assert_eq!(alive_neighbors(&full, 1, 1), 8);
    }

    #[test]
    fn test_rule_errors_propagate() {
        fn broken(_: Cell, _: usize) -> Result<Cell> {
            Err(LifeError::InvalidNeighborCount(42))
        }
        assert_eq!(advance_with(&Grid::dead(2), broken), Err(LifeError::InvalidNeighborCount(42)));
    }
}
