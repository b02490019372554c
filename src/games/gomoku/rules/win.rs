//! Win detection logic for gomoku.

use super::super::{Coord, Grid, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// Scan directions as `(d_row, d_col)`, in tie-break priority order.
///
/// Each axis appears once; its mirror is never scanned.
pub const DIRECTIONS: [(isize, isize); 4] = [
    (1, 0),  // Down a column
    (0, 1),  // Along a row
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal down-left
];

/// A winning alignment: the winner and the five cells to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    /// Player owning the alignment.
    pub winner: Player,
    /// Exactly five contiguous cells, starting at the scan origin.
    pub line: [Coord; WIN_LENGTH],
}

/// Checks the grid for five in a row.
///
/// Cells are scanned in row-major order and, per cell, in [`DIRECTIONS`]
/// order; the first qualifying (cell, direction) pair wins. Longer runs
/// still win, but only their first five cells are reported.
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn check_win(grid: &Grid) -> Option<WinLine> {
    for (origin, cell) in grid.iter_cells() {
        let Some(player) = cell.player() else {
            continue;
        };

        for direction in DIRECTIONS {
            if let Some(line) = run_from(grid, origin, direction, player) {
                debug!(winner = ?player, origin = %origin, ?direction, "Alignment found");
                return Some(WinLine {
                    winner: player,
                    line,
                });
            }
        }
    }

    None
}

/// Collects five same-player cells from `origin` along `direction`.
fn run_from(
    grid: &Grid,
    origin: Coord,
    direction: (isize, isize),
    player: Player,
) -> Option<[Coord; WIN_LENGTH]> {
    let mut line = [origin; WIN_LENGTH];
    for (step, slot) in line.iter_mut().enumerate().skip(1) {
        let next = origin.offset(direction, step as isize)?;
        if grid.occupant(next) != Some(player) {
            return None;
        }
        *slot = next;
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::super::super::CellState;
    use super::*;

    fn place(grid: Grid, player: Player, coords: impl IntoIterator<Item = (usize, usize)>) -> Grid {
        coords.into_iter().fold(grid, |g, (r, c)| {
            g.set(Coord::new(r, c), CellState::Occupied(player)).unwrap()
        })
    }

    fn coords(cells: [(usize, usize); 5]) -> [Coord; 5] {
        cells.map(|(r, c)| Coord::new(r, c))
    }

    #[test]
    fn test_no_winner_empty_grid() {
        for (rows, cols) in [(1, 1), (3, 7), (15, 15)] {
            assert_eq!(check_win(&Grid::new(rows, cols).unwrap()), None);
        }
    }

    #[test]
    fn test_winner_horizontal() {
        let grid = place(Grid::new(15, 15).unwrap(), Player::A, (3..8).map(|c| (7, c)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.winner, Player::A);
        assert_eq!(win.line, coords([(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]));
    }

    #[test]
    fn test_winner_vertical() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::B, (5..10).map(|r| (r, 9)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.winner, Player::B);
        assert_eq!(win.line, coords([(5, 9), (6, 9), (7, 9), (8, 9), (9, 9)]));
    }

    #[test]
    fn test_winner_diagonal_down_right() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::A, (0..5).map(|i| (i + 2, i + 1)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.line, coords([(2, 1), (3, 2), (4, 3), (5, 4), (6, 5)]));
    }

    #[test]
    fn test_winner_diagonal_down_left() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::B, (0..5).map(|i| (i, 8 - i)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.winner, Player::B);
        assert_eq!(win.line, coords([(0, 8), (1, 7), (2, 6), (3, 5), (4, 4)]));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::A, (0..4).map(|c| (0, c)));
        let grid = place(grid, Player::A, (0..4).map(|r| (r + 2, 9)));
        let grid = place(grid, Player::B, (0..4).map(|i| (i + 5, i)));
        assert_eq!(check_win(&grid), None);
    }

    #[test]
    fn test_broken_run_not_win() {
        let grid = place(
            Grid::new(10, 10).unwrap(),
            Player::A,
            [(4, 0), (4, 1), (4, 2), (4, 4), (4, 5)],
        );
        let grid = place(grid, Player::B, [(4, 3)]);
        assert_eq!(check_win(&grid), None);
    }

    #[test]
    fn test_overline_reports_first_five_cells() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::A, (2..8).map(|c| (5, c)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.line, coords([(5, 2), (5, 3), (5, 4), (5, 5), (5, 6)]));
    }

    #[test]
    fn test_tie_break_earliest_cell_then_direction() {
        // Both a column and a row start at (1, 1): the column is scanned first.
        let grid = place(Grid::new(10, 10).unwrap(), Player::A, (1..6).map(|c| (1, c)));
        let grid = place(grid, Player::A, (2..6).map(|r| (r, 1)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.line, coords([(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]));

        // A later-starting alignment for the other player loses to the earlier cell.
        let grid = place(Grid::new(10, 10).unwrap(), Player::B, (4..9).map(|c| (8, c)));
        let grid = place(grid, Player::A, (0..5).map(|r| (r, 0)));
        assert_eq!(check_win(&grid).unwrap().winner, Player::A);
    }

    #[test]
    fn test_alignment_touching_edges() {
        let grid = place(Grid::new(10, 10).unwrap(), Player::B, (5..10).map(|c| (9, c)));
        let win = check_win(&grid).unwrap();
        assert_eq!(win.line[4], Coord::new(9, 9));
    }
}
