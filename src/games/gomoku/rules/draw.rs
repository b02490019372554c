//! Draw detection logic for gomoku.

use super::super::Grid;
use super::win::check_win;
use tracing::instrument;

/// Checks if the grid is full (all cells occupied).
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn is_full(grid: &Grid) -> bool {
    grid.is_full()
}

/// A draw is a full grid on which no alignment exists.
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn is_draw(grid: &Grid) -> bool {
    grid.is_full() && check_win(grid).is_none()
}
