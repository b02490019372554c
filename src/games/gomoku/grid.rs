//! Fixed-size gomoku grid with copy-on-write updates.

use super::types::{CellState, Coord, Player};
use std::sync::Arc;
use tracing::instrument;

/// Errors raised by grid construction and access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GridError {
    /// A side length was zero.
    #[display("Invalid grid dimensions {rows}x{cols}")]
    InvalidDimension {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The coordinate lies outside the grid.
    #[display("Coordinate {_0} is out of bounds")]
    OutOfBounds(Coord),
}

impl std::error::Error for GridError {}

/// Rectangular grid of cells in row-major order.
///
/// Cloning is cheap: cells are shared until a `set` produces a new grid.
/// Earlier values stay untouched, so snapshots never alias later play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Arc<Vec<CellState>>,
}

impl Grid {
    /// Creates an all-empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either side is zero or the
    /// cell count does not fit in `usize`.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = match rows.checked_mul(cols) {
            Some(len) if len > 0 => len,
            _ => return Err(GridError::InvalidDimension { rows, cols }),
        };
        Ok(Self {
            rows,
            cols,
            cells: Arc::new(vec![CellState::Empty; len]),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the coordinate lies on the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> Result<usize, GridError> {
        if self.contains(coord) {
            Ok(coord.row * self.cols + coord.col)
        } else {
            Err(GridError::OutOfBounds(coord))
        }
    }

    /// Gets the cell at the coordinate.
    pub fn get(&self, coord: Coord) -> Result<CellState, GridError> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Returns the occupying player at the coordinate, `None` if empty or off-grid.
    pub fn occupant(&self, coord: Coord) -> Option<Player> {
        self.get(coord).ok().and_then(CellState::player)
    }

    /// Returns a new grid with the cell replaced; `self` is left unchanged.
    pub fn set(&self, coord: Coord, state: CellState) -> Result<Self, GridError> {
        let idx = self.index(coord)?;
        let mut next = self.clone();
        Arc::make_mut(&mut next.cells)[idx] = state;
        Ok(next)
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != CellState::Empty)
    }

    /// Number of occupied cells.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != CellState::Empty).count()
    }

    /// Iterates rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Iterates every coordinate with its cell in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (Coord::new(idx / self.cols, idx % self.cols), *cell))
    }

    /// Formats the grid as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::from("   ");
        for col in 0..self.cols {
            result.push_str(&format!("{:>3}", col));
        }
        result.push('\n');
        for (row, cells) in self.iter_rows().enumerate() {
            result.push_str(&format!("{:>3}", row));
            for cell in cells {
                let symbol = match cell {
                    CellState::Empty => '.',
                    CellState::Occupied(Player::A) => 'X',
                    CellState::Occupied(Player::B) => 'O',
                };
                result.push_str(&format!("{:>3}", symbol));
            }
            result.push('\n');
        }
        result
    }
}
