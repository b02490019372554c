//! History consistency invariant: the history explains every stone.

use super::super::{CellState, Match};
use super::Invariant;

/// Invariant: each history entry's cell holds that mover's stone, and the
/// grid holds no other stones.
pub struct HistoryConsistentInvariant;

impl Invariant<Match> for HistoryConsistentInvariant {
    fn holds(game: &Match) -> bool {
        let grid = game.grid();
        let history = game.history();

        history.len() == grid.stone_count()
            && history
                .iter()
                .all(|mov| grid.get(mov.coord) == Ok(CellState::Occupied(mov.player)))
    }

    fn description() -> &'static str {
        "Grid stones match the move history"
    }
}
