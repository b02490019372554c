//! Sequence index invariant: history indices count up from zero.

use super::super::Match;
use super::Invariant;

/// Invariant: the n-th history entry carries index n.
pub struct SequenceIndexInvariant;

impl Invariant<Match> for SequenceIndexInvariant {
    fn holds(game: &Match) -> bool {
        game.history()
            .iter()
            .enumerate()
            .all(|(position, mov)| mov.index == position)
    }

    fn description() -> &'static str {
        "Move indices are contiguous from zero"
    }
}
