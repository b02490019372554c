//! Alternating turn invariant: the players take turns.

use super::super::Match;
use super::Invariant;

/// Invariant: consecutive moves come from different players, and the turn
/// owner follows from the last move.
///
/// While the match is in progress the opponent of the last mover is to
/// move. A finishing move does not hand over the turn.
pub struct AlternatingTurnInvariant;

impl Invariant<Match> for AlternatingTurnInvariant {
    fn holds(game: &Match) -> bool {
        let history = game.history();

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        match history.last() {
            None => true,
            Some(last) if game.is_terminal() => game.current_player() == last.player,
            Some(last) => game.current_player() == last.player.opponent(),
        }
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::{Coord, Player, PlayerNames};

    #[test]
    fn test_empty_match_holds_for_either_starter() {
        for first in [Player::A, Player::B] {
            let game = Match::new(10, 10, PlayerNames::new("Ann", "Bo"), first).unwrap();
            assert!(AlternatingTurnInvariant::holds(&game));
        }
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut game = Match::new(10, 10, PlayerNames::new("Ann", "Bo"), Player::B).unwrap();
        game.apply_move(Coord::new(0, 0), Player::B).unwrap();
        game.apply_move(Coord::new(1, 0), Player::A).unwrap();
        game.apply_move(Coord::new(2, 0), Player::B).unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.current_player(), Player::A);
    }

    #[test]
    fn test_stale_turn_owner_violates() {
        let mut game = Match::new(10, 10, PlayerNames::new("Ann", "Bo"), Player::A).unwrap();
        game.apply_move(Coord::new(0, 0), Player::A).unwrap();
        game.to_move = Player::A;
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
