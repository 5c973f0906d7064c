//! Legal move enumeration.

use crate::error::LookupError;
use crate::game::{validate, Action, CellIndex, GameState, PlayerId, TreeSize};

impl GameState {
    /// Every action the player could take right now.
    ///
    /// `WAIT` comes first, then COMPLETEs, GROWs and SEEDs, each ordered by
    /// tree cell and seeds further by target cell. Affordability is judged
    /// against the player's current balance. A waiting player only gets
    /// `WAIT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn legal_moves(&self, id: PlayerId) -> Result<Vec<Action>, LookupError> {
        let player = self.player(id)?;
        let mut moves = vec![Action::Wait];
        if player.waiting {
            return Ok(moves);
        }

        let budget = player.sun;
        let mut completes = Vec::new();
        let mut grows = Vec::new();
        let mut seeds = Vec::new();

        for (cell, tree) in self.forest.owned_by(id) {
            if tree.dormant {
                continue;
            }

            let growth = if tree.size == TreeSize::Tall {
                Action::Complete { target: cell }
            } else {
                Action::Grow { target: cell }
            };
            if validate(self, id, growth, budget).is_ok() {
                match growth {
                    Action::Complete { .. } => completes.push(growth),
                    _ => grows.push(growth),
                }
            }

            if tree.size > TreeSize::Seed {
                seeds.extend(
                    self.seed_targets(cell, tree.size)
                        .into_iter()
                        .map(|target| Action::Seed { source: cell, target })
                        .filter(|&seed| validate(self, id, seed, budget).is_ok()),
                );
            }
        }

        moves.extend(completes);
        moves.extend(grows);
        moves.extend(seeds);
        Ok(moves)
    }

    /// Cells within seeding reach of `source`, in index order.
    fn seed_targets(&self, source: CellIndex, size: TreeSize) -> Vec<CellIndex> {
        let Some(origin) = self.board.coord(source) else {
            return Vec::new();
        };
        let mut targets: Vec<CellIndex> = origin
            .within(size.level())
            .filter_map(|coord| self.board.index_of(coord))
            .collect();
        targets.sort_unstable();
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Forest, Richness, Tree};

    fn state_with(trees: &[(CellIndex, Tree)], sun: u32) -> GameState {
        let mut forest = Forest::new();
        for &(cell, tree) in trees {
            forest.insert(cell, tree);
        }
        let mut state = GameState::new(Board::uniform(Richness::Lush), forest);
        state.player_mut(0).unwrap().sun = sun;
        state
    }

    #[test]
    fn test_waiting_player_only_waits() {
        let mut state = state_with(&[(0, Tree::new(0, TreeSize::Tall))], 100);
        state.player_mut(0).unwrap().waiting = true;
        assert_eq!(state.legal_moves(0).unwrap(), vec![Action::Wait]);
    }

    #[test]
    fn test_unknown_player() {
        let state = state_with(&[], 0);
        assert_eq!(state.legal_moves(2), Err(LookupError::UnknownPlayer(2)));
    }

    #[test]
    fn test_broke_player_can_still_seed_for_free() {
        let state = state_with(&[(0, Tree::new(0, TreeSize::Small))], 0);
        let moves = state.legal_moves(0).unwrap();
        assert_eq!(moves[0], Action::Wait);
        // First seed costs nothing; six neighbours of the center
        let expected: Vec<_> = (1..=6)
            .map(|target| Action::Seed { source: 0, target })
            .collect();
        assert_eq!(&moves[1..], expected.as_slice());
    }

    #[test]
    fn test_ordering() {
        let state = state_with(
            &[
                (0, Tree::new(0, TreeSize::Tall)),
                (1, Tree::new(0, TreeSize::Small)),
                (2, Tree::seedling(0, 1)),
                (3, Tree::new(1, TreeSize::Tall)),
            ],
            100,
        );
        let moves = state.legal_moves(0).unwrap();
        assert_eq!(moves[0], Action::Wait);
        assert_eq!(moves[1], Action::Complete { target: 0 });
        assert_eq!(moves[2], Action::Grow { target: 1 });
        assert!(moves[3..].iter().all(|m| matches!(m, Action::Seed { .. })));
        // The dormant seedling on 2 neither grows nor seeds
        assert!(!moves.contains(&Action::Grow { target: 2 }));
        // Opponent tree is never offered
        assert!(!moves.contains(&Action::Complete { target: 3 }));

        let seeds: Vec<_> = moves[3..]
            .iter()
            .filter_map(|m| match m {
                Action::Seed { source, target } => Some((*source, *target)),
                _ => None,
            })
            .collect();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        assert_eq!(seeds, sorted);
        assert!(seeds.iter().all(|&(_, target)| !state.forest().is_occupied(target)));
    }

    #[test]
    fn test_every_move_is_valid() {
        let mut state = GameState::generate(11).unwrap();
        state.player_mut(0).unwrap().sun = 8;
        for action in state.legal_moves(0).unwrap() {
            assert!(validate(&state, 0, action, 8).is_ok(), "{action}");
        }
    }

    #[test]
    fn test_dormant_tree_offers_nothing() {
        let mut tree = Tree::new(0, TreeSize::Medium);
        tree.dormant = true;
        let state = state_with(&[(0, tree)], 100);
        assert_eq!(state.legal_moves(0).unwrap(), vec![Action::Wait]);
    }

    #[test]
    fn test_unaffordable_growth_skipped() {
        let state = state_with(&[(0, Tree::new(0, TreeSize::Medium))], 6);
        let moves = state.legal_moves(0).unwrap();
        assert!(!moves.contains(&Action::Grow { target: 0 }));
        assert!(moves.contains(&Action::Seed { source: 0, target: 7 }));
    }
}
