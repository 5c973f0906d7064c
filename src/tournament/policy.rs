//! Move pickers used by the game driver.
//!
//! Policies only choose among the legal moves they are handed; they never
//! look ahead.

use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::game::{
    growth_cost, richness_bonus, seed_cost, Action, CellIndex, GameState, PlayerId, Richness,
    TreeSize,
};

/// Something that picks one of the legal moves for a player.
pub trait Policy: Send {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Pick one of `moves`. `moves` is never empty and starts with WAIT.
    fn choose(&mut self, state: &GameState, player: PlayerId, moves: &[Action]) -> Action;
}

/// Built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Uniformly random legal move.
    Random,
    /// One-ply heuristic.
    Greedy,
}

impl PolicyKind {
    /// Create a policy, seeding any randomness from `seed`.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Greedy => Box::new(GreedyPolicy),
        }
    }

    /// Short name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks a legal move uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Create a random policy with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        PolicyKind::Random.name()
    }

    fn choose(&mut self, _state: &GameState, _player: PlayerId, moves: &[Action]) -> Action {
        if moves.is_empty() {
            return Action::Wait;
        }
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Scores each move once and takes the best; ties go to the earlier move.
///
/// Early rounds favour seeding and growing, late rounds favour completing.
/// Every move is also credited with 0.3 per point of sun the player's trees
/// would still produce afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

/// Weight of projected sun income in a move's value.
const SUN_WEIGHT: f64 = 0.3;

/// Round from which completing trees is favoured.
const HARVEST_ROUND: u32 = 21;

impl GreedyPolicy {
    /// Heuristic value of `action` for `player`.
    #[must_use]
    pub fn evaluate(state: &GameState, player: PlayerId, action: Action) -> f64 {
        let round = f64::from(state.round());
        let late = state.round() >= HARVEST_ROUND;
        let forest = state.forest();
        let income: u32 = forest
            .owned_by(player)
            .map(|(_, tree)| u32::from(tree.size.level()))
            .sum();
        let income = f64::from(income);
        let bonus = |cell: CellIndex| {
            f64::from(richness_bonus(
                state.board().richness(cell).unwrap_or(Richness::None),
            ))
        };

        let (value, sun) = match action {
            Action::Wait => {
                let weight = if late { 0.5 } else { 1.0 };
                (income / 3.0 * weight, income)
            }
            Action::Seed { target, .. } => {
                let weight = if state.round() < 1 { 5.0 } else { 7.0 / round };
                let cost = f64::from(seed_cost(forest, player));
                (bonus(target) * weight, income - cost)
            }
            Action::Grow { target } => {
                let weight = if (1..HARVEST_ROUND).contains(&state.round()) {
                    5.0
                } else {
                    1.0
                };
                let Some(tree) = state.tree(target) else {
                    return f64::MIN;
                };
                let cost = f64::from(growth_cost(forest, player, tree.size));
                let next = tree.size.next().unwrap_or(TreeSize::Tall);
                (f64::from(next.level()) * weight, income - cost + 1.0)
            }
            Action::Complete { target } => {
                let weight = if late { 5.0 } else { round / 33.0 };
                let points = f64::from(state.nutrients()) + bonus(target);
                (points * weight, income - 3.0)
            }
        };

        value + sun * SUN_WEIGHT
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        PolicyKind::Greedy.name()
    }

    fn choose(&mut self, state: &GameState, player: PlayerId, moves: &[Action]) -> Action {
        let mut best = Action::Wait;
        let mut best_value = f64::MIN;
        for &action in moves {
            let value = Self::evaluate(state, player, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Forest, Tree};

    fn state_with(trees: &[(usize, Tree)]) -> GameState {
        let mut forest = Forest::new();
        for &(cell, tree) in trees {
            forest.insert(cell, tree);
        }
        GameState::new(Board::uniform(Richness::Lush), forest)
    }

    #[test]
    fn test_random_policy_is_deterministic() {
        let state = state_with(&[(0, Tree::new(0, TreeSize::Small))]);
        let moves = state.legal_moves(0).unwrap();
        let mut a = RandomPolicy::new(3);
        let mut b = RandomPolicy::new(3);
        for _ in 0..20 {
            let pick = a.choose(&state, 0, &moves);
            assert_eq!(pick, b.choose(&state, 0, &moves));
            assert!(moves.contains(&pick));
        }
    }

    #[test]
    fn test_random_policy_empty_moves() {
        let state = state_with(&[]);
        assert_eq!(RandomPolicy::new(0).choose(&state, 0, &[]), Action::Wait);
    }

    #[test]
    fn test_greedy_prefers_harvest_late() {
        let mut state = state_with(&[(0, Tree::new(0, TreeSize::Tall))]);
        state.round = 22;
        state.sun = crate::game::Sun::new(4);
        state.player_mut(0).unwrap().sun = 10;
        let moves = state.legal_moves(0).unwrap();
        assert_eq!(
            GreedyPolicy.choose(&state, 0, &moves),
            Action::Complete { target: 0 }
        );
    }

    #[test]
    fn test_greedy_grows_midgame() {
        let mut state = state_with(&[(0, Tree::new(0, TreeSize::Small))]);
        state.round = 5;
        state.sun = crate::game::Sun::new(5);
        state.player_mut(0).unwrap().sun = 3;
        let moves = state.legal_moves(0).unwrap();
        assert_eq!(GreedyPolicy.choose(&state, 0, &moves), Action::Grow { target: 0 });
    }

    #[test]
    fn test_greedy_picks_a_legal_move() {
        let state = GameState::generate(4).unwrap();
        let moves = state.legal_moves(1).unwrap();
        assert!(moves.contains(&GreedyPolicy.choose(&state, 1, &moves)));
    }

    #[test]
    fn test_policy_kind() {
        assert_eq!(PolicyKind::Greedy.to_string(), "greedy");
        assert_eq!(PolicyKind::Random.build(1).name(), "random");
    }
}
