//! Game state management.

use crate::error::{BoardError, LookupError, MapGenError};
use crate::game::{
    generate_map, Action, Board, Cell, CellIndex, Forest, Phase, Player, PlayerId, Shadows, Sun,
    Tree, CELL_COUNT, PLAYER_COUNT, STARTING_NUTRIENTS,
};

/// Number of rounds in a game.
pub const MAX_ROUNDS: u32 = 24;

/// Complete game state.
///
/// Every part is a fixed-size value, so `clone` yields a fully independent
/// copy that can be advanced without touching the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) forest: Forest,
    pub(crate) players: [Player; PLAYER_COUNT],
    pub(crate) sun: Sun,
    pub(crate) shadows: Shadows,
    pub(crate) nutrients: u32,
    pub(crate) round: u32,
    pub(crate) turn: u32,
    pub(crate) phase: Phase,
    pub(crate) next_phase: Phase,
}

impl GameState {
    /// Create a game at round 0 on `board` with the given trees.
    ///
    /// The first call to [`GameState::advance`] runs the gathering phase.
    #[must_use]
    pub fn new(board: Board, forest: Forest) -> Self {
        let sun = Sun::default();
        Self {
            board,
            forest,
            players: [Player::new(0), Player::new(1)],
            sun,
            shadows: Shadows::compute(&board, &forest, sun),
            nutrients: STARTING_NUTRIENTS,
            round: 0,
            turn: 0,
            phase: Phase::Init,
            next_phase: Phase::Gathering,
        }
    }

    /// Create an empty game from the host's ordered cell list.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell list does not describe the board.
    pub fn new_from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        Ok(Self::new(Board::from_cells(cells)?, Forest::new()))
    }

    /// Create an empty game from `(index, richness level)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed list or unknown richness levels.
    pub fn from_levels(levels: &[(CellIndex, u8)]) -> Result<Self, BoardError> {
        Ok(Self::new(Board::from_levels(levels)?, Forest::new()))
    }

    /// Generate a board and starting trees from a seed.
    ///
    /// # Errors
    ///
    /// Returns an error if no board with valid starting positions was found.
    pub fn generate(seed: u64) -> Result<Self, MapGenError> {
        let (board, forest) = generate_map(seed)?;
        Ok(Self::new(board, forest))
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// All trees.
    #[must_use]
    pub const fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The tree on a cell.
    #[must_use]
    pub fn tree(&self, cell: CellIndex) -> Option<&Tree> {
        self.forest.get(cell)
    }

    /// Both players, by id.
    #[must_use]
    pub const fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    /// Look up a player.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not 0 or 1.
    pub fn player(&self, id: PlayerId) -> Result<&Player, LookupError> {
        self.players
            .get(usize::from(id))
            .ok_or(LookupError::UnknownPlayer(id))
    }

    /// Mutable access to a player's score, sun and waiting flag.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not 0 or 1.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, LookupError> {
        self.players
            .get_mut(usize::from(id))
            .ok_or(LookupError::UnknownPlayer(id))
    }

    /// Current sun.
    #[must_use]
    pub const fn sun(&self) -> Sun {
        self.sun
    }

    /// Shadows cast under the current sun.
    #[must_use]
    pub const fn shadows(&self) -> &Shadows {
        &self.shadows
    }

    /// Shared nutrient pool.
    #[must_use]
    pub const fn nutrients(&self) -> u32 {
        self.nutrients
    }

    /// Current round, starting at 0.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Number of engine calls so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Phase run by the last call to [`GameState::advance`].
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Phase the next call to [`GameState::advance`] will run.
    #[must_use]
    pub const fn next_phase(&self) -> Phase {
        self.next_phase
    }

    /// A player's score, or 0 for an unknown player.
    #[must_use]
    pub fn score(&self, id: PlayerId) -> u32 {
        self.player(id).map_or(0, |p| p.score)
    }

    /// A player's sun energy, or 0 for an unknown player.
    #[must_use]
    pub fn energy(&self, id: PlayerId) -> u32 {
        self.player(id).map_or(0, |p| p.sun)
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.round >= MAX_ROUNDS
    }

    /// Player with the strictly higher score, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        let [first, second] = &self.players;
        match first.score.cmp(&second.score) {
            std::cmp::Ordering::Greater => Some(first.id),
            std::cmp::Ordering::Less => Some(second.id),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Stage an action for a player's next action pass.
    ///
    /// The action is consumed by the next call to [`GameState::advance`],
    /// whatever phase it runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or any referenced cell does not exist.
    /// Rule violations are not checked here; the resolver reports them.
    pub fn set_action(&mut self, id: PlayerId, action: Action) -> Result<(), LookupError> {
        if let Some(&cell) = action.cells().iter().find(|&&cell| cell >= CELL_COUNT) {
            return Err(LookupError::UnknownCell(cell));
        }
        self.player_mut(id)?.action = Some(action);
        Ok(())
    }

    /// Recompute shadows for the current sun and trees.
    pub(crate) fn recompute_shadows(&mut self) {
        self.shadows = Shadows::compute(&self.board, &self.forest, self.sun);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Richness, TreeSize};

    fn lush() -> Board {
        Board::uniform(Richness::Lush)
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(lush(), Forest::new());
        assert_eq!(state.round(), 0);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.nutrients(), STARTING_NUTRIENTS);
        assert_eq!(state.sun().orientation(), 0);
        assert_eq!(state.phase(), Phase::Init);
        assert_eq!(state.next_phase(), Phase::Gathering);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_new_computes_shadows() {
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Tall));
        let state = GameState::new(lush(), forest);
        assert_eq!(state.shadows().strength(1), 3);
    }

    #[test]
    fn test_from_levels() {
        let levels: Vec<_> = (0..CELL_COUNT).map(|i| (i, 2)).collect();
        let state = GameState::from_levels(&levels).unwrap();
        assert_eq!(state.board().richness(36), Some(Richness::Ok));
        assert!(state.forest().is_empty());
    }

    #[test]
    fn test_set_action_rejects_unknown_cell() {
        let mut state = GameState::new(lush(), Forest::new());
        assert_eq!(
            state.set_action(0, Action::Seed { source: 1, target: 37 }),
            Err(LookupError::UnknownCell(37))
        );
        assert_eq!(
            state.set_action(2, Action::Wait),
            Err(LookupError::UnknownPlayer(2))
        );
        assert!(state.players()[0].action.is_none());
    }

    #[test]
    fn test_set_action_stages() {
        let mut state = GameState::new(lush(), Forest::new());
        state.set_action(1, Action::Grow { target: 4 }).unwrap();
        assert_eq!(state.players()[1].action, Some(Action::Grow { target: 4 }));
    }

    #[test]
    fn test_leader() {
        let mut state = GameState::new(lush(), Forest::new());
        assert_eq!(state.leader(), None);
        state.player_mut(1).unwrap().score = 5;
        assert_eq!(state.leader(), Some(1));
        state.player_mut(0).unwrap().score = 9;
        assert_eq!(state.leader(), Some(0));
    }

    #[test]
    fn test_clone_isolation() {
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Small));
        let original = GameState::new(lush(), forest);

        let mut copy = original;
        copy.forest.get_mut(0).unwrap().grow();
        copy.player_mut(0).unwrap().sun = 10;

        assert_eq!(original.tree(0).unwrap().size, TreeSize::Small);
        assert_eq!(original.energy(0), 0);
        assert_eq!(copy.tree(0).unwrap().size, TreeSize::Medium);
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(GameState::generate(9).unwrap(), GameState::generate(9).unwrap());
    }
}
