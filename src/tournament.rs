//! Game driver for Sylva.
//!
//! Provides a pure function interface: `(seed, policies) -> GameResult`
//!
//! The driver handles:
//! - Deterministic board generation from the seed
//! - Asking each active player's policy for a move before every action pass
//! - Running the turn engine until the game ends or the round limit is hit

mod policy;

pub use policy::{GreedyPolicy, Policy, PolicyKind, RandomPolicy};

use thiserror::Error;
use tracing::debug;

use crate::error::{EngineError, LookupError, MapGenError};
use crate::game::{Action, GameState, Phase, PlayerId, MAX_ROUNDS, PLAYER_COUNT};

/// Multiplier used to derive per-player policy seeds from the game seed.
const POLICY_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a driven game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Stop after this many rounds, `1..=24`.
    pub max_rounds: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
        }
    }
}

impl TournamentConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_rounds` is outside `1..=24`.
    pub const fn validate(self) -> Result<(), TournamentError> {
        if self.max_rounds == 0 || self.max_rounds > MAX_ROUNDS {
            return Err(TournamentError::InvalidRounds(self.max_rounds));
        }
        Ok(())
    }
}

/// Statistics for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Policy that played this side.
    pub policy: PolicyKind,
    /// Final score.
    pub final_score: u32,
    /// Sun left at the end.
    pub final_sun: u32,
    /// Trees still standing at the end.
    pub trees: u32,
    /// GROW actions chosen.
    pub grows: u32,
    /// SEED actions chosen.
    pub seeds: u32,
    /// COMPLETE actions chosen.
    pub completes: u32,
}

impl PlayerStats {
    fn new(player_id: PlayerId, policy: PolicyKind) -> Self {
        Self {
            player_id,
            policy,
            final_score: 0,
            final_sun: 0,
            trees: 0,
            grows: 0,
            seeds: 0,
            completes: 0,
        }
    }

    fn record(&mut self, action: Action) {
        match action {
            Action::Wait => {}
            Action::Grow { .. } => self.grows += 1,
            Action::Seed { .. } => self.seeds += 1,
            Action::Complete { .. } => self.completes += 1,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// The player with the higher score (None on a draw).
    pub winner: Option<PlayerId>,
    /// Final scores, by player id.
    pub scores: [u32; PLAYER_COUNT],
    /// Rounds completed.
    pub rounds_played: u32,
    /// Engine phases executed.
    pub turns_played: u32,
    /// Per-player statistics.
    pub player_stats: [PlayerStats; PLAYER_COUNT],
    /// The seed used for this game.
    pub seed: u64,
}

/// Error type for driven games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Round limit outside `1..=24`.
    #[error("invalid round limit {0} (expected 1..={MAX_ROUNDS})")]
    InvalidRounds(u32),
    /// Board generation failed.
    #[error("map generation failed: {0}")]
    MapGeneration(#[from] MapGenError),
    /// A policy referenced a nonexistent cell or player.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The engine refused to advance.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Seed for the policy playing `player` in the game started from `seed`.
#[must_use]
pub fn policy_seed(seed: u64, player: PlayerId) -> u64 {
    seed ^ (u64::from(player) + 1).wrapping_mul(POLICY_SEED_MIX)
}

/// Run a complete game with the given seed and policies.
///
/// This is the main entry point - a pure function from inputs to result.
/// Given the same seed, policies and config, it always produces the same
/// `GameResult`.
///
/// # Errors
///
/// Returns an error if the config is invalid or the board cannot be
/// generated.
pub fn run_game(
    seed: u64,
    policies: [PolicyKind; PLAYER_COUNT],
    config: TournamentConfig,
) -> Result<GameResult, TournamentError> {
    play_game(seed, policies, config).map(|(result, _)| result)
}

/// Like [`run_game`], but also hand back the final state.
///
/// # Errors
///
/// Returns an error if the config is invalid or the board cannot be
/// generated.
pub fn play_game(
    seed: u64,
    policies: [PolicyKind; PLAYER_COUNT],
    config: TournamentConfig,
) -> Result<(GameResult, GameState), TournamentError> {
    config.validate()?;
    let state = GameState::generate(seed)?;
    GameRunner::new(seed, state, policies, config).run()
}

/// Drive an existing state with the given policies until the game ends or
/// the round limit is reached.
///
/// # Errors
///
/// Returns an error if the config is invalid.
pub fn play_from(
    state: GameState,
    seed: u64,
    policies: [PolicyKind; PLAYER_COUNT],
    config: TournamentConfig,
) -> Result<(GameResult, GameState), TournamentError> {
    config.validate()?;
    GameRunner::new(seed, state, policies, config).run()
}

/// Orchestrates one game.
struct GameRunner {
    state: GameState,
    policies: [Box<dyn Policy>; PLAYER_COUNT],
    stats: [PlayerStats; PLAYER_COUNT],
    config: TournamentConfig,
    seed: u64,
}

impl GameRunner {
    fn new(
        seed: u64,
        state: GameState,
        kinds: [PolicyKind; PLAYER_COUNT],
        config: TournamentConfig,
    ) -> Self {
        let [first, second] = kinds;
        Self {
            state,
            policies: [first.build(policy_seed(seed, 0)), second.build(policy_seed(seed, 1))],
            stats: [PlayerStats::new(0, first), PlayerStats::new(1, second)],
            config,
            seed,
        }
    }

    fn run(mut self) -> Result<(GameResult, GameState), TournamentError> {
        while !self.state.is_game_over() && self.state.round() < self.config.max_rounds {
            if self.state.next_phase() == Phase::Actions {
                self.stage_actions()?;
            }
            self.state.advance()?;
        }

        let result = self.build_result();
        debug!(
            seed = self.seed,
            rounds = result.rounds_played,
            scores = ?result.scores,
            "game finished"
        );
        Ok((result, self.state))
    }

    /// Ask every active player's policy for its next action.
    fn stage_actions(&mut self) -> Result<(), TournamentError> {
        for (policy, stats) in self.policies.iter_mut().zip(&mut self.stats) {
            let id = stats.player_id;
            if self.state.player(id)?.waiting {
                continue;
            }
            let moves = self.state.legal_moves(id)?;
            let action = policy.choose(&self.state, id, &moves);
            self.state.set_action(id, action)?;
            stats.record(action);
        }
        Ok(())
    }

    fn build_result(&mut self) -> GameResult {
        for stats in &mut self.stats {
            let id = stats.player_id;
            stats.final_score = self.state.score(id);
            stats.final_sun = self.state.energy(id);
            stats.trees = u32::try_from(self.state.forest().owned_by(id).count()).unwrap_or(u32::MAX);
        }

        GameResult {
            winner: self.state.leader(),
            scores: self.stats.map(|s| s.final_score),
            rounds_played: self.state.round(),
            turns_played: self.state.turn(),
            player_stats: self.stats,
            seed: self.seed,
        }
    }
}
