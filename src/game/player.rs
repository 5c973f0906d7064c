//! Player state management.

use crate::game::Action;

/// Unique identifier for a player: 0 or 1.
pub type PlayerId = u8;

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// State for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Points from harvested trees.
    pub score: u32,
    /// Sun energy balance.
    pub sun: u32,
    /// Asleep until the next gathering phase.
    pub waiting: bool,
    /// Action staged for the next action pass.
    pub action: Option<Action>,
}

impl Player {
    /// Create a player with no score, no sun and no staged action.
    #[must_use]
    pub const fn new(id: PlayerId) -> Self {
        Self {
            id,
            score: 0,
            sun: 0,
            waiting: false,
            action: None,
        }
    }

    /// Take the staged action, leaving none behind.
    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }

    /// Add sun energy.
    pub fn gain_sun(&mut self, amount: u32) {
        self.sun = self.sun.saturating_add(amount);
    }

    /// Add harvest points.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
