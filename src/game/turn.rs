//! The turn engine: one phase per call.
//!
//! A round runs GATHERING, then one or more ACTIONS passes until every
//! player is waiting, then SUN_MOVE.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::error::{ActionError, EngineError};
use crate::game::{Action, ActionPass, GameState, PlayerId, MAX_ROUNDS};

/// Phase of the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Before the first call. Never scheduled; treated as GATHERING if met.
    Init,
    /// Wake everyone and hand out sun.
    Gathering,
    /// Resolve staged actions.
    Actions,
    /// End the round and rotate the sun.
    SunMove,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::Gathering => "GATHERING",
            Self::Actions => "ACTIONS",
            Self::SunMove => "SUN_MOVE",
        };
        f.write_str(name)
    }
}

impl GameState {
    /// Run the scheduled phase and return it.
    ///
    /// Staged actions are cleared afterwards, whichever phase ran.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GameOver`] once the last round is played; the
    /// state is left untouched.
    pub fn advance(&mut self) -> Result<Phase, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }

        self.turn += 1;
        let phase = self.next_phase;
        self.next_phase = match phase {
            Phase::Init | Phase::Gathering => {
                self.gather();
                Phase::Actions
            }
            Phase::Actions => {
                if self.resolve_actions() {
                    Phase::SunMove
                } else {
                    Phase::Actions
                }
            }
            Phase::SunMove => {
                self.move_sun();
                Phase::Gathering
            }
        };
        self.phase = phase;

        for player in &mut self.players {
            player.action = None;
        }
        trace!(turn = self.turn, round = self.round, %phase, next = %self.next_phase, "advanced");
        Ok(phase)
    }

    /// Advance until the scheduled phase is `phase` or the game ends.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GameOver`] if the game ends first.
    pub fn advance_to(&mut self, phase: Phase) -> Result<(), EngineError> {
        while self.next_phase != phase {
            self.advance()?;
        }
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    fn gather(&mut self) {
        for player in &mut self.players {
            player.waiting = false;
        }
        for tree in self.forest.trees_mut() {
            tree.dormant = false;
        }

        for (cell, tree) in self.forest.iter() {
            let size = tree.size.level();
            if self.shadows.blocks(cell, size) {
                continue;
            }
            if let Some(owner) = self.players.get_mut(usize::from(tree.owner)) {
                owner.gain_sun(u32::from(size));
            }
        }
    }

    /// Run one action pass. Returns whether every player is now waiting.
    fn resolve_actions(&mut self) -> bool {
        let mut pass = ActionPass::new(&self.players);

        for index in 0..self.players.len() {
            let player = &mut self.players[index];
            if player.waiting {
                continue;
            }
            let id = player.id;
            let action = player.take_action().unwrap_or(Action::Wait);

            if let Err(err) = pass.apply(self, id, action) {
                self.reject(id, action, err);
            }
        }

        let outcome = pass.commit(self);
        if outcome.harvested > 0 || outcome.planted > 0 {
            trace!(round = self.round, ?outcome, "pass committed");
        }

        self.players.iter().all(|p| p.waiting)
    }

    fn reject(&mut self, id: PlayerId, action: Action, err: ActionError) {
        match err {
            ActionError::Illegal(reason) => {
                debug!(round = self.round, player = id, %action, %reason, "action rejected");
            }
            ActionError::Lookup(lookup) => {
                error!(round = self.round, player = id, %action, %lookup, "action references missing entity");
            }
        }
        if let Some(player) = self.players.get_mut(usize::from(id)) {
            player.waiting = true;
        }
    }

    fn move_sun(&mut self) {
        self.round += 1;
        if self.round < MAX_ROUNDS {
            self.sun.advance();
            self.recompute_shadows();
        }
    }
}
