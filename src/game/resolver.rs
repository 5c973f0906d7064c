//! Action resolution.
//!
//! An [`ActionPass`] freezes each player's sun balance when it starts and
//! charges every action of the pass against that frozen pool. Effects that
//! must not be seen mid-pass (new seeds, harvests, the spent balance) are
//! buffered and land together in [`ActionPass::commit`].

use tracing::trace;

use crate::error::{ActionError, IllegalAction, LookupError};
use crate::game::{
    decay_nutrients, growth_cost, harvest_points, seed_cost, Action, CellIndex, CubeCoord,
    GameState, Player, PlayerId, Richness, Seed, Tree, TreeSize, PLAYER_COUNT,
};

/// Check an action against the rules and return its sun cost.
///
/// `available` is the sun the player may spend. Nothing is mutated.
///
/// # Errors
///
/// Returns [`ActionError::Lookup`] for nonexistent players or cells and
/// [`ActionError::Illegal`] when a rule is broken.
pub fn validate(
    state: &GameState,
    player: PlayerId,
    action: Action,
    available: u32,
) -> Result<u32, ActionError> {
    state.player(player)?;

    let cost = match action {
        Action::Wait => 0,
        Action::Grow { target } => {
            let tree = owned_tree(state, player, target)?;
            if tree.dormant {
                return Err(IllegalAction::Dormant(target).into());
            }
            if tree.size == TreeSize::Tall {
                return Err(IllegalAction::AlreadyTall(target).into());
            }
            growth_cost(&state.forest, player, tree.size)
        }
        Action::Complete { target } => {
            let tree = owned_tree(state, player, target)?;
            if tree.size != TreeSize::Tall {
                return Err(IllegalAction::NotTall {
                    cell: target,
                    size: tree.size,
                }
                .into());
            }
            if tree.dormant {
                return Err(IllegalAction::Dormant(target).into());
            }
            growth_cost(&state.forest, player, tree.size)
        }
        Action::Seed { source, target } => {
            let destination = cell_coord(state, target)?;
            let origin = cell_coord(state, source)?;
            if state.forest.is_occupied(target) {
                return Err(IllegalAction::Occupied(target).into());
            }
            let tree = tree_at(state, source)?;
            if tree.size == TreeSize::Seed {
                return Err(IllegalAction::TooSmall(source).into());
            }
            if tree.owner != player {
                return Err(IllegalAction::NotOwner {
                    cell: source,
                    owner: tree.owner,
                }
                .into());
            }
            if tree.dormant {
                return Err(IllegalAction::Dormant(source).into());
            }
            let distance = origin.distance_to(destination);
            if distance > tree.size.level() {
                return Err(IllegalAction::OutOfRange {
                    origin: source,
                    target,
                    distance,
                    reach: tree.size.level(),
                }
                .into());
            }
            if !state.board.is_usable(target) {
                return Err(IllegalAction::UnusableCell(target).into());
            }
            seed_cost(&state.forest, player)
        }
    };

    if cost > available {
        return Err(IllegalAction::InsufficientSun { cost, available }.into());
    }
    Ok(cost)
}

fn cell_coord(state: &GameState, cell: CellIndex) -> Result<CubeCoord, LookupError> {
    state.board.coord(cell).ok_or(LookupError::UnknownCell(cell))
}

fn tree_at(state: &GameState, cell: CellIndex) -> Result<&Tree, ActionError> {
    cell_coord(state, cell)?;
    state
        .forest
        .get(cell)
        .ok_or_else(|| IllegalAction::NoTree(cell).into())
}

fn owned_tree(state: &GameState, player: PlayerId, cell: CellIndex) -> Result<&Tree, ActionError> {
    let tree = tree_at(state, cell)?;
    if tree.owner != player {
        return Err(IllegalAction::NotOwner {
            cell,
            owner: tree.owner,
        }
        .into());
    }
    Ok(tree)
}

/// Effects of a committed action pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Seeds turned into trees.
    pub planted: usize,
    /// Two or more seeds shared a target, so none were planted.
    pub seed_conflict: bool,
    /// Trees harvested.
    pub harvested: u32,
    /// Points each player earned from harvests.
    pub points: [u32; PLAYER_COUNT],
}

/// One resolution pass over the players' staged actions.
#[derive(Debug, Clone)]
pub struct ActionPass {
    available: [u32; PLAYER_COUNT],
    seeds: Vec<Seed>,
    harvests: Vec<CellIndex>,
}

impl ActionPass {
    /// Start a pass, freezing each player's balance.
    #[must_use]
    pub fn new(players: &[Player; PLAYER_COUNT]) -> Self {
        Self {
            available: players.map(|p| p.sun),
            seeds: Vec::new(),
            harvests: Vec::new(),
        }
    }

    /// Sun a player has left to spend in this pass.
    #[must_use]
    pub fn available(&self, player: PlayerId) -> u32 {
        self.available.get(usize::from(player)).copied().unwrap_or(0)
    }

    /// Seeds thrown so far.
    #[must_use]
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Cells queued for harvest.
    #[must_use]
    pub fn harvests(&self) -> &[CellIndex] {
        &self.harvests
    }

    /// Whether two seeds of this pass target the same cell.
    #[must_use]
    pub fn seeds_conflict(&self) -> bool {
        let mut targets: Vec<CellIndex> = self.seeds.iter().map(|s| s.target).collect();
        targets.sort_unstable();
        targets.windows(2).any(|pair| pair[0] == pair[1])
    }

    /// Validate an action and apply its immediate effects.
    ///
    /// GROW takes effect at once; COMPLETE and SEED only mark their tree
    /// dormant and are buffered until [`ActionPass::commit`].
    ///
    /// # Errors
    ///
    /// Returns the reason the action was rejected. Nothing is mutated then.
    pub fn apply(
        &mut self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), ActionError> {
        let available = self.available(player);
        let cost = validate(state, player, action, available)?;
        if let Some(pool) = self.available.get_mut(usize::from(player)) {
            *pool = pool.saturating_sub(cost);
        }

        match action {
            Action::Wait => state.player_mut(player)?.waiting = true,
            Action::Grow { target } => {
                if let Some(tree) = state.forest.get_mut(target) {
                    tree.grow();
                    tree.dormant = true;
                }
            }
            Action::Complete { target } => {
                if let Some(tree) = state.forest.get_mut(target) {
                    tree.dormant = true;
                }
                self.harvests.push(target);
            }
            Action::Seed { source, target } => {
                if let Some(tree) = state.forest.get_mut(source) {
                    tree.dormant = true;
                }
                self.seeds.push(Seed {
                    owner: player,
                    source,
                    target,
                });
            }
        }
        Ok(())
    }

    /// Land the buffered effects of the pass.
    ///
    /// Unless seeds conflict, seeds are planted and every player's balance
    /// becomes what is left of their pool. On a conflict neither happens.
    /// Harvests are then scored against the nutrient value from before the
    /// pass, and the pool shrinks once per harvest.
    pub fn commit(self, state: &mut GameState) -> PassOutcome {
        let mut outcome = PassOutcome {
            seed_conflict: self.seeds_conflict(),
            ..PassOutcome::default()
        };

        if outcome.seed_conflict {
            trace!(round = state.round, seeds = self.seeds.len(), "seed conflict, discarding seeds");
        } else {
            for seed in &self.seeds {
                state
                    .forest
                    .insert(seed.target, Tree::seedling(seed.owner, seed.source));
            }
            outcome.planted = self.seeds.len();
            for (player, pool) in state.players.iter_mut().zip(self.available) {
                player.sun = pool;
            }
        }

        let nutrients = state.nutrients;
        for &cell in &self.harvests {
            let richness = state.board.richness(cell).unwrap_or(Richness::None);
            let Some(tree) = state.forest.remove(cell) else {
                continue;
            };
            let points = harvest_points(nutrients, richness);
            if let Some(player) = state.players.get_mut(usize::from(tree.owner)) {
                player.add_score(points);
            }
            if let Some(total) = outcome.points.get_mut(usize::from(tree.owner)) {
                *total = total.saturating_add(points);
            }
            outcome.harvested += 1;
        }
        state.nutrients = decay_nutrients(state.nutrients, outcome.harvested);

        outcome
    }
}
