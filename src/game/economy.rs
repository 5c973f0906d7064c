//! Sun costs, harvest scoring and the nutrient pool.
//!
//! # Costs
//!
//! Growing into size `s` costs `TREE_BASE_COST[s]` plus one per tree of size
//! `s` the player already owns. Completing a tall tree always costs
//! [`LIFECYCLE_END_COST`]. Seeding costs one per seed the player already owns.
//!
//! # Harvest
//!
//! A completed tree scores the current nutrient value plus its cell's
//! richness bonus. The pool then shrinks by one per harvested tree, so
//! harvests resolved together all score against the same value.

use crate::game::{Forest, PlayerId, Richness, TreeSize};

/// Base cost to grow into each size, indexed by the destination size.
pub const TREE_BASE_COST: [u32; 4] = [0, 1, 3, 7];

/// Cost of a COMPLETE action.
pub const LIFECYCLE_END_COST: u32 = 4;

/// Nutrient pool at the start of a game.
pub const STARTING_NUTRIENTS: u32 = 20;

/// Harvest bonus for a cell of richness OK.
pub const RICHNESS_BONUS_OK: u32 = 2;

/// Harvest bonus for a cell of richness LUSH.
pub const RICHNESS_BONUS_LUSH: u32 = 4;

/// Sun cost for a player to grow, or complete, a tree of `size`.
///
/// Counts the trees the player owns right now, before the action lands.
#[must_use]
pub fn growth_cost(forest: &Forest, owner: PlayerId, size: TreeSize) -> u32 {
    match size.next() {
        Some(next) => {
            TREE_BASE_COST[usize::from(next.level())].saturating_add(forest.count(owner, next))
        }
        None => LIFECYCLE_END_COST,
    }
}

/// Sun cost for a player to throw a seed.
#[must_use]
pub fn seed_cost(forest: &Forest, owner: PlayerId) -> u32 {
    TREE_BASE_COST[0].saturating_add(forest.count(owner, TreeSize::Seed))
}

/// Extra points for harvesting on a cell of this richness.
#[must_use]
pub const fn richness_bonus(richness: Richness) -> u32 {
    match richness {
        Richness::Lush => RICHNESS_BONUS_LUSH,
        Richness::Ok => RICHNESS_BONUS_OK,
        Richness::Poor | Richness::None => 0,
    }
}

/// Points awarded for one harvest.
#[must_use]
pub const fn harvest_points(nutrients: u32, richness: Richness) -> u32 {
    nutrients.saturating_add(richness_bonus(richness))
}

/// Nutrient pool after `harvests` trees were completed in one pass.
#[must_use]
pub const fn decay_nutrients(nutrients: u32, harvests: u32) -> u32 {
    nutrients.saturating_sub(harvests)
}
