//! Property-based tests for game mechanics.
//!
//! These tests verify board generation, shadows, sun gathering, costs and
//! state isolation over arbitrary inputs.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use sylva::game::{
    generate_map, growth_cost, Board, Forest, GameState, Phase, PlayerSnapshot, Richness,
    Shadows, Snapshot, Sun, Tree, TreeSize, TreeSnapshot, CELL_COUNT, LIFECYCLE_END_COST,
    TREE_BASE_COST,
};
use sylva::tournament::{Policy, RandomPolicy};

/// Up to 20 trees on distinct cells with arbitrary sizes and owners.
fn trees() -> impl Strategy<Value = Vec<TreeSnapshot>> {
    prop::collection::btree_map(0..CELL_COUNT, (0u8..4, 0u8..2), 0..20).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(cell, (size, owner))| TreeSnapshot {
                cell,
                size,
                owner,
                dormant: false,
                father: None,
            })
            .collect()
    })
}

fn forest_of(records: &[TreeSnapshot]) -> Forest {
    let mut forest = Forest::new();
    for record in records {
        let size = TreeSize::from_level(record.size).unwrap();
        forest.insert(record.cell, Tree::new(record.owner, size));
    }
    forest
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Generated boards cover every coordinate once and are point symmetric.
    #[test]
    fn prop_generated_board_symmetric(seed in any::<u64>()) {
        let (board, forest) = generate_map(seed).unwrap();
        prop_assert_eq!(board.len(), CELL_COUNT);

        for index in 0..CELL_COUNT {
            let coord = board.coord(index).unwrap();
            prop_assert_eq!(board.index_of(coord), Some(index));
            let opposite = board.index_of(coord.opposite()).unwrap();
            prop_assert_eq!(board.richness(index), board.richness(opposite));
        }

        // Two small trees each, mirrored through the center
        prop_assert_eq!(forest.len(), 4);
        for (cell, tree) in forest.iter() {
            prop_assert_eq!(tree.size, TreeSize::Small);
            prop_assert!(board.is_usable(cell));
            let mirror = board.index_of(board.coord(cell).unwrap().opposite()).unwrap();
            prop_assert_eq!(forest.get(mirror).map(|t| t.owner), Some(1 - tree.owner));
        }
    }

    /// Shadow strength is the largest caster reaching a cell, never a sum.
    #[test]
    fn prop_shadow_is_max_of_casters(records in trees(), orientation in 0u8..6) {
        let board = Board::uniform(Richness::Lush);
        let forest = forest_of(&records);
        let shadows = Shadows::compute(&board, &forest, Sun::new(orientation));

        for cell in 0..CELL_COUNT {
            let target = board.coord(cell).unwrap();
            let expected = forest
                .iter()
                .filter_map(|(origin, tree)| {
                    let size = tree.size.level();
                    let origin = board.coord(origin).unwrap();
                    (1..=size)
                        .any(|d| {
                            origin.neighbor_at(usize::from(orientation), i8::try_from(d).unwrap())
                                == target
                        })
                        .then_some(size)
                })
                .max()
                .unwrap_or(0);
            prop_assert_eq!(shadows.strength(cell), expected);
        }
    }

    /// Gathering pays each owner the sizes of its trees taller than their shadow.
    #[test]
    fn prop_gathering_pays_unshadowed_sizes(records in trees(), round in 0u32..23) {
        let mut state = GameState::new(Board::uniform(Richness::Ok), Forest::new());
        state
            .ingest(&Snapshot {
                round,
                nutrients: 20,
                players: [PlayerSnapshot::default(); 2],
                trees: records.clone(),
            })
            .unwrap();

        // Everyone waits, the sun moves, and the next round's shadows apply
        state.advance_to(Phase::Gathering).unwrap();
        let shadows = *state.shadows();

        let mut expected = [0u32; 2];
        for record in &records {
            let strength = shadows.strength(record.cell);
            if strength == 0 || record.size > strength {
                expected[usize::from(record.owner)] += u32::from(record.size);
            }
        }

        prop_assert_eq!(state.advance(), Ok(Phase::Gathering));
        prop_assert_eq!(state.energy(0), expected[0]);
        prop_assert_eq!(state.energy(1), expected[1]);
    }

    /// Growing costs the base price plus the owner's trees already at the
    /// destination size; completing always costs 4.
    #[test]
    fn prop_growth_cost(records in trees(), owner in 0u8..2) {
        let forest = forest_of(&records);
        for size in TreeSize::ALL {
            let cost = growth_cost(&forest, owner, size);
            match size.next() {
                Some(next) => {
                    let owned = records
                        .iter()
                        .filter(|r| r.owner == owner && r.size == next.level())
                        .count();
                    let owned = u32::try_from(owned).unwrap();
                    prop_assert_eq!(cost, TREE_BASE_COST[usize::from(next.level())] + owned);
                }
                None => {
                    prop_assert_eq!(cost, LIFECYCLE_END_COST);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Nutrients never increase and a clone never sees its copy's moves.
    #[test]
    fn prop_random_play_isolated_and_decaying(seed in any::<u64>(), steps in 1usize..400) {
        let mut state = GameState::generate(seed).unwrap();
        let mut policies = [RandomPolicy::new(seed), RandomPolicy::new(!seed)];

        for _ in 0..steps {
            if state.next_phase() == Phase::Actions {
                for (id, policy) in (0u8..).zip(policies.iter_mut()) {
                    let moves = state.legal_moves(id).unwrap();
                    let action = policy.choose(&state, id, &moves);
                    state.set_action(id, action).unwrap();
                }
            }

            let frozen = state;
            let nutrients = state.nutrients();
            if state.advance().is_err() {
                break;
            }
            prop_assert!(state.nutrients() <= nutrients);
            prop_assert_eq!(frozen.nutrients(), nutrients);
            prop_assert!(frozen.turn() < state.turn());
        }

        // Play the clone out; the original stays where it was
        let before = state;
        let mut copy = state;
        while copy.advance().is_ok() {}
        prop_assert!(copy.is_game_over());
        prop_assert_eq!(state, before);
    }
}
