#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target drives a generated game with arbitrary staged actions:
//! 1. Stage fuzzer-chosen actions (legal or not) before each action pass
//! 2. Advance the engine one phase at a time
//! 3. Check invariants after every phase
//!
//! Illegal actions must only ever force a wait, never corrupt the state.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sylva::game::{check_invariants, GameState, Phase, CELL_COUNT};
use sylva::Action;

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Wait,
    Grow { target: u8 },
    Complete { target: u8 },
    Seed { source: u8, target: u8 },
    /// Pick the n-th legal move instead.
    Legal { pick: u8 },
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Board seed.
    seed: u64,
    /// Actions for player 0, consumed one per action pass.
    p0_actions: Vec<FuzzAction>,
    /// Actions for player 1, consumed one per action pass.
    p1_actions: Vec<FuzzAction>,
}

fn cell(raw: u8) -> usize {
    usize::from(raw) % CELL_COUNT
}

fn resolve(state: &GameState, player: u8, action: FuzzAction) -> Action {
    match action {
        FuzzAction::Wait => Action::Wait,
        FuzzAction::Grow { target } => Action::Grow { target: cell(target) },
        FuzzAction::Complete { target } => Action::Complete { target: cell(target) },
        FuzzAction::Seed { source, target } => Action::Seed {
            source: cell(source),
            target: cell(target),
        },
        FuzzAction::Legal { pick } => {
            let moves = state.legal_moves(player).unwrap_or_default();
            moves
                .get(usize::from(pick) % moves.len().max(1))
                .copied()
                .unwrap_or(Action::Wait)
        }
    }
}

fuzz_target!(|input: GameInput| {
    let Ok(mut state) = GameState::generate(input.seed) else {
        return;
    };
    let mut p0 = input.p0_actions.into_iter().take(200);
    let mut p1 = input.p1_actions.into_iter().take(200);

    loop {
        if state.next_phase() == Phase::Actions {
            if let Some(action) = p0.next() {
                let action = resolve(&state, 0, action);
                state.set_action(0, action).expect("cells are in range");
            }
            if let Some(action) = p1.next() {
                let action = resolve(&state, 1, action);
                state.set_action(1, action).expect("cells are in range");
            }
        }

        let before = state;
        if state.advance().is_err() {
            assert_eq!(state, before, "finished game was mutated");
            break;
        }

        let violations = check_invariants(&state);
        assert!(
            violations.is_empty(),
            "Invariants violated at round {}: {:?}",
            state.round(),
            violations
        );
        assert!(state.nutrients() <= before.nutrients());
    }

    assert!(state.is_game_over());
});
