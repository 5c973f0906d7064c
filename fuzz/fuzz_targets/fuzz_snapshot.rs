#![no_main]

//! Snapshot ingestion fuzzer.
//!
//! Arbitrary JSON documents are parsed as positions. Anything that parses and
//! ingests must yield a state that passes every invariant and exports the same
//! snapshot it was built from.

use libfuzzer_sys::fuzz_target;
use sylva::game::{check_invariants, Position};

fuzz_target!(|data: &[u8]| {
    let Ok(position) = serde_json::from_slice::<Position>(data) else {
        return;
    };
    let Ok(state) = position.to_state() else {
        return;
    };

    let violations = check_invariants(&state);
    assert!(violations.is_empty(), "{violations:?}");

    let mut exported = state.snapshot();
    let mut original = position.snapshot.clone();
    exported.trees.sort_by_key(|t| t.cell);
    original.trees.sort_by_key(|t| t.cell);
    assert_eq!(exported, original);
});
