//! Fuzz target: JSON decoding of `Trace`.
//!
//! Any trace that decodes must have contiguous steps and survive a
//! re-encode/decode cycle unchanged.

#![no_main]

use jug_core::Trace;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(trace) = serde_json::from_slice::<Trace>(data) else {
        return;
    };
    for (i, op) in trace.operations().iter().enumerate() {
        assert_eq!(op.step, i + 1, "decoded trace must number steps from 1");
    }
    let json = serde_json::to_vec(&trace).expect("Trace serialization must not fail");
    let again: Trace = serde_json::from_slice(&json).expect("re-encoded trace must decode");
    assert_eq!(again, trace);
});
