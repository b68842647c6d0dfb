//! Core solver for the two-jug measuring riddle.
//!
//! Given two jug capacities and a target amount, [`solve`] returns the
//! sequence of fill, empty and pour operations that leaves the target in one
//! of the jugs, or a [`SolveError`] when no such sequence exists.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod jug;
pub mod operation;
pub mod solver;
pub mod trace;

pub use error::{RecordError, SolveError};
pub use jug::{JugLabel, JugSpec, Levels};
pub use operation::{Action, Operation, OperationKind};
pub use solver::{gcd, solve};
pub use trace::Trace;

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;

    fn nz(n: u64) -> NonZeroU64 {
        match NonZeroU64::new(n) {
            Some(v) => v,
            None => panic!("test capacity must be non-zero"),
        }
    }

    #[test]
    fn solved_trace_round_trips_through_json() {
        let trace = match solve(nz(3), nz(5), nz(4)) {
            Ok(t) => t,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let json = match serde_json::to_string(&trace) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        let decoded: Trace = match serde_json::from_str(&json) {
            Ok(t) => t,
            Err(e) => panic!("decode failed: {e}"),
        };
        assert_eq!(decoded, trace);
    }

    #[test]
    fn solved_trace_json_matches_wire_shape() {
        let trace = match solve(nz(3), nz(5), nz(4)) {
            Ok(t) => t,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let v = match serde_json::to_value(&trace) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(v["jug"], "y");
        assert_eq!(v["total_steps"], 6);
        assert_eq!(
            v["operations"][2],
            serde_json::json!({
                "operation": "empty",
                "jug": "x",
                "amount": 3,
                "step": 3,
                "description": "emptying jug x with 3 capacity",
            })
        );
    }

    #[test]
    fn solve_error_display_includes_inputs() {
        let err = SolveError::NoIntegerSolution { target: 3, small: 2, big: 4 };
        let msg = err.to_string();
        assert!(msg.contains('3') && msg.contains('2') && msg.contains('4'), "got {msg}");
    }
}
