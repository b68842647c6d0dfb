//! Two-jug measuring solver.
//!
//! Both pouring directions are simulated side by side and the shorter trace
//! wins. Termination of each simulation relies on the gcd check performed
//! before either one starts.

use std::num::NonZeroU64;

use tracing::debug;

use crate::error::SolveError;
use crate::jug::{JugLabel, JugSpec};
use crate::operation::Action;
use crate::trace::{Trace, TraceBuilder};

/// Computes the shortest of the two single-direction pouring strategies that
/// leaves `z` units in one of the jugs of capacities `x` and `y`.
///
/// Operations in the returned trace refer to the jugs by the caller's labels
/// regardless of which one is bigger. On equal length the trace that pours
/// from the bigger jug into the smaller one is returned.
///
/// # Errors
/// Returns [`SolveError::TargetExceedsCapacity`] if `z` is larger than both
/// jugs, or [`SolveError::NoIntegerSolution`] if `gcd(x, y)` does not divide `z`.
pub fn solve(x: NonZeroU64, y: NonZeroU64, z: NonZeroU64) -> Result<Trace, SolveError> {
    let (small, big) = normalize(x.get(), y.get());
    let target = z.get();

    if target > big.capacity {
        return Err(SolveError::TargetExceedsCapacity {
            target,
            small: small.capacity,
            big: big.capacity,
        });
    }

    if target % gcd(small.capacity, big.capacity) != 0 {
        return Err(SolveError::NoIntegerSolution {
            target,
            small: small.capacity,
            big: big.capacity,
        });
    }

    let (big_first, small_first) = rayon::join(|| pour(big, small, target), || pour(small, big, target));

    let trace = if small_first.total_steps() < big_first.total_steps() {
        small_first
    } else {
        big_first
    };
    debug!(
        x = x.get(),
        y = y.get(),
        z = target,
        jug = %trace.jug(),
        total_steps = trace.total_steps(),
        "riddle solved"
    );
    Ok(trace)
}

/// Orders the two jugs by capacity, keeping the caller's labels. Equal
/// capacities leave x as the smaller jug.
fn normalize(x: u64, y: u64) -> (JugSpec, JugSpec) {
    let x = JugSpec::new(x, JugLabel::X);
    let y = JugSpec::new(y, JugLabel::Y);
    if x.capacity > y.capacity {
        (y, x)
    } else {
        (x, y)
    }
}

/// Greatest common divisor by Euclid's algorithm.
#[must_use]
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Simulates repeatedly pouring `from` into `into`, starting with `from` full
/// and `into` empty, until either jug holds `target`.
///
/// The caller must have checked that `gcd(from, into)` divides `target` and
/// that `target` fits in the bigger jug; otherwise this never returns.
fn pour(from: JugSpec, into: JugSpec, target: u64) -> Trace {
    let mut trace = TraceBuilder::new();
    let (mut level_from, mut level_into) = (from.capacity, 0_u64);

    trace.record(Action::Fill {
        jug: from.label,
        amount: from.capacity,
    });
    if level_from == target {
        return trace.finish(from.label);
    }

    loop {
        let amount = level_from.min(into.capacity - level_into);
        level_into += amount;
        level_from -= amount;
        trace.record(Action::Pour {
            origin: from.label,
            destination: into.label,
            amount,
        });

        if level_from == target {
            return trace.finish(from.label);
        }
        if level_into == target {
            return trace.finish(into.label);
        }

        if level_from == 0 {
            level_from = from.capacity;
            trace.record(Action::Fill {
                jug: from.label,
                amount: from.capacity,
            });
        } else if level_into == into.capacity {
            level_into = 0;
            trace.record(Action::Empty {
                jug: into.label,
                amount: into.capacity,
            });
        }
    }
}
