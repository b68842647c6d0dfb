//! Fuzz target: `jug_core::solve` on small capacities.
//!
//! Every solvable riddle must replay to exactly the target in the reported
//! jug, and every unsolvable one must be rejected instead of looping.

#![no_main]

use std::num::NonZeroU64;

use jug_core::{gcd, solve};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 6]| {
    // Capacities stay within u16 so a single run is bounded.
    let read = |i: usize| u64::from(u16::from_le_bytes([data[i], data[i + 1]]));
    let (Some(x), Some(y), Some(z)) = (
        NonZeroU64::new(read(0)),
        NonZeroU64::new(read(2)),
        NonZeroU64::new(read(4)),
    ) else {
        return;
    };

    let solvable = z.get() <= x.get().max(y.get()) && z.get() % gcd(x.get(), y.get()) == 0;
    match solve(x, y, z) {
        Ok(trace) => {
            assert!(solvable, "solver accepted an unsolvable riddle");
            let levels = trace
                .replay(x.get(), y.get())
                .expect("solver traces must replay cleanly");
            assert_eq!(levels.get(trace.jug()), z.get());
        }
        Err(_) => assert!(!solvable, "solver rejected a solvable riddle"),
    }
});
