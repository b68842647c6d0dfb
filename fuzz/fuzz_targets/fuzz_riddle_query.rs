//! Fuzz target: riddle query decoding.
//!
//! Arbitrary query strings must either decode to positive values within the
//! capacity limit or be rejected; never panic.

#![no_main]

use jug_gateway::routes::{decode_riddle_request, RiddleQuery};
use libfuzzer_sys::fuzz_target;

const MAX_CAPACITY: u64 = 10_000;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = serde_urlencoded::from_bytes::<RiddleQuery>(data) else {
        return;
    };
    if let Ok(request) = decode_riddle_request(&query, MAX_CAPACITY) {
        assert!(request.x.get() <= MAX_CAPACITY);
        assert!(request.y.get() <= MAX_CAPACITY);
    }
});
