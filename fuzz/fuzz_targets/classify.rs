//! Fuzz the topic classifier: arbitrary bytes must classify (or not)
//! without panicking, and a prefix match must never return an address
//! longer than the topic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some(matched) = chaintap_wire::classify(data) {
        assert!(matched.address.len() < data.len().max(1));
        let _ = matched.marker.body_frame_count();
    }
});
