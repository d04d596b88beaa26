//! Fuzz the fixed-offset block header reader: arbitrary bytes either
//! decode or fail with a typed error, never panic.

#![no_main]

use chaintap_types::{BlockHeaderReader, CatapultHeaderReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = CatapultHeaderReader.decode_block_header(data);
});
