//! Fuzz the whole consumer loop: an arbitrary list of frames is treated
//! as a feed session. Whatever the framing garbage, the loop must drain
//! the session without panicking; only per-message failures and unknown
//! topics may come out.

#![no_main]

use bytes::Bytes;
use chaintap_decoder::{FeedConsumer, MemoryFrameSource, MemorySink};
use chaintap_types::CatapultHeaderReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frames: Vec<Vec<u8>>| {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    rt.block_on(async {
        let mut source = MemoryFrameSource::new();
        source.push_frames(frames.into_iter().map(Bytes::from));
        let mut consumer = FeedConsumer::new(source, MemorySink::new(), CatapultHeaderReader);
        let _ = consumer.run().await;
    });
});
