//! Writes the deterministic mixed fixture feed as a replayable capture
//! file, for exercising `chaintap decode` by hand:
//!
//! ```bash
//! cargo run -p chaintap-tests --bin generate_capture -- /tmp/mixed.feed
//! cargo run -p chaintap-cli -- decode /tmp/mixed.feed --mode text
//! ```

use std::path::PathBuf;
use std::process;

use chaintap_tests::{capture_bytes, mixed_feed};

fn main() {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: generate_capture <output-file>");
        process::exit(1);
    };

    let frames = mixed_feed();
    let capture = capture_bytes(frames.iter());
    if let Err(e) = std::fs::write(&path, &capture) {
        eprintln!("error: cannot write {}: {e}", path.display());
        process::exit(1);
    }
    println!(
        "wrote {} frames ({} bytes) to {}",
        frames.len(),
        capture.len(),
        path.display()
    );
}
