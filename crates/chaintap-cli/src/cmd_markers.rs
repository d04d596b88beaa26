/// Implementation of `chaintap markers`.
///
/// Prints the fixed topic marker table to stdout:
///
/// ```text
/// topic                match    bytes              frames
/// block                exact    496ACA80E4D8F29F   3
/// finalizedBlock       exact    5479CE31A032484D   1
/// dropBlocks           exact    B0B025EE8AD6205C   1
/// confirmedAdded       prefix   61 ('a')           4
/// status               prefix   73 ('s')           1
/// unconfirmedAdded     prefix   75 ('u')           4
/// unconfirmedRemoved   prefix   72 ('r')           1
/// ```
use anyhow::Result;
use chaintap_wire::{Marker, MatchMode};

use crate::MarkersArgs;

/// Run the `chaintap markers` command.
///
/// # Errors
///
/// Infallible today; returns `Result` for uniformity with the other
/// commands.
pub fn run(_args: &MarkersArgs) -> Result<()> {
    println!("{:<20} {:<8} {:<18} frames", "topic", "match", "bytes");
    for marker in Marker::ALL {
        let bytes = marker.topic_bytes();
        let rendered = match marker.match_mode() {
            MatchMode::Exact => hex::encode_upper(bytes),
            MatchMode::PrefixByte => {
                format!("{} ('{}')", hex::encode_upper(bytes), bytes[0] as char)
            }
        };
        println!(
            "{:<20} {:<8} {:<18} {}",
            marker.name(),
            match marker.match_mode() {
                MatchMode::Exact => "exact",
                MatchMode::PrefixByte => "prefix",
            },
            rendered,
            marker.body_frame_count()
        );
    }
    Ok(())
}
