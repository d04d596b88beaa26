use crate::marker::{Marker, MatchMode};

/// A classified topic frame: the marker that claimed it plus, for
/// prefix-matched topics, the residual bytes after the marker byte (the
/// embedded recipient address).
///
/// For exact-matched topics `address` is always empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicMatch<'a> {
    pub marker: Marker,
    pub address: &'a [u8],
}

/// Classify a topic frame against the marker table.
///
/// Matching is two-tier, and the tier order is load-bearing: the three
/// exact markers are tested by full byte equality first, and only when all
/// of them fail are the single-byte prefix markers compared against the
/// topic's first byte. An 8-byte ledger topic whose first byte happened to
/// collide with a transaction prefix must never be claimed by the prefix
/// tier.
///
/// Returns `None` for a topic no marker claims, including the empty
/// topic. Classification looks at nothing beyond the given slice and
/// never blocks.
#[must_use]
pub fn classify(topic: &[u8]) -> Option<TopicMatch<'_>> {
    for marker in Marker::ALL {
        match marker.match_mode() {
            MatchMode::Exact => {
                if topic == marker.topic_bytes() {
                    return Some(TopicMatch { marker, address: &[] });
                }
            }
            MatchMode::PrefixByte => {
                if topic.first() == Some(&marker.topic_bytes()[0]) {
                    return Some(TopicMatch { marker, address: &topic[1..] });
                }
            }
        }
    }
    None
}
