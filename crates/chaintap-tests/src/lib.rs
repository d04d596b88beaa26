//! Shared fixtures for the chaintap integration suite: builders that
//! assemble wire-correct multipart messages, frame by frame, exactly as
//! the node publishes them.
//!
//! Every builder returns the frames of one message in wire order (topic
//! frame first). Feed them to a `MemoryFrameSource` directly, or join
//! several messages with [`capture_bytes`] to produce a replayable
//! capture stream.

#![warn(clippy::pedantic)]

use bytes::Bytes;
use chaintap_wire::Marker;
use chaintap_wire::marker::{
    BLOCK_MARKER, DROP_BLOCKS_MARKER, FINALIZED_BLOCK_MARKER, TRANSACTION_STATUS_MARKER,
    UNCONFIRMED_REMOVED_MARKER,
};

/// Offset of the signer public key in the catapult block header.
const SIGNER_OFFSET: usize = 0x48;

/// Offset of the height field in the catapult block header.
const HEIGHT_OFFSET: usize = 0x70;

/// Size of the header fixture: enough to cover every read field.
const HEADER_LEN: usize = 0x78;

/// Build a minimal catapult block header with the given height and
/// signer at their fixed offsets. All other fields are zero.
#[must_use]
pub fn catapult_header(height: u64, signer: [u8; 32]) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_LEN];
    bytes[SIGNER_OFFSET..SIGNER_OFFSET + 32].copy_from_slice(&signer);
    bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 8].copy_from_slice(&height.to_le_bytes());
    bytes
}

/// Block message: topic + header + entity hash + generation hash.
#[must_use]
pub fn block_message(
    height: u64,
    signer: [u8; 32],
    entity_hash: [u8; 32],
    generation_hash: [u8; 32],
) -> Vec<Bytes> {
    vec![
        Bytes::copy_from_slice(&BLOCK_MARKER),
        Bytes::from(catapult_header(height, signer)),
        Bytes::copy_from_slice(&entity_hash),
        Bytes::copy_from_slice(&generation_hash),
    ]
}

/// Finalization message: topic + one 48-byte body frame
/// (round ‖ height ‖ entity hash).
#[must_use]
pub fn finalized_message(round: u64, height: u64, entity_hash: [u8; 32]) -> Vec<Bytes> {
    let mut body = Vec::with_capacity(48);
    body.extend_from_slice(&round.to_le_bytes());
    body.extend_from_slice(&height.to_le_bytes());
    body.extend_from_slice(&entity_hash);
    vec![
        Bytes::copy_from_slice(&FINALIZED_BLOCK_MARKER),
        Bytes::from(body),
    ]
}

/// Drop message: topic + one 8-byte height frame.
#[must_use]
pub fn drop_message(height: u64) -> Vec<Bytes> {
    vec![
        Bytes::copy_from_slice(&DROP_BLOCKS_MARKER),
        Bytes::from(height.to_le_bytes().to_vec()),
    ]
}

/// Transaction-add message for either the confirmed or unconfirmed
/// marker: topic (marker byte + address) + transaction bytes + entity
/// hash + merkle component hash + height frame.
///
/// # Panics
///
/// Panics when `marker` is not one of the two transaction-add markers.
#[must_use]
pub fn transaction_add_message(
    marker: Marker,
    address: &[u8],
    transaction: &[u8],
    entity_hash: [u8; 32],
    merkle_component_hash: [u8; 32],
    height: u64,
) -> Vec<Bytes> {
    assert!(
        matches!(marker, Marker::ConfirmedAdded | Marker::UnconfirmedAdded),
        "not a transaction-add marker: {marker}"
    );
    let mut topic = marker.topic_bytes().to_vec();
    topic.extend_from_slice(address);
    vec![
        Bytes::from(topic),
        Bytes::copy_from_slice(transaction),
        Bytes::copy_from_slice(&entity_hash),
        Bytes::copy_from_slice(&merkle_component_hash),
        Bytes::from(height.to_le_bytes().to_vec()),
    ]
}

/// Unconfirmed-removed message: topic (marker byte + address) + one
/// 32-byte entity hash frame.
#[must_use]
pub fn transaction_removed_message(address: &[u8], entity_hash: [u8; 32]) -> Vec<Bytes> {
    let mut topic = vec![UNCONFIRMED_REMOVED_MARKER];
    topic.extend_from_slice(address);
    vec![Bytes::from(topic), Bytes::copy_from_slice(&entity_hash)]
}

/// Transaction-status message: topic (marker byte + address) + one
/// 44-byte body frame (hash ‖ deadline ‖ code), which the consumer
/// drains without decoding.
#[must_use]
pub fn status_message(address: &[u8]) -> Vec<Bytes> {
    let mut topic = vec![TRANSACTION_STATUS_MARKER];
    topic.extend_from_slice(address);
    vec![Bytes::from(topic), Bytes::from(vec![0u8; 44])]
}

/// Join message frames into a replayable capture: each frame prefixed
/// with its u32 little-endian length.
#[must_use]
pub fn capture_bytes<'a, I>(frames: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Bytes>,
{
    let mut out = Vec::new();
    for frame in frames {
        #[allow(clippy::cast_possible_truncation)]
        out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        out.extend_from_slice(frame);
    }
    out
}

/// The deterministic mixed feed used by the snapshot and replay suites:
/// one message of every kind, plus an unknown topic, in a fixed order.
#[must_use]
pub fn mixed_feed() -> Vec<Bytes> {
    let mut frames = Vec::new();
    frames.extend(block_message(1000, [0x11; 32], [0xA1; 32], [0xA2; 32]));
    frames.extend(finalized_message(12, 998, [0xB1; 32]));
    frames.extend(transaction_add_message(
        Marker::UnconfirmedAdded,
        &[0x98, 0x01, 0x02],
        &[0xDE, 0xAD, 0xBE, 0xEF],
        [0xC1; 32],
        [0xC2; 32],
        1001,
    ));
    frames.extend(transaction_removed_message(&[0x98, 0x01, 0x02], [0xC1; 32]));
    frames.push(Bytes::from_static(b"zz"));
    frames.extend(status_message(&[0x98, 0x01, 0x02]));
    frames.extend(drop_message(997));
    frames
}
