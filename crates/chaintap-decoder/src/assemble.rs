use bytes::Bytes;
use chaintap_types::{
    Address, BlockEvent, BlockHeaderReader, DropBlocksEvent, FeedEvent, FinalizedBlockEvent,
    Hash256, TransactionAddEvent, TransactionKind, TransactionRemovedEvent,
};
use chaintap_wire::layout::{HASH_LEN, read_hash, read_u64_le};
use chaintap_wire::{Marker, WireError};

use crate::error::{AssembleError, FramingError};

/// Minimum finalization body: round (8) + height (8) + at least the start
/// of the entity hash.
const FINALIZED_MIN_LEN: usize = 24;

/// Decode one classified message from its drained body frames.
///
/// The caller has already pulled `marker.body_frame_count()` frames off
/// the source; this function is pure computation from there. Per-kind
/// layouts:
///
/// ```text
/// ┌─────────────────────┬─────────────────────────────────────────────────┐
/// │ Marker              │ Body frames                                     │
/// ├─────────────────────┼─────────────────────────────────────────────────┤
/// │ block               │ header bytes │ entity hash │ generation hash    │
/// │ finalizedBlock      │ round u64 ‖ height u64 ‖ entity hash            │
/// │ dropBlocks          │ height u64 (trailing bytes ignored)             │
/// │ confirmedAdded      │ tx bytes │ entity hash │ merkle hash │ height   │
/// │ unconfirmedAdded    │ same as confirmedAdded                          │
/// │ unconfirmedRemoved  │ entity hash                                     │
/// │ status              │ drained, not decoded (returns Ok(None))         │
/// └─────────────────────┴─────────────────────────────────────────────────┘
/// ```
///
/// Either a complete event comes back or the whole message fails; no
/// partially decoded event ever escapes.
///
/// # Errors
///
/// - [`FramingError`] when `frames` is not the marker's fixed count or a
///   frame is below its minimum length.
/// - [`AssembleError::Header`] when the header capability rejects a block
///   header frame.
pub fn decode_message(
    marker: Marker,
    address: Address,
    frames: &[Bytes],
    headers: &dyn BlockHeaderReader,
) -> Result<Option<FeedEvent>, AssembleError> {
    let expected = marker.body_frame_count();
    if frames.len() != expected {
        return Err(FramingError::MissingFrame {
            marker,
            expected,
            got: frames.len(),
        }
        .into());
    }

    let event = match marker {
        Marker::Block => Some(decode_block(frames, headers)?),
        Marker::FinalizedBlock => Some(decode_finalized(&frames[0])?),
        Marker::DropBlocks => Some(decode_drop(&frames[0])?),
        Marker::ConfirmedAdded => Some(decode_transaction_add(
            TransactionKind::Confirmed,
            address,
            frames,
        )?),
        Marker::UnconfirmedAdded => Some(decode_transaction_add(
            TransactionKind::Unconfirmed,
            address,
            frames,
        )?),
        Marker::UnconfirmedRemoved => Some(decode_transaction_removed(&frames[0])?),
        // Recognized so its body frame gets drained, but not modeled.
        Marker::TransactionStatus => None,
    };
    Ok(event)
}

fn decode_block(
    frames: &[Bytes],
    headers: &dyn BlockHeaderReader,
) -> Result<FeedEvent, AssembleError> {
    let header = headers.decode_block_header(&frames[0])?;
    let entity_hash = hash_at(Marker::Block, 1, &frames[1])?;
    let generation_hash = hash_at(Marker::Block, 2, &frames[2])?;

    Ok(FeedEvent::Block(BlockEvent {
        header,
        header_bytes: frames[0].clone(),
        entity_hash,
        generation_hash,
    }))
}

fn decode_finalized(frame: &Bytes) -> Result<FeedEvent, FramingError> {
    if frame.len() < FINALIZED_MIN_LEN {
        return Err(FramingError::ShortFrame {
            marker: Marker::FinalizedBlock,
            frame_index: 0,
            needed: FINALIZED_MIN_LEN,
            got: frame.len(),
        });
    }

    let round = read_u64_le(frame, 0).expect("length checked");
    let height = read_u64_le(frame, 8).expect("length checked");

    // The node emits a full 32-byte hash after the two integers; a shorter
    // tail (seen from pre-release nodes) is zero-padded rather than
    // rejected, since the leading bytes are still meaningful.
    let mut hash = [0u8; HASH_LEN];
    let rest = &frame[16..];
    let n = rest.len().min(HASH_LEN);
    hash[..n].copy_from_slice(&rest[..n]);

    Ok(FeedEvent::FinalizedBlock(FinalizedBlockEvent {
        round,
        height,
        entity_hash: Hash256(hash),
    }))
}

fn decode_drop(frame: &Bytes) -> Result<FeedEvent, FramingError> {
    let height =
        read_u64_le(frame, 0).map_err(|e| short_frame(Marker::DropBlocks, 0, e))?;
    Ok(FeedEvent::DropBlocks(DropBlocksEvent { height }))
}

fn decode_transaction_add(
    kind: TransactionKind,
    address: Address,
    frames: &[Bytes],
) -> Result<FeedEvent, FramingError> {
    let marker = match kind {
        TransactionKind::Confirmed => Marker::ConfirmedAdded,
        TransactionKind::Unconfirmed => Marker::UnconfirmedAdded,
    };

    let entity_hash = hash_at(marker, 1, &frames[1])?;
    let merkle_component_hash = hash_at(marker, 2, &frames[2])?;
    let height = read_u64_le(&frames[3], 0).map_err(|e| short_frame(marker, 3, e))?;

    Ok(FeedEvent::TransactionAdd(TransactionAddEvent {
        kind,
        address,
        transaction_bytes: frames[0].clone(),
        entity_hash,
        merkle_component_hash,
        height,
    }))
}

fn decode_transaction_removed(frame: &Bytes) -> Result<FeedEvent, FramingError> {
    let entity_hash = hash_at(Marker::UnconfirmedRemoved, 0, frame)?;
    Ok(FeedEvent::TransactionRemoved(TransactionRemovedEvent {
        entity_hash,
    }))
}

/// Read the leading 32-byte hash of a frame, tagging failures with the
/// marker and frame index for the sink's diagnostics.
fn hash_at(marker: Marker, frame_index: usize, frame: &Bytes) -> Result<Hash256, FramingError> {
    read_hash(frame, 0)
        .map(Hash256)
        .map_err(|e| short_frame(marker, frame_index, e))
}

fn short_frame(marker: Marker, frame_index: usize, e: WireError) -> FramingError {
    let WireError::Truncated { needed, got } = e;
    FramingError::ShortFrame {
        marker,
        frame_index,
        needed,
        got,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaintap_types::CatapultHeaderReader;

    const HEADERS: CatapultHeaderReader = CatapultHeaderReader;

    fn no_address() -> Address {
        Address::from(&[][..])
    }

    fn header_frame(height: u64, signer: [u8; 32]) -> Bytes {
        let mut bytes = vec![0u8; 0x78];
        bytes[0x48..0x68].copy_from_slice(&signer);
        bytes[0x70..0x78].copy_from_slice(&height.to_le_bytes());
        Bytes::from(bytes)
    }

    #[test]
    fn block_message_decodes() {
        let frames = vec![
            header_frame(99, [0x07; 32]),
            Bytes::from(vec![0xAA; 32]),
            Bytes::from(vec![0xBB; 32]),
        ];
        let event = decode_message(Marker::Block, no_address(), &frames, &HEADERS)
            .unwrap()
            .unwrap();

        let FeedEvent::Block(block) = event else {
            panic!("expected Block, got {event:?}");
        };
        assert_eq!(block.header.height, 99);
        assert_eq!(block.header.signer_public_key.as_bytes(), &[0x07; 32]);
        assert_eq!(block.header_bytes, frames[0]);
        assert_eq!(block.entity_hash, Hash256([0xAA; 32]));
        assert_eq!(block.generation_hash, Hash256([0xBB; 32]));
    }

    #[test]
    fn block_header_rejection_is_decode_error() {
        let frames = vec![
            Bytes::from(vec![0u8; 10]),
            Bytes::from(vec![0xAA; 32]),
            Bytes::from(vec![0xBB; 32]),
        ];
        let err = decode_message(Marker::Block, no_address(), &frames, &HEADERS).unwrap_err();
        assert!(matches!(err, AssembleError::Header(_)));
    }

    #[test]
    fn finalized_message_decodes() {
        // 40-byte frame: round=5, height=12345, zero hash tail.
        let mut frame = vec![0u8; 40];
        frame[0..8].copy_from_slice(&5u64.to_le_bytes());
        frame[8..16].copy_from_slice(&12345u64.to_le_bytes());

        let event = decode_message(
            Marker::FinalizedBlock,
            no_address(),
            &[Bytes::from(frame)],
            &HEADERS,
        )
        .unwrap()
        .unwrap();

        let FeedEvent::FinalizedBlock(finalized) = event else {
            panic!("expected FinalizedBlock, got {event:?}");
        };
        assert_eq!(finalized.round, 5);
        assert_eq!(finalized.height, 12345);
        assert_eq!(finalized.entity_hash, Hash256([0; 32]));
    }

    #[test]
    fn finalized_full_hash_is_read_exactly() {
        let mut frame = vec![0u8; 48];
        frame[16..48].copy_from_slice(&[0xCD; 32]);
        let event = decode_message(
            Marker::FinalizedBlock,
            no_address(),
            &[Bytes::from(frame)],
            &HEADERS,
        )
        .unwrap()
        .unwrap();

        let FeedEvent::FinalizedBlock(finalized) = event else {
            panic!("expected FinalizedBlock, got {event:?}");
        };
        assert_eq!(finalized.entity_hash, Hash256([0xCD; 32]));
    }

    #[test]
    fn finalized_frame_below_24_bytes_fails() {
        let err = decode_message(
            Marker::FinalizedBlock,
            no_address(),
            &[Bytes::from(vec![0u8; 23])],
            &HEADERS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Framing(FramingError::ShortFrame {
                marker: Marker::FinalizedBlock,
                frame_index: 0,
                needed: 24,
                got: 23,
            })
        ));
    }

    #[test]
    fn drop_message_decodes_and_ignores_trailing_bytes() {
        let mut frame = 100u64.to_le_bytes().to_vec();
        frame.extend_from_slice(b"trailing");
        let event = decode_message(
            Marker::DropBlocks,
            no_address(),
            &[Bytes::from(frame)],
            &HEADERS,
        )
        .unwrap()
        .unwrap();
        assert_eq!(event, FeedEvent::DropBlocks(DropBlocksEvent { height: 100 }));
    }

    #[test]
    fn drop_frame_below_8_bytes_fails() {
        let err = decode_message(
            Marker::DropBlocks,
            no_address(),
            &[Bytes::from(vec![0u8; 7])],
            &HEADERS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Framing(FramingError::ShortFrame {
                needed: 8,
                got: 7,
                ..
            })
        ));
    }

    #[test]
    fn unconfirmed_add_decodes_with_address() {
        let address = Address::from(&[0x01, 0x02, 0x03][..]);
        let frames = vec![
            Bytes::from_static(b"tx-bytes"),
            Bytes::from(vec![0x11; 32]),
            Bytes::from(vec![0x22; 32]),
            Bytes::from(42u64.to_le_bytes().to_vec()),
        ];
        let event = decode_message(Marker::UnconfirmedAdded, address, &frames, &HEADERS)
            .unwrap()
            .unwrap();

        let FeedEvent::TransactionAdd(tx) = event else {
            panic!("expected TransactionAdd, got {event:?}");
        };
        assert_eq!(tx.kind, TransactionKind::Unconfirmed);
        assert_eq!(tx.address.as_bytes(), &[0x01, 0x02, 0x03]);
        assert_eq!(tx.transaction_bytes, Bytes::from_static(b"tx-bytes"));
        assert_eq!(tx.entity_hash, Hash256([0x11; 32]));
        assert_eq!(tx.merkle_component_hash, Hash256([0x22; 32]));
        assert_eq!(tx.height, 42);
    }

    #[test]
    fn confirmed_add_is_tagged_confirmed() {
        let frames = vec![
            Bytes::from_static(b"tx"),
            Bytes::from(vec![0; 32]),
            Bytes::from(vec![0; 32]),
            Bytes::from(7u64.to_le_bytes().to_vec()),
        ];
        let event = decode_message(Marker::ConfirmedAdded, no_address(), &frames, &HEADERS)
            .unwrap()
            .unwrap();
        let FeedEvent::TransactionAdd(tx) = event else {
            panic!("expected TransactionAdd, got {event:?}");
        };
        assert_eq!(tx.kind, TransactionKind::Confirmed);
    }

    #[test]
    fn transaction_add_height_frame_ignores_trailing_bytes() {
        let mut height_frame = 42u64.to_le_bytes().to_vec();
        height_frame.extend_from_slice(&[0xFF; 8]);
        let frames = vec![
            Bytes::new(),
            Bytes::from(vec![0; 32]),
            Bytes::from(vec![0; 32]),
            Bytes::from(height_frame),
        ];
        let event = decode_message(Marker::ConfirmedAdded, no_address(), &frames, &HEADERS)
            .unwrap()
            .unwrap();
        let FeedEvent::TransactionAdd(tx) = event else {
            panic!("expected TransactionAdd, got {event:?}");
        };
        assert_eq!(tx.height, 42);
    }

    #[test]
    fn transaction_add_short_hash_frame_fails_with_index() {
        let frames = vec![
            Bytes::from_static(b"tx"),
            Bytes::from(vec![0; 32]),
            Bytes::from(vec![0; 31]),
            Bytes::from(7u64.to_le_bytes().to_vec()),
        ];
        let err =
            decode_message(Marker::ConfirmedAdded, no_address(), &frames, &HEADERS).unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Framing(FramingError::ShortFrame {
                frame_index: 2,
                needed: 32,
                got: 31,
                ..
            })
        ));
    }

    #[test]
    fn removed_message_decodes() {
        let event = decode_message(
            Marker::UnconfirmedRemoved,
            no_address(),
            &[Bytes::from(vec![0x5A; 32])],
            &HEADERS,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            event,
            FeedEvent::TransactionRemoved(TransactionRemovedEvent {
                entity_hash: Hash256([0x5A; 32]),
            })
        );
    }

    #[test]
    fn status_message_produces_no_event() {
        let result = decode_message(
            Marker::TransactionStatus,
            no_address(),
            &[Bytes::from(vec![0u8; 44])],
            &HEADERS,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn wrong_frame_count_is_missing_frame() {
        let err = decode_message(
            Marker::Block,
            no_address(),
            &[Bytes::new(), Bytes::new()],
            &HEADERS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Framing(FramingError::MissingFrame {
                marker: Marker::Block,
                expected: 3,
                got: 2,
            })
        ));
    }
}
