//! JSON-lines rendering, one object per message, shaped like the node
//! gateway's websocket payloads: a `topic` discriminator plus a `data`
//! object whose `meta` nests the wire hashes.

use chaintap_decoder::MessageFailure;
use chaintap_types::{FeedEvent, TransactionAddEvent, TransactionKind};
use chaintap_wire::Marker;
use serde_json::{Value, json};

use crate::error::RenderError;

pub(crate) fn render_event(event: &FeedEvent) -> Result<String, RenderError> {
    let value = match event {
        FeedEvent::Block(block) => json!({
            "topic": "block",
            "data": {
                "block": {
                    "height": block.header.height,
                    "signerPublicKey": block.header.signer_public_key.to_string(),
                },
                "meta": {
                    "hash": block.entity_hash.to_string(),
                    "generationHash": block.generation_hash.to_string(),
                },
            },
        }),
        FeedEvent::FinalizedBlock(finalized) => json!({
            "topic": "finalizedBlock",
            "data": {
                "finalizationRound": finalized.round,
                "height": finalized.height,
                "hash": finalized.entity_hash.to_string(),
            },
        }),
        FeedEvent::DropBlocks(drop) => json!({
            "topic": "dropBlocks",
            "data": { "height": drop.height },
        }),
        FeedEvent::TransactionAdd(tx) => transaction_add(tx),
        // No height here: the message layout carries only the hash.
        FeedEvent::TransactionRemoved(removed) => json!({
            "topic": "unconfirmedRemoved",
            "data": {
                "meta": { "hash": removed.entity_hash.to_string() },
            },
        }),
    };
    Ok(serde_json::to_string(&value)?)
}

fn transaction_add(tx: &TransactionAddEvent) -> Value {
    let marker = match tx.kind {
        TransactionKind::Confirmed => Marker::ConfirmedAdded,
        TransactionKind::Unconfirmed => Marker::UnconfirmedAdded,
    };
    json!({
        "topic": marker.name(),
        "data": {
            "address": tx.address.to_string(),
            "transactionPayload": hex::encode_upper(&tx.transaction_bytes),
            "meta": {
                "hash": tx.entity_hash.to_string(),
                "merkleComponentHash": tx.merkle_component_hash.to_string(),
                // The gateway serializes heights as strings; kept for
                // drop-in compatibility with its consumers.
                "height": tx.height.to_string(),
            },
        },
    })
}

pub(crate) fn render_failure(failure: &MessageFailure) -> Result<String, RenderError> {
    let value = json!({
        "topic": "error",
        "data": {
            "marker": failure.marker.name(),
            "message": failure.error.to_string(),
        },
    });
    Ok(serde_json::to_string(&value)?)
}

pub(crate) fn render_unknown_topic(topic: &[u8]) -> Result<String, RenderError> {
    let value = json!({
        "topic": "unknown",
        "data": {
            "length": topic.len(),
            "bytes": hex::encode_upper(topic),
        },
    });
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chaintap_types::{
        Address, BlockHeaderInfo, DropBlocksEvent, Hash256, PublicKey, TransactionKind,
        TransactionRemovedEvent,
    };

    fn parsed(line: &str) -> Value {
        serde_json::from_str(line).expect("renderer must emit valid JSON")
    }

    #[test]
    fn block_event_shape() {
        let event = FeedEvent::Block(chaintap_types::BlockEvent {
            header: BlockHeaderInfo {
                height: 42,
                signer_public_key: PublicKey([0xAB; 32]),
            },
            header_bytes: Bytes::from_static(b"raw"),
            entity_hash: Hash256([0x01; 32]),
            generation_hash: Hash256([0x02; 32]),
        });
        let value = parsed(&render_event(&event).unwrap());

        assert_eq!(value["topic"], "block");
        assert_eq!(value["data"]["block"]["height"], 42);
        assert_eq!(
            value["data"]["block"]["signerPublicKey"],
            "AB".repeat(32)
        );
        assert_eq!(value["data"]["meta"]["hash"], "01".repeat(32));
        assert_eq!(value["data"]["meta"]["generationHash"], "02".repeat(32));
    }

    #[test]
    fn transaction_add_heights_are_strings() {
        let event = FeedEvent::TransactionAdd(TransactionAddEvent {
            kind: TransactionKind::Unconfirmed,
            address: Address::from(&[0x98][..]),
            transaction_bytes: Bytes::from_static(&[0xDE, 0xAD]),
            entity_hash: Hash256([0; 32]),
            merkle_component_hash: Hash256([0; 32]),
            height: 42,
        });
        let value = parsed(&render_event(&event).unwrap());

        assert_eq!(value["topic"], "unconfirmedAdded");
        assert_eq!(value["data"]["address"], "98");
        assert_eq!(value["data"]["transactionPayload"], "DEAD");
        assert_eq!(value["data"]["meta"]["height"], "42");
    }

    #[test]
    fn removed_event_has_no_height_key() {
        let event = FeedEvent::TransactionRemoved(TransactionRemovedEvent {
            entity_hash: Hash256([0x33; 32]),
        });
        let value = parsed(&render_event(&event).unwrap());

        assert_eq!(value["topic"], "unconfirmedRemoved");
        assert_eq!(value["data"]["meta"]["hash"], "33".repeat(32));
        assert!(value["data"]["meta"].get("height").is_none());
        assert!(value["data"].get("height").is_none());
    }

    #[test]
    fn drop_event_height_is_numeric() {
        let event = FeedEvent::DropBlocks(DropBlocksEvent { height: 100 });
        let value = parsed(&render_event(&event).unwrap());
        assert_eq!(value["topic"], "dropBlocks");
        assert_eq!(value["data"]["height"], 100);
    }

    #[test]
    fn unknown_topic_carries_length_and_bytes() {
        let value = parsed(&render_unknown_topic(&[0x01, 0xFF]).unwrap());
        assert_eq!(value["topic"], "unknown");
        assert_eq!(value["data"]["length"], 2);
        assert_eq!(value["data"]["bytes"], "01FF");
    }
}
