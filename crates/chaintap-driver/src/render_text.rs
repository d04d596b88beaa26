//! Plain-text rendering: one log-style line per message, the format you
//! want when watching a feed scroll by in a terminal.

use chaintap_decoder::MessageFailure;
use chaintap_types::{FeedEvent, TransactionKind};

pub(crate) fn render_event(event: &FeedEvent) -> String {
    match event {
        FeedEvent::Block(block) => format!(
            "block height={} entity_hash={} generation_hash={} harvester={}",
            block.header.height,
            block.entity_hash,
            block.generation_hash,
            block.header.signer_public_key,
        ),
        FeedEvent::FinalizedBlock(finalized) => format!(
            "finalized round={} height={} entity_hash={}",
            finalized.round, finalized.height, finalized.entity_hash,
        ),
        FeedEvent::DropBlocks(drop) => format!("drop after height={}", drop.height),
        FeedEvent::TransactionAdd(tx) => {
            let label = match tx.kind {
                TransactionKind::Confirmed => "transaction add",
                TransactionKind::Unconfirmed => "UT add",
            };
            format!(
                "{label} address={} hash={} merkle={} height={}",
                tx.address, tx.entity_hash, tx.merkle_component_hash, tx.height,
            )
        }
        FeedEvent::TransactionRemoved(removed) => {
            format!("UT del hash={}", removed.entity_hash)
        }
    }
}

pub(crate) fn render_failure(failure: &MessageFailure) -> String {
    format!("error: {failure}")
}

pub(crate) fn render_unknown_topic(topic: &[u8]) -> String {
    format!("unknown topic [ {} {} ]", topic.len(), hex::encode_upper(topic))
}
