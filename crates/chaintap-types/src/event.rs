use bytes::Bytes;
use chaintap_wire::Marker;

use crate::address::Address;
use crate::hash::Hash256;
use crate::header::BlockHeaderInfo;

/// A fully decoded feed message: the union of every event kind the
/// consumer emits.
///
/// Each variant carries exactly the fields decodable from its message's
/// frame layout; there is no partially-populated state. Transaction-status
/// messages never surface here (they are recognized, drained, and
/// discarded), and unknown topics travel on the sink's diagnostic channel
/// instead.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Block(BlockEvent),
    FinalizedBlock(FinalizedBlockEvent),
    DropBlocks(DropBlocksEvent),
    TransactionAdd(TransactionAddEvent),
    TransactionRemoved(TransactionRemovedEvent),
}

impl FeedEvent {
    /// The marker whose message produced this event.
    #[must_use]
    pub fn marker(&self) -> Marker {
        match self {
            Self::Block(_) => Marker::Block,
            Self::FinalizedBlock(_) => Marker::FinalizedBlock,
            Self::DropBlocks(_) => Marker::DropBlocks,
            Self::TransactionAdd(e) => match e.kind {
                TransactionKind::Confirmed => Marker::ConfirmedAdded,
                TransactionKind::Unconfirmed => Marker::UnconfirmedAdded,
            },
            Self::TransactionRemoved(_) => Marker::UnconfirmedRemoved,
        }
    }
}

/// A new block was harvested.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockEvent {
    /// Height and harvester key, decoded by the header capability.
    pub header: BlockHeaderInfo,
    /// The raw header frame, kept for downstream full deserialization.
    pub header_bytes: Bytes,
    pub entity_hash: Hash256,
    pub generation_hash: Hash256,
}

/// A block height became irreversible as of a finalization round.
#[derive(Clone, Debug, PartialEq)]
pub struct FinalizedBlockEvent {
    pub round: u64,
    pub height: u64,
    pub entity_hash: Hash256,
}

/// The node rolled its chain back; everything after `height` was dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct DropBlocksEvent {
    pub height: u64,
}

/// Whether a transaction-add notification came from the confirmed ledger
/// or the mempool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Confirmed,
    Unconfirmed,
}

/// A transaction entered the confirmed ledger or the mempool.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionAddEvent {
    pub kind: TransactionKind,
    /// Recipient address embedded in the topic frame.
    pub address: Address,
    /// The raw transaction body; deserializing it is downstream work.
    pub transaction_bytes: Bytes,
    pub entity_hash: Hash256,
    pub merkle_component_hash: Hash256,
    pub height: u64,
}

/// A transaction left the mempool without confirming.
///
/// Deliberately heightless: the message layout carries only the entity
/// hash, and no height can be attributed to a transaction that never
/// landed in a block.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRemovedEvent {
    pub entity_hash: Hash256,
}
