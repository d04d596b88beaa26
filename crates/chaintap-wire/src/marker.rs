use std::fmt;

// The three ledger-level markers are published by the node as the reversed
// byte order of the hex literals its configuration documents. Keeping them
// as raw byte arrays (already reversed) means a topic frame can be compared
// with a plain slice equality and no endianness handling at runtime.

/// Topic marker for new-block notifications. Hex literal `9FF2D8E480CA6A49`,
/// reversed on the wire.
pub const BLOCK_MARKER: [u8; 8] = [0x49, 0x6A, 0xCA, 0x80, 0xE4, 0xD8, 0xF2, 0x9F];

/// Topic marker for finalization notifications. Hex literal `4D4832A031CE7954`,
/// reversed on the wire.
pub const FINALIZED_BLOCK_MARKER: [u8; 8] = [0x54, 0x79, 0xCE, 0x31, 0xA0, 0x32, 0x48, 0x4D];

/// Topic marker for chain-rollback notifications. Hex literal `5C20D68AEE25B0B0`,
/// reversed on the wire.
pub const DROP_BLOCKS_MARKER: [u8; 8] = [0xB0, 0xB0, 0x25, 0xEE, 0x8A, 0xD6, 0x20, 0x5C];

/// Leading topic byte for confirmed-transaction notifications.
pub const CONFIRMED_ADDED_MARKER: u8 = b'a';

/// Leading topic byte for transaction-status notifications.
pub const TRANSACTION_STATUS_MARKER: u8 = b's';

/// Leading topic byte for unconfirmed-transaction-added notifications.
pub const UNCONFIRMED_ADDED_MARKER: u8 = b'u';

/// Leading topic byte for unconfirmed-transaction-removed notifications.
pub const UNCONFIRMED_REMOVED_MARKER: u8 = b'r';

/// How a marker claims a topic frame.
///
/// Ledger-level markers own the whole topic; transaction-level markers own
/// only the first byte, with the rest of the topic carrying the recipient
/// address the node used for per-account filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// The topic must equal the marker bytes exactly.
    Exact,
    /// Only the topic's first byte is compared; the remaining bytes are
    /// the embedded address payload.
    PrefixByte,
}

/// The fixed catalog of feed topics.
///
/// ```text
/// ┌─────────────────────┬────────────┬──────────────────────────┬────────┐
/// │ Marker              │ Match      │ Topic bytes              │ Frames │
/// ├─────────────────────┼────────────┼──────────────────────────┼────────┤
/// │ Block               │ Exact      │ 49 6A CA 80 E4 D8 F2 9F  │ 3      │
/// │ FinalizedBlock      │ Exact      │ 54 79 CE 31 A0 32 48 4D  │ 1      │
/// │ DropBlocks          │ Exact      │ B0 B0 25 EE 8A D6 20 5C  │ 1      │
/// │ ConfirmedAdded      │ PrefixByte │ 61 ('a') + address       │ 4      │
/// │ TransactionStatus   │ PrefixByte │ 73 ('s') + address       │ 1      │
/// │ UnconfirmedAdded    │ PrefixByte │ 75 ('u') + address       │ 4      │
/// │ UnconfirmedRemoved  │ PrefixByte │ 72 ('r') + address       │ 1      │
/// └─────────────────────┴────────────┴──────────────────────────┴────────┘
/// ```
///
/// The table never changes after startup; every method here is a pure
/// function of the variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Block,
    FinalizedBlock,
    DropBlocks,
    ConfirmedAdded,
    TransactionStatus,
    UnconfirmedAdded,
    UnconfirmedRemoved,
}

impl Marker {
    /// All seven markers, exact-match entries first.
    ///
    /// The order matters: classification walks this array and the
    /// exact-match tier must win before any first-byte comparison runs.
    pub const ALL: [Self; 7] = [
        Self::Block,
        Self::FinalizedBlock,
        Self::DropBlocks,
        Self::ConfirmedAdded,
        Self::TransactionStatus,
        Self::UnconfirmedAdded,
        Self::UnconfirmedRemoved,
    ];

    /// The byte sequence a subscriber registers for this marker.
    ///
    /// For prefix markers this is the bare one-byte prefix; registering it
    /// matches every address under that topic kind.
    #[must_use]
    pub fn topic_bytes(self) -> &'static [u8] {
        match self {
            Self::Block => &BLOCK_MARKER,
            Self::FinalizedBlock => &FINALIZED_BLOCK_MARKER,
            Self::DropBlocks => &DROP_BLOCKS_MARKER,
            Self::ConfirmedAdded => std::slice::from_ref(&CONFIRMED_ADDED_MARKER),
            Self::TransactionStatus => std::slice::from_ref(&TRANSACTION_STATUS_MARKER),
            Self::UnconfirmedAdded => std::slice::from_ref(&UNCONFIRMED_ADDED_MARKER),
            Self::UnconfirmedRemoved => std::slice::from_ref(&UNCONFIRMED_REMOVED_MARKER),
        }
    }

    /// The matching rule for this marker.
    #[must_use]
    pub fn match_mode(self) -> MatchMode {
        match self {
            Self::Block | Self::FinalizedBlock | Self::DropBlocks => MatchMode::Exact,
            Self::ConfirmedAdded
            | Self::TransactionStatus
            | Self::UnconfirmedAdded
            | Self::UnconfirmedRemoved => MatchMode::PrefixByte,
        }
    }

    /// Number of body frames that follow the topic frame for this message
    /// kind. The consumer must drain exactly this many frames before
    /// reading the next topic.
    #[must_use]
    pub fn body_frame_count(self) -> usize {
        match self {
            Self::Block => 3,
            Self::ConfirmedAdded | Self::UnconfirmedAdded => 4,
            Self::FinalizedBlock
            | Self::DropBlocks
            | Self::TransactionStatus
            | Self::UnconfirmedRemoved => 1,
        }
    }

    /// The subscription name the node gateway exposes for this marker.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::FinalizedBlock => "finalizedBlock",
            Self::DropBlocks => "dropBlocks",
            Self::ConfirmedAdded => "confirmedAdded",
            Self::TransactionStatus => "status",
            Self::UnconfirmedAdded => "unconfirmedAdded",
            Self::UnconfirmedRemoved => "unconfirmedRemoved",
        }
    }

    /// Parse a gateway subscription name back into a marker.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_markers_are_reversed_hex_literals() {
        // 9FF2D8E480CA6A49 reversed
        let mut expected: Vec<u8> = vec![0x9F, 0xF2, 0xD8, 0xE4, 0x80, 0xCA, 0x6A, 0x49];
        expected.reverse();
        assert_eq!(BLOCK_MARKER.as_slice(), expected.as_slice());

        let mut expected: Vec<u8> = vec![0x4D, 0x48, 0x32, 0xA0, 0x31, 0xCE, 0x79, 0x54];
        expected.reverse();
        assert_eq!(FINALIZED_BLOCK_MARKER.as_slice(), expected.as_slice());

        let mut expected: Vec<u8> = vec![0x5C, 0x20, 0xD6, 0x8A, 0xEE, 0x25, 0xB0, 0xB0];
        expected.reverse();
        assert_eq!(DROP_BLOCKS_MARKER.as_slice(), expected.as_slice());
    }

    #[test]
    fn transaction_markers_are_ascii() {
        assert_eq!(CONFIRMED_ADDED_MARKER, 0x61);
        assert_eq!(TRANSACTION_STATUS_MARKER, 0x73);
        assert_eq!(UNCONFIRMED_ADDED_MARKER, 0x75);
        assert_eq!(UNCONFIRMED_REMOVED_MARKER, 0x72);
    }

    #[test]
    fn exact_markers_precede_prefix_markers_in_all() {
        let first_prefix = Marker::ALL
            .iter()
            .position(|m| m.match_mode() == MatchMode::PrefixByte)
            .unwrap();
        assert!(
            Marker::ALL[..first_prefix]
                .iter()
                .all(|m| m.match_mode() == MatchMode::Exact)
        );
        assert!(
            Marker::ALL[first_prefix..]
                .iter()
                .all(|m| m.match_mode() == MatchMode::PrefixByte)
        );
    }

    #[test]
    fn frame_counts_match_message_layouts() {
        assert_eq!(Marker::Block.body_frame_count(), 3);
        assert_eq!(Marker::FinalizedBlock.body_frame_count(), 1);
        assert_eq!(Marker::DropBlocks.body_frame_count(), 1);
        assert_eq!(Marker::ConfirmedAdded.body_frame_count(), 4);
        assert_eq!(Marker::TransactionStatus.body_frame_count(), 1);
        assert_eq!(Marker::UnconfirmedAdded.body_frame_count(), 4);
        assert_eq!(Marker::UnconfirmedRemoved.body_frame_count(), 1);
    }

    #[test]
    fn names_roundtrip() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_name(marker.name()), Some(marker));
        }
        assert_eq!(Marker::from_name("cosignature"), None);
    }
}
