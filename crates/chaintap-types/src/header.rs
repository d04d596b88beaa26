use std::fmt;

/// A harvester/signer public key lifted out of a block header.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

/// The fields a block-header reader must surface from the raw header bytes.
///
/// The full header carries far more (timestamp, difficulty, fee multiplier,
/// receipt and state hashes), but the consumer only presents height and the
/// harvester key; everything else stays in `header_bytes` for downstream
/// code that wants a full deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeaderInfo {
    pub height: u64,
    pub signer_public_key: PublicKey,
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderDecodeError {
    /// The header frame is shorter than the fixed header layout.
    #[error("block header too short: need at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
}

/// Capability for decoding a block-header frame.
///
/// The block assembler treats this as opaque: it hands over the raw header
/// bytes and either gets a [`BlockHeaderInfo`] back or surfaces the error as
/// a per-message decode failure. Implementations must not panic on
/// malformed input.
pub trait BlockHeaderReader: Send + Sync {
    /// Decode the header frame of a block message.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderDecodeError`] when the bytes cannot be a valid
    /// header.
    fn decode_block_header(&self, bytes: &[u8]) -> Result<BlockHeaderInfo, HeaderDecodeError>;
}

/// Offset of the signer public key within the catapult block header.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────┐
/// │ Offset │ Size     │ Field                           │
/// ├────────┼──────────┼─────────────────────────────────┤
/// │ 0x00   │ 4 bytes  │ Size                            │
/// │ 0x04   │ 4 bytes  │ Reserved                        │
/// │ 0x08   │ 64 bytes │ Signature                       │
/// │ 0x48   │ 32 bytes │ Signer public key               │
/// │ 0x68   │ 4 bytes  │ Reserved                        │
/// │ 0x6C   │ 1 byte   │ Version                         │
/// │ 0x6D   │ 1 byte   │ Network                         │
/// │ 0x6E   │ 2 bytes  │ Entity type                     │
/// │ 0x70   │ 8 bytes  │ Height (u64 LE)                 │
/// │ 0x78   │ …        │ Timestamp, difficulty, hashes … │
/// └────────┴──────────┴─────────────────────────────────┘
/// ```
const SIGNER_OFFSET: usize = 0x48;

/// Offset of the height field within the catapult block header.
const HEIGHT_OFFSET: usize = 0x70;

/// Minimum header length that covers every field we read.
const MIN_HEADER_LEN: usize = HEIGHT_OFFSET + 8;

/// Fixed-offset reader for the catapult block header layout.
///
/// Reads only the two presented fields and performs no signature, network,
/// or entity-type validation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatapultHeaderReader;

impl BlockHeaderReader for CatapultHeaderReader {
    fn decode_block_header(&self, bytes: &[u8]) -> Result<BlockHeaderInfo, HeaderDecodeError> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(HeaderDecodeError::Truncated {
                needed: MIN_HEADER_LEN,
                got: bytes.len(),
            });
        }

        let signer: [u8; 32] = bytes[SIGNER_OFFSET..SIGNER_OFFSET + 32]
            .try_into()
            .expect("slice is 32 bytes");
        let height = u64::from_le_bytes(
            bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 8]
                .try_into()
                .expect("slice is 8 bytes"),
        );

        Ok(BlockHeaderInfo {
            height,
            signer_public_key: PublicKey(signer),
        })
    }
}
