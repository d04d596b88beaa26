use crate::error::WireError;

/// Length of every hash field in the feed (entity, merkle component,
/// generation).
pub const HASH_LEN: usize = 32;

/// Read an unsigned 64-bit little-endian integer at `offset`.
///
/// All multi-byte integers in message bodies are little-endian; this is the
/// only integer width the feed uses.
///
/// # Errors
///
/// Returns [`WireError::Truncated`] if the frame ends before
/// `offset + 8`.
pub fn read_u64_le(frame: &[u8], offset: usize) -> Result<u64, WireError> {
    let end = offset.checked_add(8).ok_or(WireError::Truncated {
        needed: usize::MAX,
        got: frame.len(),
    })?;
    let bytes = frame.get(offset..end).ok_or(WireError::Truncated {
        needed: end,
        got: frame.len(),
    })?;
    Ok(u64::from_le_bytes(bytes.try_into().expect("slice is 8 bytes")))
}

/// Read a 32-byte hash field at `offset`.
///
/// # Errors
///
/// Returns [`WireError::Truncated`] if the frame ends before
/// `offset + 32`.
pub fn read_hash(frame: &[u8], offset: usize) -> Result<[u8; HASH_LEN], WireError> {
    let end = offset.checked_add(HASH_LEN).ok_or(WireError::Truncated {
        needed: usize::MAX,
        got: frame.len(),
    })?;
    let bytes = frame.get(offset..end).ok_or(WireError::Truncated {
        needed: end,
        got: frame.len(),
    })?;
    Ok(bytes.try_into().expect("slice is 32 bytes"))
}
