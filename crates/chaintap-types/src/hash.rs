use std::fmt;

use crate::error::TypeError;

/// A 32-byte hash as it appears on the wire (entity hash, merkle component
/// hash, generation hash).
///
/// The feed never asks us to verify these; they are opaque identifiers
/// carried through to the sink. Displayed as uppercase hex, matching the
/// node's own tooling.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub const LEN: usize = 32;

    /// Build a hash from a byte slice of exactly 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidHashLength`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; Self::LEN] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidHashLength { got: bytes.len() })?;
        Ok(Self(arr))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_accepts_exactly_32_bytes() {
        let hash = Hash256::from_slice(&[0x11; 32]).unwrap();
        assert_eq!(hash.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn from_slice_rejects_other_lengths() {
        for len in [0, 31, 33] {
            let result = Hash256::from_slice(&vec![0u8; len]);
            assert!(
                matches!(result, Err(TypeError::InvalidHashLength { got }) if got == len),
                "length {len} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_uppercase_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xAB;
        bytes[31] = 0x0F;
        let rendered = Hash256(bytes).to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with("AB"));
        assert!(rendered.ends_with("0F"));
    }
}
