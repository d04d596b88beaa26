use std::fmt;

use bytes::Bytes;

/// The recipient address embedded in a transaction-kind topic frame: the
/// bytes remaining after the one-byte marker prefix.
///
/// The address is carried raw. Encoding it into the network's textual form
/// (base32 with a checksum) is presentation work that belongs to whatever
/// sits behind the sink, not to the feed consumer; `Display` renders
/// uppercase hex for diagnostics only.
///
/// An empty address is legal: subscribing to a bare marker byte matches
/// every account, and the node publishes the bare topic in that case.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(Bytes);

impl Address {
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&[u8]> for Address {
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
