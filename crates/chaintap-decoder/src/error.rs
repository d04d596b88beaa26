use chaintap_types::HeaderDecodeError;
use chaintap_wire::Marker;

use crate::source::SourceError;

/// A message violated its marker's framing contract.
///
/// Framing failures abort only the message they occur in; the consumer
/// loop reports them to the sink and resumes at the next topic frame.
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    /// The session ended (or the publisher misbehaved) before the
    /// marker's fixed body frame count was delivered.
    #[error("{marker} message ended after {got} of {expected} body frames")]
    MissingFrame {
        marker: Marker,
        expected: usize,
        got: usize,
    },

    /// A body frame was shorter than the minimum its layout requires.
    #[error(
        "{marker} body frame {frame_index} too short: need at least {needed} bytes, got {got}"
    )]
    ShortFrame {
        marker: Marker,
        frame_index: usize,
        needed: usize,
        got: usize,
    },
}

/// Why assembling a classified message failed.
///
/// ```text
///   AssembleError
///   ├── Framing(FramingError)      ← missing frame, or frame below minimum length
///   └── Header(HeaderDecodeError)  ← block-header capability rejected the bytes
/// ```
///
/// Both abort only the current message. Unknown topics are not an error at
/// all; they travel on the sink's diagnostic channel.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error("block header rejected: {0}")]
    Header(#[from] HeaderDecodeError),
}

/// A per-message failure as delivered to the event sink.
///
/// Carries the marker that classified the message so the sink can say
/// which event kind was lost without re-deriving it from the error text.
#[derive(Debug, thiserror::Error)]
#[error("{marker} message failed: {error}")]
pub struct MessageFailure {
    pub marker: Marker,
    #[source]
    pub error: AssembleError,
}

/// Terminal failure of the consumer loop.
///
/// Per-message problems never surface here; the only ways out of the
/// loop are losing the frame source or a sink that can no longer accept
/// output.
#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("event sink failed: {0}")]
    Sink(#[source] std::io::Error),
}
