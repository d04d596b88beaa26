use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use chaintap_wire::Marker;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Default per-frame size cap for [`ReplayFrameSource`]: 16 MiB.
///
/// A capture whose length prefix claims more than this is corrupt (no
/// feed message frame approaches it) and must not drive a giant
/// allocation.
pub const DEFAULT_FRAME_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O failure in the underlying transport or capture reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A capture's length prefix exceeds the configured frame cap.
    #[error("frame length {len} exceeds the {limit} byte limit")]
    FrameTooLarge { len: usize, limit: usize },
}

/// The frame-delivery capability the consumer loop is built against.
///
/// Implementations must preserve frame boundaries and in-session order;
/// the loop's whole framing model rests on those two guarantees. A
/// `recv` returning `Ok(None)` means the session is over; the loop
/// exits cleanly. Reconnect and retry policy live behind this trait,
/// never in the loop.
#[async_trait]
pub trait FrameSource: Send {
    /// Receive the next frame, or `None` at end of session.
    async fn recv(&mut self) -> Result<Option<Bytes>, SourceError>;

    /// Register interest in a marker's topics. Called for each marker
    /// before the loop starts; implementations with no filtering notion
    /// may ignore it.
    fn subscribe(&mut self, marker: Marker);
}

/// In-memory frame source backed by a queue.
///
/// The unit-test and fixture workhorse: push the frames of one or more
/// multipart messages in wire order, then run the consumer against it.
/// Subscriptions are recorded so tests can assert what the loop
/// registered.
#[derive(Debug, Default)]
pub struct MemoryFrameSource {
    frames: VecDeque<Bytes>,
    subscriptions: Vec<Marker>,
}

impl MemoryFrameSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self, frame: impl Into<Bytes>) {
        self.frames.push_back(frame.into());
    }

    pub fn push_frames<I>(&mut self, frames: I)
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        for frame in frames {
            self.push_frame(frame);
        }
    }

    /// Markers registered via [`FrameSource::subscribe`], in call order.
    #[must_use]
    pub fn subscriptions(&self) -> &[Marker] {
        &self.subscriptions
    }
}

#[async_trait]
impl FrameSource for MemoryFrameSource {
    async fn recv(&mut self) -> Result<Option<Bytes>, SourceError> {
        Ok(self.frames.pop_front())
    }

    fn subscribe(&mut self, marker: Marker) {
        self.subscriptions.push(marker);
    }
}

/// Frame source over a captured feed: a byte stream of `u32` little-endian
/// length-prefixed frames.
///
/// ```text
/// ┌──────────────┬───────────────┬──────────────┬───────────────┬───┐
/// │ len₀ (u32 LE)│ frame₀ bytes  │ len₁ (u32 LE)│ frame₁ bytes  │ … │
/// └──────────────┴───────────────┴──────────────┴───────────────┴───┘
/// ```
///
/// End of input at a frame boundary is a clean end of session; end of
/// input inside a length prefix or a frame body is a truncated capture
/// and surfaces as an I/O error. Reads incrementally from any
/// `AsyncRead` (files, pipes, sockets).
pub struct ReplayFrameSource<R> {
    reader: R,
    frame_limit: usize,
}

impl<R: AsyncRead + Unpin + Send> ReplayFrameSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            frame_limit: DEFAULT_FRAME_LIMIT,
        }
    }

    /// Override the per-frame size cap.
    #[must_use]
    pub fn with_frame_limit(mut self, limit: usize) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Read the 4-byte length prefix, distinguishing a clean end of
    /// stream (no bytes at all) from a mid-prefix truncation.
    async fn read_len(&mut self) -> Result<Option<usize>, SourceError> {
        let mut buf = [0u8; 4];
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "capture ended inside a frame length prefix",
                )
                .into());
            }
            filled += n;
        }
        Ok(Some(u32::from_le_bytes(buf) as usize))
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> FrameSource for ReplayFrameSource<R> {
    async fn recv(&mut self) -> Result<Option<Bytes>, SourceError> {
        let Some(len) = self.read_len().await? else {
            return Ok(None);
        };

        if len > self.frame_limit {
            return Err(SourceError::FrameTooLarge {
                len,
                limit: self.frame_limit,
            });
        }

        let mut frame = vec![0u8; len];
        self.reader.read_exact(&mut frame).await.map_err(|e| {
            std::io::Error::new(e.kind(), "capture ended inside a frame body")
        })?;
        Ok(Some(Bytes::from(frame)))
    }

    fn subscribe(&mut self, _marker: Marker) {
        // A capture was already filtered by whatever recorded it.
    }
}
