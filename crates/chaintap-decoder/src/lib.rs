#![warn(clippy::pedantic)]

pub mod assemble;
pub mod consumer;
pub mod error;
pub mod sink;
pub mod source;

pub use assemble::decode_message;
pub use consumer::{ConsumerStats, FeedConsumer};
pub use error::{AssembleError, ConsumerError, FramingError, MessageFailure};
pub use sink::{EventSink, MemorySink};
pub use source::{FrameSource, MemoryFrameSource, ReplayFrameSource, SourceError};
