use async_trait::async_trait;
use bytes::Bytes;
use chaintap_types::FeedEvent;

use crate::error::MessageFailure;

/// The emitter side of the consumer loop.
///
/// One call per message: a typed event on success, a typed failure when a
/// message's frames could not be assembled, and a diagnostic for topics no
/// marker claims. The loop awaits each call and does no buffering; a
/// sink that needs to absorb bursts does its own queueing.
///
/// Errors returned here are terminal for the loop (a sink that cannot
/// write has nowhere to put anything that follows).
#[async_trait]
pub trait EventSink: Send {
    async fn event(&mut self, event: FeedEvent) -> std::io::Result<()>;

    async fn failure(&mut self, failure: MessageFailure) -> std::io::Result<()>;

    async fn unknown_topic(&mut self, topic: Bytes) -> std::io::Result<()>;
}

/// Sink that collects everything it receives, for tests and fixtures.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<FeedEvent>,
    pub failures: Vec<MessageFailure>,
    pub unknown_topics: Vec<Bytes>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn event(&mut self, event: FeedEvent) -> std::io::Result<()> {
        self.events.push(event);
        Ok(())
    }

    async fn failure(&mut self, failure: MessageFailure) -> std::io::Result<()> {
        self.failures.push(failure);
        Ok(())
    }

    async fn unknown_topic(&mut self, topic: Bytes) -> std::io::Result<()> {
        self.unknown_topics.push(topic);
        Ok(())
    }
}
