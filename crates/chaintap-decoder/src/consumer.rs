use bytes::Bytes;
use chaintap_types::{Address, BlockHeaderReader};
use chaintap_wire::{Marker, classify};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::assemble::decode_message;
use crate::error::{AssembleError, ConsumerError, FramingError, MessageFailure};
use crate::sink::EventSink;
use crate::source::FrameSource;

/// Counters accumulated over one `run` of the consumer loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Fully decoded events delivered to the sink.
    pub events: u64,
    /// Messages aborted by a framing or header-decode failure.
    pub failures: u64,
    /// Topics no marker claimed.
    pub unknown_topics: u64,
    /// Recognized-but-unmodeled messages drained (transaction status).
    pub ignored: u64,
}

/// The receive/classify/assemble/emit loop.
///
/// One message is handled end to end before the next topic frame is read:
/// the transport publishes a message's frames atomically, so draining the
/// fixed frame count for the classified marker is what keeps the loop
/// aligned with message boundaries. No state survives across messages
/// except the source connection itself.
///
/// ```text
///   FrameSource ──topic──▶ classify ──▶ pull body frames ──▶ decode
///                              │                                │
///                         unknown topic                   event / failure
///                              └──────────▶ EventSink ◀─────────┘
/// ```
///
/// Failures of a single message (framing, header decode) are reported to
/// the sink and the loop resumes at the next topic; only source loss or a
/// dead sink ends `run` with an error.
pub struct FeedConsumer<S, K, H> {
    source: S,
    sink: K,
    headers: H,
}

impl<S, K, H> FeedConsumer<S, K, H>
where
    S: FrameSource,
    K: EventSink,
    H: BlockHeaderReader,
{
    pub fn new(source: S, sink: K, headers: H) -> Self {
        Self {
            source,
            sink,
            headers,
        }
    }

    /// Tear the consumer down and hand back the source and sink, e.g. to
    /// inspect a collected [`MemorySink`](crate::MemorySink) after a run.
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Register every marker in the table with the source.
    pub fn subscribe_all(&mut self) {
        self.subscribe(&Marker::ALL);
    }

    /// Register a subset of markers with the source.
    pub fn subscribe(&mut self, markers: &[Marker]) {
        for &marker in markers {
            self.source.subscribe(marker);
        }
    }

    /// Consume until the source reports end of session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError`] on source failure or when the sink can no
    /// longer accept output.
    pub async fn run(&mut self) -> Result<ConsumerStats, ConsumerError> {
        // A channel nobody signals: the loop only exits on source end.
        let (_keep_alive, shutdown) = watch::channel(false);
        self.run_with_shutdown(shutdown).await
    }

    /// Consume until the source ends or `shutdown` flips to `true`.
    ///
    /// Shutdown is only observed while awaiting a topic frame. A request
    /// arriving mid-message takes effect after that message's fixed frame
    /// count has been drained, keeping the source aligned on a message
    /// boundary for whoever owns it next.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError`] on source failure or when the sink can no
    /// longer accept output.
    pub async fn run_with_shutdown(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<ConsumerStats, ConsumerError> {
        let mut stats = ConsumerStats::default();
        loop {
            let topic = tokio::select! {
                // Checked first so a pending shutdown wins over a ready
                // source: stopping is always at a message boundary here.
                biased;
                () = shutdown_requested(&mut shutdown) => {
                    debug!("shutdown requested, stopping at message boundary");
                    break;
                }
                frame = self.source.recv() => match frame? {
                    Some(topic) => topic,
                    None => break,
                },
            };
            self.process_message(topic, &mut stats).await?;
        }
        Ok(stats)
    }

    /// Handle one message end to end, starting from its topic frame.
    async fn process_message(
        &mut self,
        topic: Bytes,
        stats: &mut ConsumerStats,
    ) -> Result<(), ConsumerError> {
        let Some(matched) = classify(&topic) else {
            debug!(len = topic.len(), "topic matched no marker");
            stats.unknown_topics += 1;
            return self
                .sink
                .unknown_topic(topic)
                .await
                .map_err(ConsumerError::Sink);
        };
        let marker = matched.marker;
        let address = Address::from(matched.address);

        // Drain the marker's whole body before any decoding, so a decode
        // failure (or a pending shutdown) never leaves half a message in
        // the source.
        let frames = match self.pull_body_frames(marker).await? {
            Ok(frames) => frames,
            Err(missing) => {
                return self.report_failure(marker, missing.into(), stats).await;
            }
        };

        match decode_message(marker, address, &frames, &self.headers) {
            Ok(Some(event)) => {
                stats.events += 1;
                self.sink.event(event).await.map_err(ConsumerError::Sink)
            }
            Ok(None) => {
                debug!(%marker, "message recognized but not modeled, drained");
                stats.ignored += 1;
                Ok(())
            }
            Err(error) => self.report_failure(marker, error, stats).await,
        }
    }

    /// Pull the marker's fixed body frame count.
    ///
    /// The outer `Result` is a source failure (terminal); the inner one is
    /// a framing failure of just this message.
    async fn pull_body_frames(
        &mut self,
        marker: Marker,
    ) -> Result<Result<Vec<Bytes>, FramingError>, ConsumerError> {
        let expected = marker.body_frame_count();
        let mut frames = Vec::with_capacity(expected);
        while frames.len() < expected {
            match self.source.recv().await? {
                Some(frame) => frames.push(frame),
                None => {
                    return Ok(Err(FramingError::MissingFrame {
                        marker,
                        expected,
                        got: frames.len(),
                    }));
                }
            }
        }
        Ok(Ok(frames))
    }

    async fn report_failure(
        &mut self,
        marker: Marker,
        error: AssembleError,
        stats: &mut ConsumerStats,
    ) -> Result<(), ConsumerError> {
        warn!(%marker, %error, "message aborted");
        stats.failures += 1;
        self.sink
            .failure(MessageFailure { marker, error })
            .await
            .map_err(ConsumerError::Sink)
    }
}

/// Resolve once the shutdown flag flips to `true`.
///
/// If the sender is dropped without ever signalling, park forever; the
/// loop's exit is then the source's end of session.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::source::MemoryFrameSource;
    use chaintap_types::{CatapultHeaderReader, DropBlocksEvent, FeedEvent};
    use chaintap_wire::marker::{DROP_BLOCKS_MARKER, FINALIZED_BLOCK_MARKER};

    fn drop_message(height: u64) -> Vec<Bytes> {
        vec![
            Bytes::copy_from_slice(&DROP_BLOCKS_MARKER),
            Bytes::from(height.to_le_bytes().to_vec()),
        ]
    }

    fn consumer_over(
        frames: Vec<Bytes>,
    ) -> FeedConsumer<MemoryFrameSource, MemorySink, CatapultHeaderReader> {
        let mut source = MemoryFrameSource::new();
        source.push_frames(frames);
        FeedConsumer::new(source, MemorySink::new(), CatapultHeaderReader)
    }

    #[tokio::test]
    async fn consumes_messages_in_order() {
        let mut frames = Vec::new();
        for height in [10u64, 20, 30] {
            frames.extend(drop_message(height));
        }
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();

        assert_eq!(stats.events, 3);
        let heights: Vec<u64> = consumer
            .sink
            .events
            .iter()
            .map(|e| match e {
                FeedEvent::DropBlocks(d) => d.height,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(heights, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn unknown_topic_is_reported_and_loop_continues() {
        let mut frames = vec![Bytes::from_static(b"not-a-topic")];
        frames.extend(drop_message(5));
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();

        assert_eq!(stats.unknown_topics, 1);
        assert_eq!(stats.events, 1);
        assert_eq!(consumer.sink.unknown_topics[0], "not-a-topic");
    }

    #[tokio::test]
    async fn empty_topic_is_unknown_not_fatal() {
        let mut frames = vec![Bytes::new()];
        frames.extend(drop_message(5));
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();
        assert_eq!(stats.unknown_topics, 1);
        assert_eq!(stats.events, 1);
    }

    #[tokio::test]
    async fn malformed_message_aborts_only_itself() {
        // A finalization body one byte short of its minimum, then a
        // well-formed drop message.
        let mut frames = vec![
            Bytes::copy_from_slice(&FINALIZED_BLOCK_MARKER),
            Bytes::from(vec![0u8; 23]),
        ];
        frames.extend(drop_message(77));
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();

        assert_eq!(stats.failures, 1);
        assert_eq!(stats.events, 1);
        assert_eq!(consumer.sink.failures.len(), 1);
        assert_eq!(consumer.sink.failures[0].marker, Marker::FinalizedBlock);
        assert!(matches!(
            consumer.sink.events[0],
            FeedEvent::DropBlocks(DropBlocksEvent { height: 77 })
        ));
    }

    #[tokio::test]
    async fn session_ending_mid_message_reports_missing_frame() {
        // Topic frame arrives, body never does.
        let frames = vec![Bytes::copy_from_slice(&DROP_BLOCKS_MARKER)];
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();

        assert_eq!(stats.failures, 1);
        assert!(matches!(
            consumer.sink.failures[0].error,
            AssembleError::Framing(FramingError::MissingFrame {
                expected: 1,
                got: 0,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn status_message_is_drained_without_event() {
        let mut frames = vec![
            Bytes::from_static(b"s"),
            Bytes::from(vec![0u8; 44]),
        ];
        frames.extend(drop_message(3));
        let mut consumer = consumer_over(frames);
        let stats = consumer.run().await.unwrap();

        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.events, 1);
        assert!(consumer.sink.failures.is_empty());
    }

    #[tokio::test]
    async fn subscribe_all_registers_the_whole_table() {
        let mut consumer = consumer_over(Vec::new());
        consumer.subscribe_all();
        assert_eq!(consumer.source.subscriptions(), &Marker::ALL);
    }

    #[tokio::test]
    async fn shutdown_before_topic_stops_immediately() {
        let (tx, rx) = watch::channel(true);
        let mut consumer = consumer_over(drop_message(1));
        let stats = consumer.run_with_shutdown(rx).await.unwrap();
        drop(tx);

        assert_eq!(stats.events, 0);
        assert_eq!(stats.failures, 0);
    }
}
