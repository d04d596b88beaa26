use async_trait::async_trait;
use bytes::Bytes;
use chaintap_decoder::{EventSink, MessageFailure};
use chaintap_types::FeedEvent;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::RenderConfig;
use crate::render::{DefaultRenderer, FeedRenderer};

/// An [`EventSink`] that renders each message and writes it as one line
/// to an async writer (stdout, a file, a pipe).
///
/// Lines are flushed individually so a live feed is visible as it
/// arrives rather than whenever a buffer happens to fill.
pub struct RenderSink<W> {
    writer: W,
    config: RenderConfig,
    renderer: DefaultRenderer,
}

impl<W: AsyncWrite + Unpin + Send> RenderSink<W> {
    #[must_use]
    pub fn new(writer: W, config: RenderConfig) -> Self {
        Self {
            writer,
            config,
            renderer: DefaultRenderer,
        }
    }

    /// Consume the sink and hand back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> EventSink for RenderSink<W> {
    async fn event(&mut self, event: FeedEvent) -> std::io::Result<()> {
        let rendered = self
            .renderer
            .render_event(&event, &self.config)
            .map_err(std::io::Error::other)?;
        match rendered {
            Some(line) => self.write_line(&line).await,
            None => Ok(()),
        }
    }

    async fn failure(&mut self, failure: MessageFailure) -> std::io::Result<()> {
        let line = self
            .renderer
            .render_failure(&failure, &self.config)
            .map_err(std::io::Error::other)?;
        self.write_line(&line).await
    }

    async fn unknown_topic(&mut self, topic: Bytes) -> std::io::Result<()> {
        let line = self
            .renderer
            .render_unknown_topic(&topic, &self.config)
            .map_err(std::io::Error::other)?;
        self.write_line(&line).await
    }
}
