use chaintap_decoder::MessageFailure;
use chaintap_types::FeedEvent;

use crate::config::{RenderConfig, RenderMode};
use crate::error::RenderError;
use crate::{render_json, render_text};

/// Renders decoded feed traffic into output lines.
///
/// One line per call; the caller owns framing them into a stream (the
/// [`RenderSink`](crate::RenderSink) appends a newline per line).
/// Implementations are stateless: all knobs come through [`RenderConfig`].
pub trait FeedRenderer {
    /// Render an event, or `None` when the config's topic filter skips it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when serialization fails.
    fn render_event(
        &self,
        event: &FeedEvent,
        config: &RenderConfig,
    ) -> Result<Option<String>, RenderError>;

    /// Render a per-message failure. Never filtered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when serialization fails.
    fn render_failure(
        &self,
        failure: &MessageFailure,
        config: &RenderConfig,
    ) -> Result<String, RenderError>;

    /// Render an unknown-topic diagnostic. Never filtered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when serialization fails.
    fn render_unknown_topic(
        &self,
        topic: &[u8],
        config: &RenderConfig,
    ) -> Result<String, RenderError>;
}

/// Default renderer: dispatches to the JSON or text renderer per
/// `config.mode`, applying the topic filter first.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl FeedRenderer for DefaultRenderer {
    fn render_event(
        &self,
        event: &FeedEvent,
        config: &RenderConfig,
    ) -> Result<Option<String>, RenderError> {
        if !config.renders(event.marker()) {
            return Ok(None);
        }
        let line = match config.mode {
            RenderMode::Json => render_json::render_event(event)?,
            RenderMode::Text => render_text::render_event(event),
        };
        Ok(Some(line))
    }

    fn render_failure(
        &self,
        failure: &MessageFailure,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        match config.mode {
            RenderMode::Json => render_json::render_failure(failure),
            RenderMode::Text => Ok(render_text::render_failure(failure)),
        }
    }

    fn render_unknown_topic(
        &self,
        topic: &[u8],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        match config.mode {
            RenderMode::Json => render_json::render_unknown_topic(topic),
            RenderMode::Text => Ok(render_text::render_unknown_topic(topic)),
        }
    }
}
