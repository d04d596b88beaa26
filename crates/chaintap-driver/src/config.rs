use chaintap_wire::Marker;

/// Configuration for event rendering.
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────────────┐
/// │ Field  │ Purpose                                                  │
/// ├────────┼──────────────────────────────────────────────────────────┤
/// │ mode   │ Selects JSON-lines or plain-text output                  │
/// │ topics │ Optional allowlist of markers whose events are rendered  │
/// └────────┴──────────────────────────────────────────────────────────┘
/// ```
///
/// When `topics` is `None` every event renders. When `Some(vec)`, events
/// whose marker is absent from the list are skipped after decoding; frame
/// draining already happened in the consumer, so filtering can never
/// desynchronize the feed. Failures and unknown-topic diagnostics are
/// never filtered.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub topics: Option<Vec<Marker>>,
}

impl Default for RenderConfig {
    /// JSON mode, no topic filter. JSON is the default because it is the
    /// shape the node gateway speaks; `Text` is for eyeballing a feed.
    fn default() -> Self {
        Self {
            mode: RenderMode::Json,
            topics: None,
        }
    }
}

impl RenderConfig {
    /// Should an event from this marker be rendered?
    #[must_use]
    pub fn renders(&self, marker: Marker) -> bool {
        self.topics
            .as_ref()
            .is_none_or(|topics| topics.contains(&marker))
    }
}

/// Output format modes.
///
/// ```text
/// ┌──────┬────────────────────────────────────────────────────────────┐
/// │ Mode │ Example line                                               │
/// ├──────┼────────────────────────────────────────────────────────────┤
/// │ Json │ {"topic":"dropBlocks","data":{"height":100}}               │
/// │ Text │ drop after height=100                                      │
/// └──────┴────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Json,
    Text,
}
