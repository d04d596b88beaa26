/// Implementation of `chaintap decode`.
///
/// Replays a feed capture through the full consumer pipeline: the replay
/// frame source feeds the consumer loop, every message is classified and
/// assembled, and the render sink writes one line per message.
///
/// # Output format (json mode)
///
/// ```text
/// {"data":{"block":{"height":1000,…},"meta":{…}},"topic":"block"}
/// {"data":{"address":"…","meta":{…}},"topic":"unconfirmedAdded"}
/// {"data":{"bytes":"616263","length":3},"topic":"unknown"}
/// ```
///
/// A summary line (events / failures / unknown topics) is logged to
/// stderr when the capture is exhausted.
use anyhow::{Context, Result, bail};
use chaintap_decoder::{FeedConsumer, ReplayFrameSource};
use chaintap_driver::{RenderConfig, RenderMode, RenderSink};
use chaintap_types::CatapultHeaderReader;
use chaintap_wire::Marker;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::DecodeArgs;

/// Run the `chaintap decode` command.
///
/// # Errors
///
/// Returns an error for an unreadable capture, an unknown mode or topic
/// name, a truncated capture, or a failed write to the output.
pub async fn run(args: &DecodeArgs) -> Result<()> {
    let config = RenderConfig {
        mode: parse_mode(&args.mode)?,
        topics: args.topics.as_deref().map(parse_topics).transpose()?,
    };

    let reader: Box<dyn AsyncRead + Unpin + Send> = if args.capture.as_os_str() == "-" {
        Box::new(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(&args.capture)
            .await
            .with_context(|| format!("cannot read {}", args.capture.display()))?;
        Box::new(file)
    };

    let writer: Box<dyn AsyncWrite + Unpin + Send> = match &args.output {
        Some(path) => {
            let file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("cannot create {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(tokio::io::stdout()),
    };

    let subscribed: Vec<Marker> = config
        .topics
        .clone()
        .unwrap_or_else(|| Marker::ALL.to_vec());

    let source = ReplayFrameSource::new(reader);
    let sink = RenderSink::new(writer, config);
    let mut consumer = FeedConsumer::new(source, sink, CatapultHeaderReader);
    consumer.subscribe(&subscribed);

    let stats = consumer
        .run()
        .await
        .with_context(|| format!("replay of {} failed", args.capture.display()))?;

    info!(
        events = stats.events,
        failures = stats.failures,
        unknown_topics = stats.unknown_topics,
        ignored = stats.ignored,
        "capture exhausted"
    );
    Ok(())
}

fn parse_mode(mode: &str) -> Result<RenderMode> {
    match mode {
        "json" => Ok(RenderMode::Json),
        "text" => Ok(RenderMode::Text),
        other => bail!("unknown mode {other:?} (expected `json` or `text`)"),
    }
}

fn parse_topics(topics: &str) -> Result<Vec<Marker>> {
    topics
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Marker::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = Marker::ALL.iter().map(|m| m.name()).collect();
                anyhow::anyhow!("unknown topic {name:?} (expected one of {})", known.join(", "))
            })
        })
        .collect()
}
