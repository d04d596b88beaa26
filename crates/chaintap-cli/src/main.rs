/// chaintap command-line tool: decode and inspect captured block-feed
/// traffic from a catapult node.
///
/// # Command overview
///
/// ```text
/// chaintap <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Replay a captured feed and render its events
///   markers    Print the topic marker table
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Enable debug-level logging on stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, invalid capture, etc.)|
///
/// Rendered events go to stdout; logging and error details go to stderr
/// so the event stream can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_markers;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The chaintap block-feed command-line tool.
#[derive(Parser)]
#[command(name = "chaintap", version, about = "Catapult block-feed CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level logging (per-message diagnostics on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Replay a captured feed and render its events.
    Decode(DecodeArgs),
    /// Print the topic marker table.
    Markers(MarkersArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `chaintap decode`.
///
/// Replays a feed capture (a stream of u32-LE length-prefixed frames, as
/// written by a recording subscriber) through the consumer loop and
/// renders one line per message to stdout.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────────┐
/// │ Flag        │ Values / default                                     │
/// ├─────────────┼──────────────────────────────────────────────────────┤
/// │ <CAPTURE>   │ capture file path, or `-` for stdin                  │
/// │ --mode      │ json (default) | text                                │
/// │ --topics    │ comma-separated topic names to render                │
/// │ -o/--output │ write rendered lines to a file instead of stdout     │
/// └─────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Capture file to replay, or `-` to read from stdin.
    pub capture: PathBuf,

    /// Output format: `json` or `text`.
    #[arg(long, default_value = "json")]
    pub mode: String,

    /// Comma-separated list of topics to render (e.g. `block,confirmedAdded`).
    ///
    /// Recognised names: `block`, `finalizedBlock`, `dropBlocks`,
    /// `confirmedAdded`, `status`, `unconfirmedAdded`, `unconfirmedRemoved`.
    /// Unlisted messages are still drained (frame boundaries must stay
    /// aligned), just not rendered.
    #[arg(long)]
    pub topics: Option<String>,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `chaintap markers`.
///
/// Prints the fixed topic marker table: subscription name, match rule,
/// wire bytes, and the body frame count each marker implies.
#[derive(clap::Args)]
pub struct MarkersArgs {}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args).await,
        Commands::Markers(args) => cmd_markers::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides; otherwise
/// `--verbose` selects debug level, default is warnings and up.
fn init_tracing(verbose: bool) {
    let default = if verbose { "chaintap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
