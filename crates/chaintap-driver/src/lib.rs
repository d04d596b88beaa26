#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod render;
pub mod sink;

mod render_json;
mod render_text;

pub use config::{RenderConfig, RenderMode};
pub use error::RenderError;
pub use render::{DefaultRenderer, FeedRenderer};
pub use sink::RenderSink;
