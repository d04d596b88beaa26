#![warn(clippy::pedantic)]

pub mod error;
pub mod layout;
pub mod marker;
pub mod topic;

pub use error::WireError;
pub use marker::{Marker, MatchMode};
pub use topic::{TopicMatch, classify};
