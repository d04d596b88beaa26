#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A frame ended before a fixed-layout field could be read in full.
    #[error("frame truncated: need at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
}
