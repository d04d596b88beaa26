#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A hash field was built from a slice that is not exactly 32 bytes.
    #[error("invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },
}
