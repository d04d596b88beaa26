#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
