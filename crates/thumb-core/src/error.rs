use thiserror::Error;

/// Failures at the document boundary (loading, saving, construction).
/// Interactive edits never fail; they clamp or ignore instead.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("document has {0} background assets, at most one is allowed")]
    MultipleBackgrounds(usize),

    #[error("asset id {0} is used more than once")]
    DuplicateAssetId(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
