use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid zone geometry at index {index}: {width}x{height}")]
    InvalidGeometry { index: usize, width: f64, height: f64 },
    #[error("Template must define at least one drop zone")]
    EmptyTemplate,
    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),
    #[error("Cannot remove the last single-photo template")]
    LastSingleTemplate,
    #[error("Face detection failed for {}: {reason}", path.display())]
    FaceDetection { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
