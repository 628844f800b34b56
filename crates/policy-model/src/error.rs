use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("extracted data must be a JSON object, found {0}")]
    ExtractedNotObject(&'static str),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
