use crate::model::Dimension;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("{dimension} pattern `{pattern}` lacks the named capture group `{group}`")]
    MissingCaptureGroup {
        dimension: Dimension,
        pattern: String,
        group: &'static str,
    },
}
