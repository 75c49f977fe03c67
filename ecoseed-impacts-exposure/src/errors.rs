use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExposureError {
    #[error("preview scale must be finite and positive, got {0}")]
    InvalidPreviewScale(f64),
    #[error("failed to parse exposure config: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ExposureError>;
