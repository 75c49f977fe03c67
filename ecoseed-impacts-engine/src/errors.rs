use ecoseed_impacts_models::{ModelError, ProcessId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpactsError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("raw impacts unavailable for {process}: {reason}")]
    Source { process: ProcessId, reason: String },
}

pub type Result<T> = std::result::Result<T, ImpactsError>;
