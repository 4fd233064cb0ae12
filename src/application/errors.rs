use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before the pipeline started.
    #[error("{0}")]
    RejectedInput(String),

    /// A pipeline stage aborted; prior state was restored.
    #[error("{0}")]
    PipelineFailed(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Backend or storage reported a failure; local display data is
    /// left in place for a manual retry.
    #[error("{0}")]
    UpstreamError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound(msg) => ApplicationError::NotFound(msg),
            DomainError::InvalidData(msg) => ApplicationError::ValidationError(msg),
            DomainError::RejectedInput(msg) => ApplicationError::RejectedInput(msg),
            DomainError::StageFailed(msg) => ApplicationError::PipelineFailed(msg),
            DomainError::Cancelled(msg) => ApplicationError::Cancelled(msg),
            DomainError::UpstreamError(msg) => ApplicationError::UpstreamError(msg),
            DomainError::MalformedResponse(msg) => {
                ApplicationError::UpstreamError(format!("Malformed response: {msg}"))
            }
            DomainError::InternalError(msg) => ApplicationError::InternalError(msg),
        }
    }
}
