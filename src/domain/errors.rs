use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The selected file failed a precondition (type, signature, size).
    /// The pipeline never starts for these.
    #[error("Rejected input: {0}")]
    RejectedInput(String),

    /// A pipeline stage failed after the input was accepted. Remaining
    /// stages are skipped and prior UI state is restored.
    #[error("{0}")]
    StageFailed(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// The backend or storage provider answered with a non-success status.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// A response body did not match the expected schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
