use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::major::MajorListing;

/// Read-only client for the external major-list directory.
#[async_trait]
pub trait MajorDirectoryRepository: Send + Sync {
    async fn list_majors(&self) -> Result<Vec<MajorListing>, DomainError>;
}
