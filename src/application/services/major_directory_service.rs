use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::models::major::MajorListing;
use crate::domain::repositories::major_directory_repository::MajorDirectoryRepository;

/// Fronts the external major-list directory for the edit form's major
/// picker.
pub struct MajorDirectoryService {
    major_directory_repository: Arc<dyn MajorDirectoryRepository>,
}

impl MajorDirectoryService {
    pub fn new(major_directory_repository: Arc<dyn MajorDirectoryRepository>) -> Self {
        Self {
            major_directory_repository,
        }
    }

    pub async fn list_majors(&self) -> Result<Vec<MajorListing>, ApplicationError> {
        tracing::info!("Fetching major list");

        let majors = self.major_directory_repository.list_majors().await?;
        Ok(majors)
    }

    /// Case-insensitive lookup used to validate a typed-in major against
    /// the directory before staging it.
    pub async fn find_major(&self, name: &str) -> Result<Option<MajorListing>, ApplicationError> {
        let needle = name.trim().to_lowercase();
        let majors = self.major_directory_repository.list_majors().await?;
        Ok(majors
            .into_iter()
            .find(|major| major.name.to_lowercase() == needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::errors::DomainError;

    struct FakeDirectory;

    #[async_trait]
    impl MajorDirectoryRepository for FakeDirectory {
        async fn list_majors(&self) -> Result<Vec<MajorListing>, DomainError> {
            Ok(vec![
                MajorListing {
                    college: "CMNS".to_string(),
                    major_id: "cmsc".to_string(),
                    name: "Computer Science".to_string(),
                    url: "https://example.org/cmsc".to_string(),
                },
                MajorListing {
                    college: "ARHU".to_string(),
                    major_id: "engl".to_string(),
                    name: "English".to_string(),
                    url: "https://example.org/engl".to_string(),
                },
            ])
        }
    }

    #[tokio::test]
    async fn find_major_is_case_insensitive() {
        let service = MajorDirectoryService::new(Arc::new(FakeDirectory));
        let found = service.find_major("  computer science ").await.unwrap();
        assert_eq!(found.unwrap().major_id, "cmsc");
    }

    #[tokio::test]
    async fn unknown_major_is_none() {
        let service = MajorDirectoryService::new(Arc::new(FakeDirectory));
        assert!(service.find_major("Basket Weaving").await.unwrap().is_none());
    }
}
