//! Client-side engine of the org people portal's profile page: typed
//! bindings for the people API, the external major directory, and the
//! avatar capture/crop/compress/upload pipeline.
//!
//! The UI layer is expected to wire these services to its widgets; this
//! crate owns everything between a file-picker event and the PATCH that
//! makes an edit durable.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::dto::profile_dto::{ProfileViewDto, RoleEntryDto, UpdateProfileDto};
pub use application::errors::ApplicationError;
pub use application::services::avatar_pipeline_service::{
    AvatarPipelineService, AvatarUploadOutcome,
};
pub use application::services::avatar_session::AvatarEditSession;
pub use application::services::major_directory_service::MajorDirectoryService;
pub use application::services::profile_service::ProfileService;
pub use domain::errors::DomainError;
pub use domain::models::avatar::{
    AvatarPipelineState, CropRegion, LocalPreview, ProcessedAvatarBlob, RawImageFile, StorageKey,
    UploadTarget,
};
pub use domain::models::major::MajorListing;
pub use domain::models::team::{RoleEntry, TeamInformationBrief};
pub use domain::models::user::{ProfileUpdate, UserAttributeDefinition, UserInformationDetail};
pub use infrastructure::apis::http_major_directory_repository::HttpMajorDirectoryRepository;
pub use infrastructure::apis::http_object_storage_repository::HttpObjectStorageRepository;
pub use infrastructure::apis::http_people_repository::HttpPeopleRepository;
pub use infrastructure::config::PortalConfig;
pub use infrastructure::imaging::cropper::CropperAdapter;
