//! Orchestrates the avatar flow end to end: precondition checks,
//! rasterizing the committed crop, compression, then the two-phase
//! upload. Stages run strictly in order; a failure aborts everything
//! after it and surfaces one message for that stage.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::errors::ApplicationError;
use crate::domain::errors::DomainError;
use crate::domain::models::avatar::{
    AvatarPipelineState, CropRegion, LocalPreview, ProcessedAvatarBlob, RawImageFile, StorageKey,
};
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::domain::repositories::people_repository::PeopleRepository;
use crate::infrastructure::imaging::{compressor, rasterizer, signature};

/// Result of a completed run: the storage key to stage into the next
/// profile save, plus a preview derived from the compressed bytes so
/// the new picture shows before the save lands.
#[derive(Debug)]
pub struct AvatarUploadOutcome {
    pub key: StorageKey,
    pub preview: LocalPreview,
    pub blob: ProcessedAvatarBlob,
}

pub struct AvatarPipelineService {
    people_repository: Arc<dyn PeopleRepository>,
    storage_repository: Arc<dyn ObjectStorageRepository>,
}

impl AvatarPipelineService {
    pub fn new(
        people_repository: Arc<dyn PeopleRepository>,
        storage_repository: Arc<dyn ObjectStorageRepository>,
    ) -> Self {
        Self {
            people_repository,
            storage_repository,
        }
    }

    /// Precondition gate run when the file is first selected, before
    /// the cropper opens. Rejections here never start the pipeline.
    pub fn inspect(&self, file: &RawImageFile) -> Result<(), ApplicationError> {
        signature::check_file(file)?;
        Ok(())
    }

    /// Run the pipeline for a committed crop. The cancellation token is
    /// consulted before every stage, so tearing down the dialog aborts
    /// the run deterministically instead of wasting the remaining work.
    pub async fn crop_and_upload(
        &self,
        file: &RawImageFile,
        crop: CropRegion,
        cancel: &CancellationToken,
    ) -> Result<AvatarUploadOutcome, ApplicationError> {
        let session = Uuid::new_v4();
        let mut state = AvatarPipelineState::Idle;

        signature::check_file(file)?;
        advance(session, &mut state, AvatarPipelineState::SignatureChecked);
        advance(session, &mut state, AvatarPipelineState::Cropping);

        ensure_live(cancel, "before rasterizing")?;
        advance(session, &mut state, AvatarPipelineState::Rasterizing);
        let source = rasterizer::decode(file).map_err(|error| fail(session, &mut state, error))?;
        let rasterized = rasterizer::rasterize(&source, &crop)
            .map_err(|error| fail(session, &mut state, error))?;

        ensure_live(cancel, "before compressing")?;
        advance(session, &mut state, AvatarPipelineState::Compressing);
        let processed = compressor::compress(rasterized, cancel.child_token())
            .await
            .map_err(|error| fail(session, &mut state, error))?;

        ensure_live(cancel, "before requesting upload URL")?;
        advance(session, &mut state, AvatarPipelineState::RequestingUploadUrl);
        let file_name = upload_file_name();
        let target = self
            .people_repository
            .request_avatar_upload_url(&file_name, ProcessedAvatarBlob::CONTENT_TYPE)
            .await
            .map_err(|error| {
                fail(
                    session,
                    &mut state,
                    phase_error("Failed to get upload URL", error),
                )
            })?;

        ensure_live(cancel, "before uploading")?;
        advance(session, &mut state, AvatarPipelineState::Uploading);
        self.storage_repository
            .upload(
                &target,
                &file_name,
                ProcessedAvatarBlob::CONTENT_TYPE,
                processed.jpeg_bytes.clone(),
            )
            .await
            .map_err(|error| {
                fail(session, &mut state, phase_error("Failed to upload", error))
            })?;

        let key = StorageKey(target.key);
        advance(
            session,
            &mut state,
            AvatarPipelineState::Uploaded { key: key.clone() },
        );

        Ok(AvatarUploadOutcome {
            key,
            preview: processed.preview(),
            blob: processed,
        })
    }
}

/// Timestamped name for the uploaded object; the backend namespaces it
/// under the signed-in user.
fn upload_file_name() -> String {
    format!("{}.jpg", chrono::Utc::now().timestamp_millis())
}

fn advance(session: Uuid, state: &mut AvatarPipelineState, next: AvatarPipelineState) {
    tracing::debug!(session = %session, "Avatar pipeline {:?} -> {:?}", state, next);
    *state = next;
}

fn ensure_live(cancel: &CancellationToken, at: &str) -> Result<(), ApplicationError> {
    if cancel.is_cancelled() {
        return Err(ApplicationError::Cancelled(format!(
            "Avatar pipeline abandoned {at}"
        )));
    }
    Ok(())
}

fn fail(session: Uuid, state: &mut AvatarPipelineState, error: DomainError) -> ApplicationError {
    let stage = match state {
        AvatarPipelineState::Rasterizing => "rasterize",
        AvatarPipelineState::Compressing => "compress",
        AvatarPipelineState::RequestingUploadUrl => "request-upload-url",
        AvatarPipelineState::Uploading => "upload",
        _ => "pipeline",
    };
    tracing::warn!(session = %session, "Avatar pipeline failed at {}: {}", stage, error);
    *state = AvatarPipelineState::Failed {
        stage,
        message: error.to_string(),
    };
    ApplicationError::from(error)
}

fn phase_error(label: &str, error: DomainError) -> DomainError {
    match error {
        DomainError::Cancelled(message) => DomainError::Cancelled(message),
        other => DomainError::StageFailed(format!("{label}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::infrastructure::apis::http_object_storage_repository::HttpObjectStorageRepository;
    use crate::infrastructure::apis::http_people_repository::HttpPeopleRepository;
    use crate::infrastructure::config::PortalConfig;
    use crate::infrastructure::imaging::cropper::CropperAdapter;

    fn png_file(width: u32, height: u32) -> RawImageFile {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
        }));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        RawImageFile {
            file_name: "selected.png".to_string(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }

    fn service(backend: &MockServer) -> AvatarPipelineService {
        let config = PortalConfig::new(backend.uri());
        AvatarPipelineService::new(
            Arc::new(HttpPeopleRepository::new(&config).unwrap()),
            Arc::new(HttpObjectStorageRepository::new(&config).unwrap()),
        )
    }

    async fn mount_upload_url(backend: &MockServer, storage: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/org/people/avatar/self/upload-url"))
            .and(query_param("contentType", "image/jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "uploadUrl": format!("{}/bucket", storage.uri()),
                "key": "avatars/u-1/new",
                "fields": {"policy": "p"}
            })))
            .expect(1)
            .mount(backend)
            .await;
    }

    #[tokio::test]
    async fn happy_path_adopts_key_and_builds_preview() {
        let backend = MockServer::start().await;
        let storage = MockServer::start().await;
        mount_upload_url(&backend, &storage).await;
        Mock::given(method("POST"))
            .and(path("/bucket"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&storage)
            .await;

        let file = png_file(128, 96);
        let crop = CropperAdapter::new(128, 96).unwrap().commit();

        let outcome = service(&backend)
            .crop_and_upload(&file, crop, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.key, StorageKey("avatars/u-1/new".to_string()));
        let preview = image::load_from_memory(outcome.preview.bytes()).unwrap();
        assert_eq!((preview.width(), preview.height()), (96, 96));
    }

    #[tokio::test]
    async fn failed_upload_url_request_never_touches_storage() {
        let backend = MockServer::start().await;
        let storage = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/org/people/avatar/self/upload-url"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backend)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&storage)
            .await;

        let file = png_file(64, 64);
        let crop = CropRegion {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };

        let error = service(&backend)
            .crop_and_upload(&file, crop, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::PipelineFailed(ref message)
            if message.starts_with("Failed to get upload URL")));
        storage.verify().await;
    }

    #[tokio::test]
    async fn failed_storage_post_reports_upload_phase() {
        let backend = MockServer::start().await;
        let storage = MockServer::start().await;
        mount_upload_url(&backend, &storage).await;
        Mock::given(method("POST"))
            .and(path("/bucket"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&storage)
            .await;

        let file = png_file(64, 64);
        let crop = CropRegion {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };

        let error = service(&backend)
            .crop_and_upload(&file, crop, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::PipelineFailed(ref message)
            if message.starts_with("Failed to upload")));
    }

    #[tokio::test]
    async fn cancelled_run_stops_before_any_request() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let file = png_file(64, 64);
        let crop = CropRegion {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };

        let error = service(&backend)
            .crop_and_upload(&file, crop, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::Cancelled(_)));
        backend.verify().await;
    }

    #[tokio::test]
    async fn rejected_signature_never_starts_the_pipeline() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let file = RawImageFile {
            file_name: "fake.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x00, 0x00, 0x00, 0x00],
        };
        let crop = CropRegion {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };

        let error = service(&backend)
            .crop_and_upload(&file, crop, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::RejectedInput(_)));
        backend.verify().await;
    }

    #[tokio::test]
    async fn out_of_bounds_crop_fails_the_rasterize_stage() {
        let backend = MockServer::start().await;
        let file = png_file(32, 32);
        let crop = CropRegion {
            x: 20,
            y: 20,
            width: 32,
            height: 32,
        };

        let error = service(&backend)
            .crop_and_upload(&file, crop, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::PipelineFailed(_)));
    }
}
