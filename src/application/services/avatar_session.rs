//! Owns the editing dialog's avatar state: the local preview, the
//! candidate storage key, and the pipeline state shown to the user.
//! Previews are revoked whenever they are replaced or the session ends,
//! so repeated edit attempts do not pile up buffers.

use crate::application::services::avatar_pipeline_service::AvatarUploadOutcome;
use crate::domain::models::avatar::{AvatarPipelineState, LocalPreview, StorageKey};

#[derive(Debug, Default)]
pub struct AvatarEditSession {
    state: AvatarPipelineState,
    preview: Option<LocalPreview>,
    candidate_key: Option<StorageKey>,
}

impl AvatarEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AvatarPipelineState {
        &self.state
    }

    pub fn preview(&self) -> Option<&LocalPreview> {
        self.preview.as_ref()
    }

    /// Key to stage into the next profile save. Unset until an upload
    /// run completes, so a save can never persist an unuploaded
    /// reference.
    pub fn candidate_key(&self) -> Option<&StorageKey> {
        self.candidate_key.as_ref()
    }

    /// Adopt a completed run: show the new preview immediately and hold
    /// the key for the save transaction. A previously shown preview is
    /// revoked before being replaced.
    pub fn adopt(&mut self, outcome: AvatarUploadOutcome) {
        if let Some(previous) = self.preview.take() {
            previous.revoke();
        }
        self.state = AvatarPipelineState::Uploaded {
            key: outcome.key.clone(),
        };
        self.preview = Some(outcome.preview);
        self.candidate_key = Some(outcome.key);
    }

    /// Record a failed run. The previously displayed avatar and any
    /// earlier candidate are left untouched; only the dialog state
    /// changes so the user can retry.
    pub fn record_failure(&mut self, stage: &'static str, message: impl Into<String>) {
        self.state = AvatarPipelineState::Failed {
            stage,
            message: message.into(),
        };
    }

    /// Reset the dialog for another attempt without dropping what is
    /// already uploaded.
    pub fn reopen(&mut self) {
        self.state = AvatarPipelineState::Idle;
    }

    /// End the editing session, releasing the preview.
    pub fn close(mut self) {
        if let Some(preview) = self.preview.take() {
            preview.revoke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::avatar::ProcessedAvatarBlob;

    fn outcome(key: &str, byte: u8) -> AvatarUploadOutcome {
        let blob = ProcessedAvatarBlob {
            jpeg_bytes: vec![byte; 8],
            width: 2,
            height: 2,
        };
        AvatarUploadOutcome {
            key: StorageKey(key.to_string()),
            preview: blob.preview(),
            blob,
        }
    }

    #[test]
    fn fresh_session_has_no_candidate() {
        let session = AvatarEditSession::new();
        assert_eq!(session.state(), &AvatarPipelineState::Idle);
        assert!(session.candidate_key().is_none());
        assert!(session.preview().is_none());
    }

    #[test]
    fn adopt_sets_candidate_and_preview() {
        let mut session = AvatarEditSession::new();
        session.adopt(outcome("avatars/u-1/new", 7));

        assert_eq!(
            session.candidate_key(),
            Some(&StorageKey("avatars/u-1/new".to_string()))
        );
        assert_eq!(session.preview().unwrap().bytes(), &[7u8; 8][..]);
        assert!(session.state().is_terminal());
    }

    #[test]
    fn adopt_replaces_the_previous_preview() {
        let mut session = AvatarEditSession::new();
        session.adopt(outcome("first", 1));
        let first_id = session.preview().unwrap().id();

        session.adopt(outcome("second", 2));
        assert_ne!(session.preview().unwrap().id(), first_id);
        assert_eq!(session.preview().unwrap().bytes(), &[2u8; 8][..]);
        assert_eq!(
            session.candidate_key(),
            Some(&StorageKey("second".to_string()))
        );
    }

    #[test]
    fn failure_leaves_prior_display_state_alone() {
        let mut session = AvatarEditSession::new();
        session.adopt(outcome("kept", 3));
        session.record_failure("upload", "Failed to upload");

        assert!(matches!(
            session.state(),
            AvatarPipelineState::Failed { stage: "upload", .. }
        ));
        assert_eq!(
            session.candidate_key(),
            Some(&StorageKey("kept".to_string()))
        );
        assert!(session.preview().is_some());
    }

    #[test]
    fn failure_without_upload_sets_no_candidate() {
        let mut session = AvatarEditSession::new();
        session.record_failure("request-upload-url", "Failed to get upload URL");
        assert!(session.candidate_key().is_none());
    }

    #[test]
    fn reopen_returns_to_idle() {
        let mut session = AvatarEditSession::new();
        session.record_failure("compress", "boom");
        session.reopen();
        assert_eq!(session.state(), &AvatarPipelineState::Idle);
    }
}
