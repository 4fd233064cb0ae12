use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freshly selected file: raw bytes plus the metadata the picker
/// declared. Read once, then consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct RawImageFile {
    pub file_name: String,
    /// MIME type as declared by the picker, not yet trusted.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl RawImageFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Committed crop bounds in source-pixel space. Produced by the cropper,
/// consumed immediately by the rasterizer, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Lossless intermediate produced by the rasterizer: PNG bytes at
/// exactly the crop's dimensions.
#[derive(Debug, Clone)]
pub struct RasterizedBlob {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Final compressed avatar plus a locally displayable preview.
#[derive(Debug, Clone)]
pub struct ProcessedAvatarBlob {
    pub jpeg_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ProcessedAvatarBlob {
    pub const CONTENT_TYPE: &'static str = "image/jpeg";

    /// Derive a preview from the compressed bytes, not the remote object,
    /// so the new picture can be shown before the profile save lands.
    pub fn preview(&self) -> LocalPreview {
        LocalPreview {
            id: Uuid::new_v4(),
            bytes: Arc::from(self.jpeg_bytes.as_slice()),
        }
    }
}

/// In-memory stand-in for an object URL. Must be revoked when replaced
/// or when the editing session ends so repeated edit attempts do not
/// accumulate buffers.
#[derive(Debug, Clone)]
pub struct LocalPreview {
    id: Uuid,
    bytes: Arc<[u8]>,
}

impl LocalPreview {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Release the underlying buffer. Consumes the handle so a revoked
    /// preview cannot be displayed again.
    pub fn revoke(self) {
        tracing::debug!(preview = %self.id, "Revoking local avatar preview");
    }
}

/// Opaque identifier handed back by object storage. Only adopted into
/// the user record after both upload phases return success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short-lived upload destination issued by the backend. `fields` are
/// opaque provider form fields and are forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    pub key: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// Explicit pipeline state, threaded through the stages instead of
/// scattered mutable fields. Phases are strictly sequential; no phase
/// begins before its predecessor succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarPipelineState {
    Idle,
    SignatureChecked,
    Cropping,
    Rasterizing,
    Compressing,
    RequestingUploadUrl,
    Uploading,
    Uploaded { key: StorageKey },
    Failed { stage: &'static str, message: String },
}

impl Default for AvatarPipelineState {
    fn default() -> Self {
        AvatarPipelineState::Idle
    }
}

impl AvatarPipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AvatarPipelineState::Uploaded { .. } | AvatarPipelineState::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_target_parses_wire_shape() {
        let body = serde_json::json!({
            "uploadUrl": "https://storage.example.org/bucket",
            "key": "avatars/u-1/abc",
            "fields": {"policy": "p", "x-amz-signature": "s"}
        });

        let target: UploadTarget = serde_json::from_value(body).unwrap();
        assert_eq!(target.upload_url, "https://storage.example.org/bucket");
        assert_eq!(target.key, "avatars/u-1/abc");
        assert_eq!(target.fields.len(), 2);
    }

    #[test]
    fn preview_copies_compressed_bytes() {
        let blob = ProcessedAvatarBlob {
            jpeg_bytes: vec![1, 2, 3],
            width: 1,
            height: 1,
        };
        let preview = blob.preview();
        assert_eq!(preview.bytes(), &[1, 2, 3]);
    }
}
