//! File preconditions for the avatar pipeline. The declared MIME type
//! is a fast reject; the byte signature is the authoritative gate. Both
//! must pass, and oversized files are rejected outright.

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::RawImageFile;

/// Hard ceiling on selected files: 20 MiB.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Magic-number prefixes, rendered as lowercase hex of the first bytes.
/// JPEG only pins three bytes; the fourth varies by flavor.
const KNOWN_SIGNATURES: [&str; 4] = [
    "89504e47", // PNG
    "ffd8ff",   // JPEG
    "47494638", // GIF
    "52494646", // RIFF container (WebP)
];

/// Check every precondition for a freshly selected file. Any failure
/// maps to `RejectedInput` with a message fit for direct display.
pub fn check_file(file: &RawImageFile) -> Result<(), DomainError> {
    if file.len() > MAX_UPLOAD_BYTES {
        return Err(DomainError::RejectedInput(
            "That file is too large; the limit is 20 MB".to_string(),
        ));
    }

    let declared = declared_content_type(file);
    if !ALLOWED_CONTENT_TYPES.contains(&declared.as_str()) {
        return Err(DomainError::RejectedInput(
            "Please choose a JPEG, PNG, WebP, or GIF image".to_string(),
        ));
    }

    if !matches_known_signature(&file.bytes) {
        return Err(DomainError::RejectedInput(
            "That file does not look like a valid image".to_string(),
        ));
    }

    Ok(())
}

/// True when the first 4 bytes match a known raster-image signature.
pub fn matches_known_signature(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    let header = signature_hex(&bytes[..4]);
    KNOWN_SIGNATURES
        .iter()
        .any(|signature| header.starts_with(signature))
}

fn signature_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Declared type from the picker, falling back to a guess from the file
/// name when the picker left it blank.
fn declared_content_type(file: &RawImageFile) -> String {
    let declared = file.content_type.trim().to_lowercase();
    if !declared.is_empty() {
        return declared;
    }
    mime_guess::from_path(&file.file_name)
        .first_raw()
        .unwrap_or_default()
        .to_lowercase()
}
