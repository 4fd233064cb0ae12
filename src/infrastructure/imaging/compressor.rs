//! Shrinks the rasterized crop into the final avatar: JPEG at fixed
//! quality, longer edge capped, byte count under a hard ceiling. The
//! work runs on a blocking worker so the interactive thread stays free.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::{ProcessedAvatarBlob, RasterizedBlob};

/// 0.45 MB ceiling on the final avatar.
pub const MAX_COMPRESSED_BYTES: usize = 450_000;
/// Longer-edge cap. Smaller inputs are never upscaled.
pub const MAX_EDGE_PX: u32 = 512;
pub const JPEG_QUALITY: u8 = 80;

/// Compress off the calling task. Cancellation is honored between
/// encode attempts; the result of abandoned work is discarded.
pub async fn compress(
    blob: RasterizedBlob,
    cancel: CancellationToken,
) -> Result<ProcessedAvatarBlob, DomainError> {
    if cancel.is_cancelled() {
        return Err(DomainError::Cancelled("Compression skipped".to_string()));
    }

    tokio::task::spawn_blocking(move || compress_sync(&blob, &cancel))
        .await
        .map_err(|error| {
            DomainError::StageFailed(format!("Compression worker failed: {error}"))
        })?
}

fn compress_sync(
    blob: &RasterizedBlob,
    cancel: &CancellationToken,
) -> Result<ProcessedAvatarBlob, DomainError> {
    let decoded = image::load_from_memory(&blob.png_bytes).map_err(|error| {
        DomainError::StageFailed(format!("Failed to reload rasterized blob: {error}"))
    })?;

    let mut current = cap_longer_edge(decoded);
    loop {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled("Compression abandoned".to_string()));
        }

        let jpeg_bytes = encode_jpeg(&current)?;
        if jpeg_bytes.len() <= MAX_COMPRESSED_BYTES || current.width().min(current.height()) <= 16 {
            return Ok(ProcessedAvatarBlob {
                width: current.width(),
                height: current.height(),
                jpeg_bytes,
            });
        }

        // Still over the ceiling at fixed quality: step the dimensions
        // down and try again.
        let next_width = (current.width() as f32 * 0.85).max(1.0) as u32;
        let next_height = (current.height() as f32 * 0.85).max(1.0) as u32;
        current = current.resize_exact(next_width, next_height, FilterType::Lanczos3);
    }
}

fn cap_longer_edge(image: DynamicImage) -> DynamicImage {
    if image.width().max(image.height()) <= MAX_EDGE_PX {
        return image;
    }
    image.resize(MAX_EDGE_PX, MAX_EDGE_PX, FilterType::Lanczos3)
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, DomainError> {
    // JPEG has no alpha channel; flatten first.
    let rgb = image.to_rgb8();
    let mut jpeg_bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_bytes, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|error| DomainError::StageFailed(format!("Failed to encode JPEG: {error}")))?;

    if jpeg_bytes.is_empty() {
        return Err(DomainError::StageFailed(
            "Compressor produced an empty blob".to_string(),
        ));
    }
    Ok(jpeg_bytes)
}
