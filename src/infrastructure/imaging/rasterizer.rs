//! Renders a committed crop into a lossless intermediate blob at
//! exactly the crop's dimensions. Any failure here aborts the pipeline;
//! there is no fallback to the uncropped image.

use image::{DynamicImage, ImageFormat};

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::{CropRegion, RasterizedBlob, RawImageFile};

/// Decode the selected file into a pixel buffer.
pub fn decode(file: &RawImageFile) -> Result<DynamicImage, DomainError> {
    image::load_from_memory(&file.bytes)
        .map_err(|error| DomainError::StageFailed(format!("Failed to decode image: {error}")))
}

/// Copy the crop region into a fresh surface and serialize it as PNG.
pub fn rasterize(source: &DynamicImage, region: &CropRegion) -> Result<RasterizedBlob, DomainError> {
    if region.width == 0 || region.height == 0 {
        return Err(DomainError::StageFailed(
            "Crop region is empty".to_string(),
        ));
    }

    let in_bounds = region
        .x
        .checked_add(region.width)
        .is_some_and(|right| right <= source.width())
        && region
            .y
            .checked_add(region.height)
            .is_some_and(|bottom| bottom <= source.height());
    if !in_bounds {
        return Err(DomainError::StageFailed(format!(
            "Crop region {}x{}+{}+{} exceeds source {}x{}",
            region.width,
            region.height,
            region.x,
            region.y,
            source.width(),
            source.height()
        )));
    }

    let cropped = source.crop_imm(region.x, region.y, region.width, region.height);

    let mut png_bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut png_bytes);
    cropped
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|error| DomainError::StageFailed(format!("Failed to encode crop: {error}")))?;

    if png_bytes.is_empty() {
        return Err(DomainError::StageFailed(
            "Rasterizer produced an empty blob".to_string(),
        ));
    }

    Ok(RasterizedBlob {
        png_bytes,
        width: region.width,
        height: region.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }))
    }

    #[test]
    fn output_has_exactly_the_crop_dimensions() {
        let source = gradient(640, 480);
        let region = CropRegion {
            x: 100,
            y: 40,
            width: 300,
            height: 300,
        };

        let blob = rasterize(&source, &region).unwrap();
        assert_eq!((blob.width, blob.height), (300, 300));

        let decoded = image::load_from_memory(&blob.png_bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 300));
    }

    #[test]
    fn crop_pixels_come_from_the_offset() {
        let source = gradient(64, 64);
        let region = CropRegion {
            x: 10,
            y: 20,
            width: 4,
            height: 4,
        };

        let blob = rasterize(&source, &region).unwrap();
        let decoded = image::load_from_memory(&blob.png_bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([10, 20, 128, 255]));
    }

    #[test]
    fn out_of_bounds_crop_aborts() {
        let source = gradient(100, 100);
        let region = CropRegion {
            x: 60,
            y: 0,
            width: 50,
            height: 50,
        };
        assert!(rasterize(&source, &region).is_err());
    }

    #[test]
    fn empty_crop_aborts() {
        let source = gradient(100, 100);
        let region = CropRegion {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        };
        assert!(rasterize(&source, &region).is_err());
    }

    #[test]
    fn undecodable_bytes_abort() {
        let file = RawImageFile {
            file_name: "avatar.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47, 0, 0, 0, 0],
        };
        assert!(decode(&file).is_err());
    }
}
