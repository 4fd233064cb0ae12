//! Interactive square-crop selection. Tracks pan and zoom from pointer
//! events and keeps the pixel-space crop rectangle up to date; nothing
//! leaves this type until the user explicitly commits.

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::CropRegion;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;

/// Crop-region selection state over a loaded image. The aspect ratio is
/// fixed at 1:1.
#[derive(Debug, Clone)]
pub struct CropperAdapter {
    source_width: u32,
    source_height: u32,
    zoom: f32,
    /// Offset of the crop center from the image center, in source pixels.
    pan_x: f32,
    pan_y: f32,
    region: CropRegion,
}

impl CropperAdapter {
    pub fn new(source_width: u32, source_height: u32) -> Result<Self, DomainError> {
        if source_width == 0 || source_height == 0 {
            return Err(DomainError::InvalidData(
                "Cannot crop an empty image".to_string(),
            ));
        }

        let mut adapter = Self {
            source_width,
            source_height,
            zoom: MIN_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            region: CropRegion {
                x: 0,
                y: 0,
                width: source_width,
                height: source_height,
            },
        };
        adapter.recompute();
        Ok(adapter)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current pixel crop rectangle; recomputed after every interaction.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// Set the slider value, snapped to the 0.1 step and clamped at both
    /// ends of the 1.0–3.0 range.
    pub fn set_zoom(&mut self, zoom: f32) {
        let snapped = (zoom / ZOOM_STEP).round() * ZOOM_STEP;
        self.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
        self.recompute();
    }

    /// Drag the crop window by a pointer delta, in source pixels.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
        self.recompute();
    }

    /// Explicit "crop & upload" confirmation. Only this value feeds the
    /// rasterizer; opening the cropper alone never mutates anything.
    pub fn commit(&self) -> CropRegion {
        self.region
    }

    fn recompute(&mut self) {
        let min_dim = self.source_width.min(self.source_height) as f32;
        let side = (min_dim / self.zoom).round().max(1.0) as u32;
        let side = side.min(self.source_width).min(self.source_height);

        let half = side as f32 / 2.0;
        let center_x = self.source_width as f32 / 2.0 + self.pan_x;
        let center_y = self.source_height as f32 / 2.0 + self.pan_y;

        let max_x = (self.source_width - side) as f32;
        let max_y = (self.source_height - side) as f32;
        let x = (center_x - half).clamp(0.0, max_x);
        let y = (center_y - half).clamp(0.0, max_y);

        // Keep the pan within what the clamp allowed, so repeated drags
        // at an edge do not build up invisible offset.
        self.pan_x = x + half - self.source_width as f32 / 2.0;
        self.pan_y = y + half - self.source_height as f32 / 2.0;

        self.region = CropRegion {
            x: x.round() as u32,
            y: y.round() as u32,
            width: side,
            height: side,
        };
    }
}
