use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{DamascusError, DamascusResult};

/// Synthesized pattern image: straight RGBA8, tightly packed, row-major, always opaque.
///
/// Immutable once built. Cloning shares the pixel buffer, so renderers can hold the same
/// raster without copying or locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternRaster {
    canvas: Canvas,
    data: Arc<[u8]>,
}

impl PatternRaster {
    pub(crate) fn from_parts(canvas: Canvas, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), canvas.pixel_count() * 4);
        Self {
            canvas,
            data: data.into(),
        }
    }

    /// A raster filled with a single color.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let rgba = color.to_array();
        let mut data = vec![0u8; canvas.pixel_count() * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self::from_parts(canvas, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of one pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// `true` when both values share one pixel buffer.
    pub fn ptr_eq(&self, other: &PatternRaster) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> DamascusResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, self.data.to_vec())
            .ok_or_else(|| DamascusError::render("pattern raster byte length mismatch"))
    }

    /// Write the raster as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> DamascusResult<()> {
        crate::encode::ensure_parent_dir(path)?;
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/raster.rs"]
mod tests;
