use crate::foundation::error::{DamascusError, DamascusResult};

/// Displayed size of a drawing surface, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Displayed width in layout (CSS) pixels.
    pub css_width: f64,
    /// Displayed height in layout (CSS) pixels.
    pub css_height: f64,
    /// Device pixels per layout pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Viewport with a device pixel ratio of 1.
    pub fn new(css_width: f64, css_height: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Same viewport at another device pixel ratio.
    pub fn with_dpr(self, device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            ..self
        }
    }

    /// Backing-store size in device pixels, or `None` when no surface can be allocated.
    pub fn device_size(self) -> Option<(u16, u16)> {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        let to_px = |css: f64| -> Option<u16> {
            let px = (css * dpr).round();
            if px.is_finite() && px >= 1.0 && px <= f64::from(u16::MAX) {
                Some(px as u16)
            } else {
                None
            }
        };
        Some((to_px(self.css_width)?, to_px(self.css_height)?))
    }
}

/// A rendered frame as RGBA8 pixels.
///
/// Preview frames are **premultiplied alpha**; the `premultiplied` flag keeps that explicit at
/// API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Device-pixel drawing target backed by a `vello_cpu` pixmap.
pub struct Surface {
    width: u16,
    height: u16,
    dpr: f64,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a surface for the viewport.
    pub fn acquire(viewport: Viewport) -> DamascusResult<Self> {
        let (width, height) = viewport.device_size().ok_or_else(|| {
            DamascusError::render(format!(
                "viewport {}x{} @{} has no drawable device size",
                viewport.css_width, viewport.css_height, viewport.device_pixel_ratio
            ))
        })?;
        Ok(Self {
            width,
            height,
            dpr: effective_dpr(viewport),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Re-read the viewport; reallocates only when the device size changed.
    ///
    /// Returns `Ok(true)` when the backing store was replaced.
    pub fn resize(&mut self, viewport: Viewport) -> DamascusResult<bool> {
        let (width, height) = viewport.device_size().ok_or_else(|| {
            DamascusError::render("resized viewport has no drawable device size")
        })?;
        self.dpr = effective_dpr(viewport);
        if width == self.width && height == self.height {
            return Ok(false);
        }
        *self = Self {
            width,
            height,
            dpr: self.dpr,
            pixmap: vello_cpu::Pixmap::new(width, height),
        };
        Ok(true)
    }

    /// Width in device pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Device pixel ratio the surface was sized with.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Record drawing commands with `f`, then rasterize them into the pixmap.
    pub fn draw(&mut self, f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        f(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Copy the current pixels out.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn effective_dpr(viewport: Viewport) -> f64 {
    if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 0.0 {
        viewport.device_pixel_ratio
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
