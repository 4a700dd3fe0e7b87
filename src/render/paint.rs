use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::pattern::raster::PatternRaster;

/// A pattern raster prepared as a `vello_cpu` image paint.
#[derive(Clone)]
pub struct RasterPaint {
    raster: PatternRaster,
    image: vello_cpu::Image,
}

impl RasterPaint {
    /// Convert a raster into an image paint. Fails when it exceeds `u16` dimensions or is empty.
    pub fn new(raster: PatternRaster) -> DamascusResult<Self> {
        let w: u16 = raster
            .width()
            .try_into()
            .map_err(|_| DamascusError::render("pattern raster width exceeds u16"))?;
        let h: u16 = raster
            .height()
            .try_into()
            .map_err(|_| DamascusError::render("pattern raster height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(DamascusError::render("pattern raster is empty"));
        }

        // Raster pixels are opaque, so straight and premultiplied bytes coincide.
        let pixels = raster
            .data()
            .chunks_exact(4)
            .map(|px| vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            })
            .collect();
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, false);
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        Ok(Self { raster, image })
    }

    /// The source raster.
    pub fn raster(&self) -> &PatternRaster {
        &self.raster
    }

    /// Source width in pixels.
    pub fn width(&self) -> f64 {
        f64::from(self.raster.width())
    }

    /// Source height in pixels.
    pub fn height(&self) -> f64 {
        f64::from(self.raster.height())
    }
}

/// Affine mapping the `src` rectangle of an image onto `dst`.
pub(crate) fn band_transform(src: Rect, dst: Rect) -> Affine {
    let sx = dst.width() / src.width().max(f64::EPSILON);
    let sy = dst.height() / src.height().max(f64::EPSILON);
    Affine::translate((dst.x0, dst.y0))
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate((-src.x0, -src.y0))
}

/// Blit the `src` band of the raster stretched into `dst`, clipped to `clip`.
pub(crate) fn blit_band(
    ctx: &mut vello_cpu::RenderContext,
    paint: &RasterPaint,
    src: Rect,
    dst: Rect,
    clip: &BezPath,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(affine_to_cpu(band_transform(src, dst)));
    ctx.set_paint(paint.image.clone());
    ctx.fill_path(&bezpath_to_cpu(clip));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

pub(crate) fn fill_solid(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_path(&bezpath_to_cpu(path));
}

/// Fill `path` with a two-stop linear gradient running from `start` to `end`.
pub(crate) fn fill_linear(
    ctx: &mut vello_cpu::RenderContext,
    path: &BezPath,
    start: Point,
    end: Point,
    stops: [Rgba8; 2],
) {
    let gradient = vello_cpu::peniko::Gradient::new_linear(point_to_cpu(start), point_to_cpu(end))
        .with_stops([color_to_cpu(stops[0]), color_to_cpu(stops[1])]);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(gradient);
    ctx.fill_path(&bezpath_to_cpu(path));
}

pub(crate) fn stroke(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8, width: f64) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
    ctx.set_paint(color_to_cpu(color));
    ctx.stroke_path(&bezpath_to_cpu(path));
}

pub(crate) fn clear(ctx: &mut vello_cpu::RenderContext, width: f64, height: f64, color: Rgba8) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, width, height));
}

pub(crate) fn push_clip(ctx: &mut vello_cpu::RenderContext, path: &BezPath) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.push_clip_layer(&bezpath_to_cpu(path));
}

/// Closed polygon through `points`.
pub(crate) fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
