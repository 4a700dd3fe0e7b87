//! Static blade view: the pattern mapped along a clip-point blade profile.

use std::f64::consts::PI;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::math::lerp;
use crate::pattern::synth::BACKGROUND;
use crate::pattern::warp::wrap_unit;
use crate::render::frame_loop::{DisplayHost, FrameInfo, FrameLoop, SceneView};
use crate::render::paint;

const SHEEN: [Rgba8; 2] = [Rgba8::new(255, 255, 255, 15), Rgba8::new(0, 0, 0, 89)];
const FALLBACK_STEEL: Rgba8 = Rgba8::new(120, 122, 130, 255);
const OUTLINE: Rgba8 = Rgba8::new(8, 8, 10, 220);

const SLICE_OVERLAP: f64 = 0.5;
const SPINE_SAMPLES: usize = 24;
const EDGE_SAMPLES: usize = 48;

/// Blade view tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeViewOpts {
    /// Vertical slices along the blade.
    pub slices: u32,
    /// Fraction of the blade length taken by the clip point.
    pub clip_len: f64,
}

impl Default for BladeViewOpts {
    fn default() -> Self {
        Self {
            slices: 320,
            clip_len: 0.20,
        }
    }
}

impl BladeViewOpts {
    /// Defaults, with `DAMASCUS_BLADE_SLICES` overriding the slice count when set and positive.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = std::env::var("DAMASCUS_BLADE_SLICES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.slices = n;
        }
        opts
    }
}

/// Blade profile on a surface, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeGeometry {
    pub heel: f64,
    pub tip: f64,
    pub spine_base: f64,
    pub edge_base: f64,
    /// x where the spine starts dropping toward the tip.
    pub clip_start: f64,
    /// y of the tip point, midway between spine and edge.
    pub tip_y: f64,
    /// Peak rise of the edge at mid-length.
    pub belly: f64,
}

impl BladeGeometry {
    pub fn new(width: f64, height: f64, clip_len: f64) -> Self {
        let heel = width * 0.08;
        let tip = width * 0.94;
        let spine_base = height * 0.34;
        let edge_base = height * 0.70;
        let len = tip - heel;
        Self {
            heel,
            tip,
            spine_base,
            edge_base,
            clip_start: tip - len * clip_len.clamp(0.0, 1.0),
            tip_y: (spine_base + edge_base) / 2.0,
            belly: (edge_base - spine_base) * 0.10,
        }
    }

    pub fn length(&self) -> f64 {
        self.tip - self.heel
    }

    /// x at normalized position `t` along the blade.
    pub fn x_at(&self, t: f64) -> f64 {
        lerp(self.heel, self.tip, t.clamp(0.0, 1.0))
    }

    /// Spine height at `x`: flat, then a quadratic drop to the tip over the clip.
    pub fn spine_y(&self, x: f64) -> f64 {
        if x <= self.clip_start {
            return self.spine_base;
        }
        let span = (self.tip - self.clip_start).max(f64::EPSILON);
        let k = ((x - self.clip_start) / span).clamp(0.0, 1.0);
        lerp(self.spine_base, self.tip_y, k * k)
    }

    /// Edge height at `x`: the base edge minus a sine belly peaking at mid-length.
    pub fn edge_y(&self, x: f64) -> f64 {
        let t = ((x - self.heel) / self.length().max(f64::EPSILON)).clamp(0.0, 1.0);
        self.edge_base - (PI * t).sin() * self.belly
    }

    /// Closed outline: heel spine, along the spine through the clip to the tip, straight back to
    /// the edge at the clip start, then along the edge to the heel.
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((self.heel, self.spine_base));
        path.line_to((self.clip_start, self.spine_base));
        for s in 1..=SPINE_SAMPLES {
            let x = lerp(self.clip_start, self.tip, s as f64 / SPINE_SAMPLES as f64);
            path.line_to((x, self.spine_y(x)));
        }
        path.line_to((self.clip_start, self.edge_y(self.clip_start)));
        for s in 1..=EDGE_SAMPLES {
            let x = lerp(self.clip_start, self.heel, s as f64 / EDGE_SAMPLES as f64);
            path.line_to((x, self.edge_y(x)));
        }
        path.close_path();
        path
    }

    /// Slice `i` of `n`: the quad bounded by spine and edge at its two ends.
    pub fn slice_quad(&self, i: u32, n: u32) -> [Point; 4] {
        let n = f64::from(n.max(1));
        let xa = self.x_at(f64::from(i) / n);
        let xb = (self.x_at(f64::from(i + 1) / n) + SLICE_OVERLAP).min(self.tip);
        [
            Point::new(xa, self.spine_y(xa)),
            Point::new(xb, self.spine_y(xb)),
            Point::new(xb, self.edge_y(xb)),
            Point::new(xa, self.edge_y(xa)),
        ]
    }

    /// Band slice `i` of `n` is stretched to: its own highest spine down to its own lowest edge.
    pub fn slice_dest(&self, i: u32, n: u32) -> Rect {
        let q = self.slice_quad(i, n);
        Rect::new(q[0].x, q[0].y.min(q[1].y), q[1].x, q[2].y.max(q[3].y))
    }
}

/// Source column of slice `i` of `n`, scrolled by `u_offset`.
pub fn slice_source(raster_width: f64, raster_height: f64, u_offset: f64, i: u32, n: u32) -> Rect {
    let n = f64::from(n.max(1));
    let t0 = f64::from(i) / n;
    let sx = (wrap_unit(u_offset + t0) * raster_width).floor();
    let sw = raster_width / n;
    Rect::new(sx, 0.0, sx + sw, raster_height)
}

/// The blade view's state.
#[derive(Clone, Debug, Default)]
pub struct BladeView {
    opts: BladeViewOpts,
    u_offset: f64,
}

impl BladeView {
    pub fn new(opts: BladeViewOpts) -> Self {
        Self { opts, u_offset: 0.0 }
    }

    pub fn with_u_offset(mut self, u_offset: f64) -> Self {
        self.u_offset = u_offset;
        self
    }

    pub fn opts(&self) -> &BladeViewOpts {
        &self.opts
    }

    /// Horizontal scroll of the pattern along the blade, in pattern widths.
    pub fn u_offset(&self) -> f64 {
        self.u_offset
    }
}

impl SceneView for BladeView {
    fn draw_frame(&mut self, ctx: &mut vello_cpu::RenderContext, frame: FrameInfo<'_>) {
        paint::clear(ctx, frame.width, frame.height, BACKGROUND);

        let geom = BladeGeometry::new(frame.width, frame.height, self.opts.clip_len);
        let outline = geom.outline();

        match frame.raster {
            Some(raster) => {
                paint::push_clip(ctx, &outline);
                let n = self.opts.slices.max(1);
                for i in 0..n {
                    let quad = geom.slice_quad(i, n);
                    let clip = paint::polygon(&quad);
                    let src = slice_source(raster.width(), raster.height(), self.u_offset, i, n);
                    let dst = geom.slice_dest(i, n);
                    paint::blit_band(ctx, raster, src, dst, &clip);
                    paint::fill_linear(
                        ctx,
                        &clip,
                        Point::new(dst.x0, dst.y0),
                        Point::new(dst.x0, dst.y1),
                        SHEEN,
                    );
                }
                ctx.pop_layer();
            }
            None => {
                paint::fill_solid(ctx, &outline, FALLBACK_STEEL);
                paint::fill_linear(
                    ctx,
                    &outline,
                    Point::new(geom.heel, geom.spine_base.min(geom.tip_y)),
                    Point::new(geom.heel, geom.edge_base),
                    SHEEN,
                );
            }
        }

        paint::stroke(ctx, &outline, OUTLINE, 1.5 * frame.dpr);
    }
}

impl FrameLoop<BladeView> {
    /// Scroll the pattern along the blade and restart the loop. No-op when unchanged.
    pub fn set_u_offset(&mut self, u_offset: f64, host: &mut impl DisplayHost) {
        if self.view().u_offset.to_bits() == u_offset.to_bits() {
            return;
        }
        self.view_mut().u_offset = u_offset;
        self.restart(host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blade.rs"]
mod tests;
