//! Animated block view: the pattern mapped onto the front face of a billet.

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::pattern::synth::BACKGROUND;
use crate::render::frame_loop::{FrameInfo, SceneView};
use crate::render::paint;

const TOP_LIGHT: Rgba8 = Rgba8::new(168, 170, 178, 255);
const TOP_DARK: Rgba8 = Rgba8::new(74, 76, 84, 255);
const FALLBACK_FACE: Rgba8 = Rgba8::new(112, 112, 120, 255);
const OUTLINE: Rgba8 = Rgba8::new(8, 8, 10, 210);

/// Block view tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockViewOpts {
    /// Horizontal slices the front face is cut into.
    pub slices: u32,
    /// Phase advance per frame, in radians.
    pub phase_step: f64,
}

impl Default for BlockViewOpts {
    fn default() -> Self {
        Self {
            slices: 120,
            phase_step: 0.01,
        }
    }
}

impl BlockViewOpts {
    /// Defaults, with `DAMASCUS_BLOCK_SLICES` overriding the slice count when set and positive.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = std::env::var("DAMASCUS_BLOCK_SLICES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.slices = n;
        }
        opts
    }
}

/// Block layout for one frame, in device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGeometry {
    /// Front face, where the pattern is mapped.
    pub front: Rect,
    /// Top face parallelogram: front-left, front-right, back-right, back-left.
    pub top: [Point; 4],
    /// Drop shadow below the front face.
    pub shadow: [Point; 4],
}

impl BlockGeometry {
    /// Lay the block out on a `width` x `height` surface. `skew` in `[0, 1]` slides the back
    /// edge of the top face left or right; `0.5` is centred.
    pub fn new(width: f64, height: f64, skew: f64) -> Self {
        let body_w = width * 0.62;
        let x0 = (width - body_w) / 2.0;
        let x1 = x0 + body_w;
        let y0 = height * 0.40;
        let y1 = height * 0.80;
        let depth = height * 0.18;
        let skew_px = (skew.clamp(0.0, 1.0) - 0.5) * 2.0 * width * 0.10;

        let shadow_drop = height * 0.06;
        let shadow_dx = skew_px * 0.5;

        Self {
            front: Rect::new(x0, y0, x1, y1),
            top: [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1 + skew_px, y0 - depth),
                Point::new(x0 + skew_px, y0 - depth),
            ],
            shadow: [
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1 + shadow_dx, y1 + shadow_drop),
                Point::new(x0 + shadow_dx, y1 + shadow_drop),
            ],
        }
    }

    /// Destination of slice `i` of `n` on the front face.
    ///
    /// Edges are snapped to whole device pixels so neighbouring slices share an exact seam. A
    /// slice thinner than a pixel can snap to zero height and is then skipped by the view.
    pub fn slice_dest(&self, i: u32, n: u32) -> Rect {
        let n = f64::from(n.max(1));
        let h = self.front.height();
        let y0 = (self.front.y0 + f64::from(i) / n * h).round();
        let y1 = (self.front.y0 + f64::from(i + 1) / n * h).round();
        Rect::new(self.front.x0, y0, self.front.x1, y1)
    }
}

/// Source band of slice `i` of `n` in a raster of the given size.
pub fn slice_source(raster_width: f64, raster_height: f64, i: u32, n: u32) -> Rect {
    let n = f64::from(n.max(1));
    let t0 = f64::from(i) / n;
    let sy = (t0 * raster_height).floor();
    let sh = (raster_height / n).max(1.0);
    Rect::new(0.0, sy, raster_width, sy + sh)
}

/// The block view's animation state.
#[derive(Clone, Debug)]
pub struct BlockView {
    opts: BlockViewOpts,
    phase: f64,
}

impl BlockView {
    pub fn new(opts: BlockViewOpts) -> Self {
        Self { opts, phase: 0.0 }
    }

    pub fn opts(&self) -> &BlockViewOpts {
        &self.opts
    }

    /// Accumulated phase in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current top-face skew in `[0, 1]`.
    pub fn skew(&self) -> f64 {
        self.phase.sin() * 0.5 + 0.5
    }
}

impl Default for BlockView {
    fn default() -> Self {
        Self::new(BlockViewOpts::default())
    }
}

impl SceneView for BlockView {
    fn draw_frame(&mut self, ctx: &mut vello_cpu::RenderContext, frame: FrameInfo<'_>) {
        paint::clear(ctx, frame.width, frame.height, BACKGROUND);

        self.phase += self.opts.phase_step;
        let geom = BlockGeometry::new(frame.width, frame.height, self.skew());

        paint::fill_solid(
            ctx,
            &paint::polygon(&geom.shadow),
            Rgba8::with_alpha_f(0, 0, 0, 0.35),
        );

        let top = paint::polygon(&geom.top);
        paint::fill_linear(ctx, &top, geom.top[3], geom.top[0], [TOP_LIGHT, TOP_DARK]);

        let front = paint::polygon(&rect_corners(geom.front));
        match frame.raster {
            Some(raster) => {
                let n = self.opts.slices.max(1);
                for i in 0..n {
                    let src = slice_source(raster.width(), raster.height(), i, n);
                    let dst = geom.slice_dest(i, n);
                    if dst.height() <= 0.0 {
                        continue;
                    }
                    paint::blit_band(ctx, raster, src, dst, &paint::polygon(&rect_corners(dst)));
                }
            }
            None => paint::fill_solid(ctx, &front, FALLBACK_FACE),
        }

        let stroke_w = 1.5 * frame.dpr;
        paint::stroke(ctx, &top, OUTLINE, stroke_w);
        paint::stroke(ctx, &front, OUTLINE, stroke_w);
    }
}

fn rect_corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/block.rs"]
mod tests;
