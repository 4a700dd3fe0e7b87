use rayon::prelude::*;

use crate::catalog::material::Material;
use crate::foundation::core::{Canvas, Rgba8};
use crate::pattern::ops::Operation;
use crate::pattern::raster::PatternRaster;
use crate::pattern::warp::{WarpCoord, apply_all, layer_index, wrap_unit};

/// Fill color used when the stack is empty.
pub const BACKGROUND: Rgba8 = Rgba8::new(18, 18, 22, 255);

/// Synthesizer tuning. Does not affect output bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthOpts {
    /// Rasters with at least this many pixels are synthesized row-parallel.
    /// `usize::MAX` disables parallelism.
    pub parallel_min_pixels: usize,
}

impl Default for SynthOpts {
    fn default() -> Self {
        Self {
            parallel_min_pixels: 256 * 256,
        }
    }
}

impl SynthOpts {
    /// Defaults, overridden by `DAMASCUS_SYNTH_PARALLEL_MIN_PIXELS` when set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = std::env::var("DAMASCUS_SYNTH_PARALLEL_MIN_PIXELS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            opts.parallel_min_pixels = n;
        }
        opts
    }
}

/// Synthesize the pattern raster for a material stack and operation sequence.
///
/// Deterministic and total: any stack (including empty) and any operation list are accepted.
/// Cost is `O(width * height * ops.len())`.
pub fn synthesize(stack: &[Material], ops: &[Operation], width: u32, height: u32) -> PatternRaster {
    synthesize_with(stack, ops, width, height, &SynthOpts::default())
}

/// [`synthesize`] with explicit options.
#[tracing::instrument(skip(stack, ops, opts), fields(layers = stack.len(), ops = ops.len()))]
pub fn synthesize_with(
    stack: &[Material],
    ops: &[Operation],
    width: u32,
    height: u32,
    opts: &SynthOpts,
) -> PatternRaster {
    let canvas = Canvas { width, height };
    if stack.is_empty() || canvas.is_empty() {
        return PatternRaster::filled(canvas, BACKGROUND);
    }

    let palette: Vec<u8> = stack.iter().map(|m| m.etch_byte()).collect();
    let row_bytes = width as usize * 4;
    let mut data = vec![0u8; canvas.pixel_count() * 4];

    let row = |(y, out): (usize, &mut [u8])| {
        fill_row(out, y as u32, canvas, &palette, ops);
    };
    if canvas.pixel_count() >= opts.parallel_min_pixels {
        data.par_chunks_exact_mut(row_bytes).enumerate().for_each(row);
    } else {
        data.chunks_exact_mut(row_bytes).enumerate().for_each(row);
    }

    PatternRaster::from_parts(canvas, data)
}

fn fill_row(out: &mut [u8], y: u32, canvas: Canvas, palette: &[u8], ops: &[Operation]) {
    let v = f64::from(y) / f64::from(canvas.height);
    for (x, px) in out.chunks_exact_mut(4).enumerate() {
        let u = x as f64 / f64::from(canvas.width);
        let c = apply_all(ops, WarpCoord::new(u, v), palette.len());
        let g = palette[layer_index(wrap_unit(c.v), palette.len())];
        px.copy_from_slice(&Rgba8::opaque_gray(g).to_array());
    }
}

/// Stack index sampled at unit coordinates `(u, v)` after all operations, or `None` for an
/// empty stack.
pub fn layer_index_at(stack_len: usize, ops: &[Operation], u: f64, v: f64) -> Option<usize> {
    if stack_len == 0 {
        return None;
    }
    let c = apply_all(ops, WarpCoord::new(u, v), stack_len);
    Some(layer_index(wrap_unit(c.v), stack_len))
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/synth.rs"]
mod tests;
