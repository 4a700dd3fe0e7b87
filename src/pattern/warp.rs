use crate::foundation::math::sin_turns;
use crate::pattern::ops::Operation;

/// Working billet coordinates: `u` along the bar, `v` across the stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WarpCoord {
    pub(crate) u: f64,
    pub(crate) v: f64,
}

impl WarpCoord {
    pub(crate) fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

const LADDER_AMPLITUDE: f64 = 0.25;
const RAINDROP_AMPLITUDE: f64 = 0.15;
const WFOLD_AMPLITUDE: f64 = 0.5;
const TWIST_AMPLITUDE: f64 = 0.5;

/// Apply one operation to the working coordinates.
///
/// `layer_count` is the stack length; only `Twist` reads it.
pub(crate) fn apply(op: &Operation, c: WarpCoord, layer_count: usize) -> WarpCoord {
    match *op {
        Operation::AddSheets { .. } => c,
        Operation::Twist { turns } => twist(c, turns, layer_count),
        Operation::Ladder { spacing, depth } => ladder(c, spacing, depth),
        Operation::Raindrops { radius, spacing } => raindrops(c, radius, spacing),
        Operation::WFolds { folds } => wfolds(c, folds),
        Operation::Fold { times } => fold(c, times),
        Operation::Stretch { factor } => stretch(c, factor),
    }
}

/// Apply a whole sequence in order.
pub(crate) fn apply_all(ops: &[Operation], mut c: WarpCoord, layer_count: usize) -> WarpCoord {
    for op in ops {
        c = apply(op, c, layer_count);
    }
    c
}

fn twist(c: WarpCoord, turns: f64, layer_count: usize) -> WarpCoord {
    // More layers → finer banding → smaller visible wobble.
    let layers = layer_count.max(1) as f64;
    WarpCoord {
        u: c.u,
        v: c.v + sin_turns(c.u * turns) * TWIST_AMPLITUDE / layers,
    }
}

fn ladder(c: WarpCoord, spacing: f64, depth: f64) -> WarpCoord {
    let t = (c.u / spacing) % 1.0;
    let tri = 1.0 - (0.5 - t).abs() * 2.0;
    WarpCoord {
        u: c.u,
        v: c.v - tri * LADDER_AMPLITUDE * depth,
    }
}

fn raindrops(c: WarpCoord, radius: f64, spacing: f64) -> WarpCoord {
    let cx = ((c.u / spacing).floor() + 0.5) * spacing;
    let cy = ((c.v / spacing).floor() + 0.5) * spacing;
    let d = (c.u - cx).hypot(c.v - cy);
    let influence = (1.0 - d / radius).max(0.0);
    WarpCoord {
        u: c.u,
        v: c.v - influence * RAINDROP_AMPLITUDE,
    }
}

fn wfolds(c: WarpCoord, folds: u32) -> WarpCoord {
    let saw = ((c.u * f64::from(folds)) % 1.0) - 0.5;
    WarpCoord {
        u: c.u,
        v: (c.v + saw * WFOLD_AMPLITUDE).abs(),
    }
}

fn fold(c: WarpCoord, times: u32) -> WarpCoord {
    // Saturates to +inf for absurd counts; the wrap maps that to layer 0.
    let mult = 2f64.powi(times.min(i32::MAX as u32) as i32);
    WarpCoord {
        u: c.u,
        v: c.v * mult,
    }
}

fn stretch(c: WarpCoord, factor: f64) -> WarpCoord {
    WarpCoord {
        u: c.u * factor,
        v: c.v,
    }
}

/// Wrap into `[0, 1)`. Non-finite input maps to `0`.
pub(crate) fn wrap_unit(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(1.0);
    // `rem_euclid` can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// Layer index for a wrapped `v`. `layer_count` must be non-zero.
pub(crate) fn layer_index(v_wrapped: f64, layer_count: usize) -> usize {
    let idx = (v_wrapped * layer_count as f64).floor() as usize;
    idx.min(layer_count - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/warp.rs"]
mod tests;
