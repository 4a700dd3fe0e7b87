use xxhash_rust::xxh3::Xxh3;

use crate::catalog::material::Material;
use crate::foundation::core::Canvas;
use crate::pattern::ops::Operation;
use crate::pattern::raster::PatternRaster;
use crate::pattern::synth::{SynthOpts, synthesize_with};

const XXH3_SEED: u64 = 0x5eed_da4a_5c05_11e7;

/// Stable fingerprint of synthesizer inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternFingerprint(pub u64);

/// Fingerprint `(stack, ops, width, height)`.
pub fn fingerprint_inputs(stack: &[Material], ops: &[Operation], canvas: Canvas) -> PatternFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(canvas.width);
    h.write_u32(canvas.height);
    h.write_u64(stack.len() as u64);
    for m in stack {
        h.write_str(m.id());
    }
    h.write_u64(ops.len() as u64);
    for op in ops {
        write_op(&mut h, op);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> PatternFingerprint {
        PatternFingerprint(self.inner.digest())
    }
}

fn write_op(h: &mut StableHasher, op: &Operation) {
    match *op {
        Operation::AddSheets { material, count } => {
            h.write_u8(0);
            h.write_str(material.id());
            h.write_u32(count);
        }
        Operation::Twist { turns } => {
            h.write_u8(1);
            h.write_f64(turns);
        }
        Operation::Ladder { spacing, depth } => {
            h.write_u8(2);
            h.write_f64(spacing);
            h.write_f64(depth);
        }
        Operation::Raindrops { radius, spacing } => {
            h.write_u8(3);
            h.write_f64(radius);
            h.write_f64(spacing);
        }
        Operation::WFolds { folds } => {
            h.write_u8(4);
            h.write_u32(folds);
        }
        Operation::Fold { times } => {
            h.write_u8(5);
            h.write_u32(times);
        }
        Operation::Stretch { factor } => {
            h.write_u8(6);
            h.write_f64(factor);
        }
    }
}

struct CacheEntry {
    fingerprint: PatternFingerprint,
    stack: Vec<Material>,
    ops: Vec<Operation>,
    canvas: Canvas,
    raster: PatternRaster,
}

impl CacheEntry {
    fn matches(
        &self,
        fingerprint: PatternFingerprint,
        stack: &[Material],
        ops: &[Operation],
        canvas: Canvas,
    ) -> bool {
        self.fingerprint == fingerprint
            && self.canvas == canvas
            && self.stack == stack
            && self.ops == ops
    }
}

/// Hit/miss counters for [`PatternCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternCacheStats {
    /// Lookups answered from the cached raster.
    pub hits: u64,
    /// Lookups that re-synthesized.
    pub misses: u64,
}

/// Single-entry memo for [`synthesize_with`].
///
/// Keyed by the full inputs; the fingerprint only short-circuits mismatches. A hit returns the
/// same shared raster, a miss replaces (never mutates) the previous one.
pub struct PatternCache {
    opts: SynthOpts,
    entry: Option<CacheEntry>,
    stats: PatternCacheStats,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(SynthOpts::default())
    }
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new(opts: SynthOpts) -> Self {
        Self {
            opts,
            entry: None,
            stats: PatternCacheStats::default(),
        }
    }

    /// Cached raster for these inputs, synthesizing on a key change.
    pub fn get(
        &mut self,
        stack: &[Material],
        ops: &[Operation],
        width: u32,
        height: u32,
    ) -> PatternRaster {
        let canvas = Canvas { width, height };
        let fingerprint = fingerprint_inputs(stack, ops, canvas);

        if let Some(entry) = &self.entry
            && entry.matches(fingerprint, stack, ops, canvas)
        {
            self.stats.hits += 1;
            tracing::debug!(fingerprint = fingerprint.0, "pattern cache hit");
            return entry.raster.clone();
        }

        self.stats.misses += 1;
        tracing::debug!(fingerprint = fingerprint.0, "pattern cache miss");
        let raster = synthesize_with(stack, ops, width, height, &self.opts);
        self.entry = Some(CacheEntry {
            fingerprint,
            stack: stack.to_vec(),
            ops: ops.to_vec(),
            canvas,
            raster: raster.clone(),
        });
        raster
    }

    /// Drop the cached raster.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Hit/miss counters since construction.
    pub fn stats(&self) -> PatternCacheStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/cache.rs"]
mod tests;
