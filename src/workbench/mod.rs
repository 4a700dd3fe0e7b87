//! Editing state behind an interactive designer: the stack, the operation sequence and the
//! cached raster handed to the previews.

use crate::catalog::material::Material;
use crate::foundation::core::Canvas;
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::instructions::format_instructions;
use crate::pattern::cache::{PatternCache, PatternCacheStats};
use crate::pattern::ops::Operation;
use crate::pattern::raster::PatternRaster;
use crate::pattern::synth::SynthOpts;
use crate::recipe::Recipe;

/// Raster size used when none is given.
pub const DEFAULT_RASTER_SIZE: Canvas = Canvas {
    width: 512,
    height: 512,
};

/// Stack + operations + memoized raster.
pub struct Workbench {
    stack: Vec<Material>,
    ops: Vec<Operation>,
    size: Canvas,
    cache: PatternCache,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(DEFAULT_RASTER_SIZE, SynthOpts::default())
    }
}

impl Workbench {
    /// Empty stack and no operations, rendering at `size`.
    pub fn new(size: Canvas, opts: SynthOpts) -> Self {
        Self {
            stack: Vec::new(),
            ops: Vec::new(),
            size,
            cache: PatternCache::new(opts),
        }
    }

    /// Load a validated recipe.
    pub fn from_recipe(recipe: Recipe, size: Canvas, opts: SynthOpts) -> DamascusResult<Self> {
        recipe.validate()?;
        Ok(Self {
            stack: recipe.layers,
            ops: recipe.ops,
            ..Self::new(size, opts)
        })
    }

    /// Snapshot the persisted form.
    pub fn recipe(&self) -> Recipe {
        Recipe::new(self.stack.clone(), self.ops.clone())
    }

    /// Sheets bottom to top.
    pub fn stack(&self) -> &[Material] {
        &self.stack
    }

    /// Operations in the order they are applied.
    pub fn ops(&self) -> &[Operation] {
        &self.ops
    }

    /// Raster size handed to the previews.
    pub fn size(&self) -> Canvas {
        self.size
    }

    /// Change the raster size; the next `raster()` call re-synthesizes.
    pub fn set_size(&mut self, size: Canvas) {
        self.size = size;
    }

    /// Append `count` sheets to the top of the stack and record the step.
    pub fn add_sheets(&mut self, material: Material, count: u32) -> DamascusResult<()> {
        if count == 0 {
            return Err(DamascusError::validation("add_sheets count must be > 0"));
        }
        self.stack
            .extend(std::iter::repeat_n(material, count as usize));
        self.ops.push(Operation::AddSheets { material, count });
        Ok(())
    }

    /// Replace the whole stack. Recorded steps are left alone.
    pub fn set_stack(&mut self, stack: Vec<Material>) {
        self.stack = stack;
    }

    /// Validate `op` and append it to the sequence.
    pub fn push_op(&mut self, op: Operation) -> DamascusResult<()> {
        op.validate()?;
        self.ops.push(op);
        Ok(())
    }

    /// Move the operation at `from` so it ends up at index `to`.
    pub fn move_op(&mut self, from: usize, to: usize) -> DamascusResult<()> {
        let len = self.ops.len();
        if from >= len || to >= len {
            return Err(DamascusError::validation(format!(
                "move_op {from} -> {to} out of range for {len} ops"
            )));
        }
        let op = self.ops.remove(from);
        self.ops.insert(to, op);
        Ok(())
    }

    /// Remove and return the operation at `index`.
    pub fn remove_op(&mut self, index: usize) -> DamascusResult<Operation> {
        self.check_index(index)?;
        Ok(self.ops.remove(index))
    }

    /// Replace the operation at `index` with a validated `op`.
    pub fn update_op(&mut self, index: usize, op: Operation) -> DamascusResult<()> {
        self.check_index(index)?;
        op.validate()?;
        self.ops[index] = op;
        Ok(())
    }

    /// One forging instruction per operation.
    pub fn instructions(&self) -> Vec<String> {
        format_instructions(&self.ops)
    }

    /// Current pattern; re-synthesized only when the stack, ops or size changed.
    pub fn raster(&mut self) -> PatternRaster {
        self.cache
            .get(&self.stack, &self.ops, self.size.width, self.size.height)
    }

    /// Hit and miss counts of the raster cache.
    pub fn cache_stats(&self) -> PatternCacheStats {
        self.cache.stats()
    }

    fn check_index(&self, index: usize) -> DamascusResult<()> {
        if index >= self.ops.len() {
            return Err(DamascusError::validation(format!(
                "op index {index} out of range for {} ops",
                self.ops.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/workbench/workbench.rs"]
mod tests;
