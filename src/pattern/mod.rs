//! Pattern synthesis.
//!
//! A billet is modelled as a unit square: `u` runs along the bar (left to right), `v` across the
//! stack (top to bottom). Every operation is a warp of the working `(u, v)` coordinates, applied
//! in list order; the warped `v` then picks a layer of the stack. This is a deliberately
//! stylized picture of the etched pattern, not a simulation of forging or diffusion.

pub(crate) mod cache;
pub(crate) mod ops;
pub(crate) mod raster;
pub(crate) mod synth;
pub(crate) mod warp;
