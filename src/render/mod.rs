//! Slice-mapped previews of a pattern raster.
//!
//! Both views cut a 3-D-looking shape into many thin slices and stretch a band of the raster into
//! each one. Drawing goes through `vello_cpu` into a device-pixel [`surface::Surface`]; frames are
//! driven by a [`frame_loop::FrameLoop`] on a [`frame_loop::DisplayHost`].

pub mod blade;
pub mod block;
pub mod frame_loop;
pub mod paint;
pub mod surface;
