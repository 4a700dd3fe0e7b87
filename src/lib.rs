//! Damascus is a planning engine for pattern-welded ("Damascus") steel.
//!
//! Assemble a billet from material sheets, apply shaping operations and get back:
//!
//! - a stylized etched-pattern raster ([`synthesize`], [`PatternCache`])
//! - slice-mapped previews of that raster on a billet block and a blade ([`render`])
//! - forging instructions and a shareable [`Recipe`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod catalog;
/// Frame sinks for recorded previews.
pub mod encode;
pub(crate) mod instructions;
pub(crate) mod pattern;
pub(crate) mod recipe;
/// Block and blade previews, surfaces and the frame loop.
pub mod render;
pub(crate) mod workbench;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{DamascusError, DamascusResult};

pub use crate::catalog::material::{Material, MaterialInfo, material_info};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::instructions::{export_text, format_instructions};
pub use crate::pattern::cache::{
    PatternCache, PatternCacheStats, PatternFingerprint, fingerprint_inputs,
};
pub use crate::pattern::ops::Operation;
pub use crate::pattern::raster::PatternRaster;
pub use crate::pattern::synth::{BACKGROUND, SynthOpts, layer_index_at, synthesize, synthesize_with};
pub use crate::recipe::Recipe;
pub use crate::recipe::share::{
    SHARE_PARAM, decode_share_token, encode_share_token, recipe_from_url, share_url,
};
pub use crate::render::blade::{BladeGeometry, BladeView, BladeViewOpts};
pub use crate::render::block::{BlockGeometry, BlockView, BlockViewOpts};
pub use crate::render::frame_loop::{
    DisplayHost, FrameHandle, FrameInfo, FrameLoop, HeadlessHost, ListenerId, SceneView, record,
};
pub use crate::render::paint::RasterPaint;
pub use crate::render::surface::{FrameRGBA, Surface, Viewport};
pub use crate::workbench::{DEFAULT_RASTER_SIZE, Workbench};
