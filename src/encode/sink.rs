use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::pattern::synth::BACKGROUND;
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Consumer of recorded frames.
///
/// `push_frame` is called with strictly increasing `FrameIndex`; sinks reject anything else.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DamascusResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DamascusResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> DamascusResult<()>;
}

/// Shared ordering and size checks.
#[derive(Debug, Default)]
pub(crate) struct FrameOrder {
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FrameOrder {
    pub(crate) fn begin(&mut self, cfg: SinkConfig) -> DamascusResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(DamascusError::validation("sink width/height must be non-zero"));
        }
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    pub(crate) fn check(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DamascusResult<&SinkConfig> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| DamascusError::validation("sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(DamascusError::validation(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(DamascusError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != cfg.width as usize * cfg.height as usize * 4 {
            return Err(DamascusError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }
        self.last_idx = Some(idx);
        Ok(cfg)
    }

    pub(crate) fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub(crate) fn finish(&mut self) -> DamascusResult<SinkConfig> {
        self.cfg
            .take()
            .ok_or_else(|| DamascusError::validation("sink not started"))
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    order: FrameOrder,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, while the sink is open.
    pub fn config(&self) -> Option<SinkConfig> {
        self.order.config().cloned()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DamascusResult<()> {
        self.order.begin(cfg)?;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DamascusResult<()> {
        self.order.check(idx, frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DamascusResult<()> {
        Ok(())
    }
}

/// Writes each frame as `<dir>/<prefix>_<index>.png`, flattened over an opaque background.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    bg: Rgba8,
    order: FrameOrder,
    scratch: Vec<u8>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_owned(),
            bg: BACKGROUND,
            order: FrameOrder::default(),
            scratch: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_background(mut self, bg: Rgba8) -> Self {
        self.bg = bg;
        self
    }

    /// Path a frame index is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, idx.0))
    }

    /// Files written since `begin`.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> DamascusResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory '{}'", self.dir.display()))?;
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.written.clear();
        self.order.begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DamascusResult<()> {
        self.order.check(idx, frame)?;
        super::flatten_to_opaque_rgba8(&mut self.scratch, &frame.data, frame.premultiplied, self.bg)?;

        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &self.scratch,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> DamascusResult<()> {
        self.order.finish()?;
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
