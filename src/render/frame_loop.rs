//! Cooperative per-frame redraw loop.
//!
//! A [`FrameLoop`] owns exactly one pending frame request and one resize-listener registration
//! on its [`DisplayHost`]. Each fired frame draws once and requests the next one; teardown
//! cancels the pending request and removes the listener so nothing keeps rescheduling itself.

use std::collections::{BTreeSet, VecDeque};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DamascusError, DamascusResult};
use crate::pattern::raster::PatternRaster;
use crate::render::paint::RasterPaint;
use crate::render::surface::{FrameRGBA, Surface, Viewport};

/// Token for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Token for one resize-listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// The display environment a frame loop runs in.
pub trait DisplayHost {
    /// Current displayed size of the drawing element.
    fn viewport(&self) -> Viewport;
    /// Schedule one frame callback.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a scheduled callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Register interest in viewport changes.
    fn add_resize_listener(&mut self) -> ListenerId;
    /// Drop a registration. Unknown ids are ignored.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// In-process host: frames fire when the caller pumps them.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    listeners: BTreeSet<ListenerId>,
}

impl HeadlessHost {
    /// Create a host with the given displayed size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            next_id: 1,
            pending: VecDeque::new(),
            listeners: BTreeSet::new(),
        }
    }

    /// Change the displayed size. Returns `true` when registered listeners should be told.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let changed = self.viewport != viewport;
        self.viewport = viewport;
        changed && !self.listeners.is_empty()
    }

    /// Fire the oldest scheduled frame, if any.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Number of scheduled, not yet fired frame callbacks.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Number of live resize-listener registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl DisplayHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

/// Per-frame inputs handed to a [`SceneView`].
#[derive(Clone, Copy)]
pub struct FrameInfo<'a> {
    /// Surface width in device pixels.
    pub width: f64,
    /// Surface height in device pixels.
    pub height: f64,
    /// Device pixel ratio.
    pub dpr: f64,
    /// Current pattern, if one has been supplied.
    pub raster: Option<&'a RasterPaint>,
}

/// Something a [`FrameLoop`] redraws every frame.
pub trait SceneView {
    /// Draw one frame. Called once per fired frame; may advance animation state.
    fn draw_frame(&mut self, ctx: &mut vello_cpu::RenderContext, frame: FrameInfo<'_>);
}

/// A mounted renderer: surface, view state, raster and host registrations.
pub struct FrameLoop<V: SceneView> {
    view: V,
    surface: Option<Surface>,
    raster: Option<RasterPaint>,
    pending: Option<FrameHandle>,
    listener: Option<ListenerId>,
    frames_drawn: u64,
}

impl<V: SceneView> FrameLoop<V> {
    /// Acquire a surface sized from the host viewport, register for resizes and schedule the
    /// first frame.
    ///
    /// When no surface can be acquired the loop stays inactive: nothing is registered and
    /// frames are never drawn.
    pub fn mount(
        view: V,
        raster: Option<PatternRaster>,
        host: &mut impl DisplayHost,
    ) -> DamascusResult<Self> {
        let raster = raster.map(RasterPaint::new).transpose()?;
        let mut this = Self {
            view,
            surface: None,
            raster,
            pending: None,
            listener: None,
            frames_drawn: 0,
        };

        match Surface::acquire(host.viewport()) {
            Ok(surface) => {
                this.surface = Some(surface);
                this.listener = Some(host.add_resize_listener());
                this.pending = Some(host.request_frame());
            }
            Err(e) => {
                tracing::warn!(error = %e, "no drawable surface; frame loop not started");
            }
        }
        Ok(this)
    }

    /// `true` while the loop holds a surface and host registrations.
    pub fn is_active(&self) -> bool {
        self.surface.is_some() && self.listener.is_some()
    }

    /// Frames drawn since mounting.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Device-pixel size of the surface, when active.
    pub fn device_size(&self) -> Option<(u16, u16)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    /// The view state.
    pub fn view(&self) -> &V {
        &self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Swap the pattern (or remove it) and restart the loop.
    pub fn set_raster(
        &mut self,
        raster: Option<PatternRaster>,
        host: &mut impl DisplayHost,
    ) -> DamascusResult<()> {
        let unchanged = match (&self.raster, &raster) {
            (Some(old), Some(new)) => old.raster().ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(());
        }
        self.raster = raster.map(RasterPaint::new).transpose()?;
        self.restart(host);
        Ok(())
    }

    /// Cancel the pending frame and schedule a fresh one.
    pub fn restart(&mut self, host: &mut impl DisplayHost) {
        if !self.is_active() {
            return;
        }
        if let Some(h) = self.pending.take() {
            host.cancel_frame(h);
        }
        self.pending = Some(host.request_frame());
    }

    /// Handle a fired frame. Returns `true` when a frame was drawn.
    ///
    /// Handles that are not this loop's pending request (cancelled or foreign) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, host: &mut impl DisplayHost) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        let Self {
            view,
            surface,
            raster,
            ..
        } = &mut *self;
        let Some(surface) = surface.as_mut() else {
            return false;
        };
        let info = FrameInfo {
            width: f64::from(surface.width()),
            height: f64::from(surface.height()),
            dpr: surface.dpr(),
            raster: raster.as_ref(),
        };
        surface.draw(|ctx| view.draw_frame(ctx, info));
        self.frames_drawn += 1;

        self.pending = Some(host.request_frame());
        true
    }

    /// Re-read the host viewport after a resize notification.
    pub fn on_resize(&mut self, host: &impl DisplayHost) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match surface.resize(host.viewport()) {
            Ok(true) => tracing::debug!(
                width = surface.width(),
                height = surface.height(),
                "surface resized"
            ),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "ignoring resize to an undrawable viewport"),
        }
    }

    /// Copy out the last drawn frame.
    pub fn readback(&self) -> Option<FrameRGBA> {
        self.surface.as_ref().map(Surface::readback)
    }

    /// Tear down: cancel the pending frame and remove the resize listener.
    pub fn unmount(mut self, host: &mut impl DisplayHost) {
        if let Some(h) = self.pending.take() {
            host.cancel_frame(h);
        }
        if let Some(id) = self.listener.take() {
            host.remove_resize_listener(id);
        }
    }
}

impl<V: SceneView> Drop for FrameLoop<V> {
    fn drop(&mut self) {
        if self.pending.is_some() || self.listener.is_some() {
            tracing::warn!("frame loop dropped while mounted; call unmount to release host callbacks");
        }
    }
}

/// Pump `frames` frames of a mounted loop into `sink`.
///
/// Returns the number of frames written.
pub fn record<V: SceneView>(
    frame_loop: &mut FrameLoop<V>,
    host: &mut HeadlessHost,
    frames: u64,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> DamascusResult<u64> {
    let (width, height) = frame_loop
        .device_size()
        .ok_or_else(|| DamascusError::render("frame loop is not active; nothing to record"))?;

    sink.begin(SinkConfig {
        width: u32::from(width),
        height: u32::from(height),
        fps,
    })?;

    for i in 0..frames {
        let handle = host
            .next_frame()
            .ok_or_else(|| DamascusError::render("frame loop stopped scheduling frames"))?;
        if !frame_loop.on_frame(handle, host) {
            return Err(DamascusError::render(
                "host fired a frame the loop did not request",
            ));
        }
        let frame = frame_loop
            .readback()
            .ok_or_else(|| DamascusError::render("frame loop lost its surface"))?;
        sink.push_frame(FrameIndex(i), &frame)?;
    }

    sink.end()?;
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_loop.rs"]
mod tests;
