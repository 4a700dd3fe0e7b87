use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Rgba8};

/// Fills the surface with one gray level per frame and counts draws.
#[derive(Default)]
struct Counter {
    draws: u32,
    saw_raster: bool,
}

impl SceneView for Counter {
    fn draw_frame(&mut self, ctx: &mut vello_cpu::RenderContext, frame: FrameInfo<'_>) {
        self.draws += 1;
        self.saw_raster = frame.raster.is_some();
        let v = (self.draws * 10).min(255) as u8;
        crate::render::paint::clear(ctx, frame.width, frame.height, Rgba8::opaque_gray(v));
    }
}

fn raster() -> PatternRaster {
    PatternRaster::filled(
        Canvas {
            width: 8,
            height: 8,
        },
        Rgba8::opaque_gray(90),
    )
}

#[test]
fn mount_registers_one_frame_and_one_listener() {
    let mut host = HeadlessHost::new(Viewport::new(16.0, 8.0));
    let fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    assert!(fl.is_active());
    assert_eq!(fl.device_size(), Some((16, 8)));
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.listener_count(), 1);
    fl.unmount(&mut host);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn each_fired_frame_draws_once_and_reschedules() {
    let mut host = HeadlessHost::new(Viewport::new(4.0, 4.0));
    let mut fl = FrameLoop::mount(Counter::default(), Some(raster()), &mut host).unwrap();
    for n in 1..=3 {
        let h = host.next_frame().unwrap();
        assert!(fl.on_frame(h, &mut host));
        assert_eq!(fl.view().draws, n);
        assert_eq!(host.pending_frames(), 1);
    }
    assert!(fl.view().saw_raster);
    assert_eq!(fl.frames_drawn(), 3);
    assert_eq!(&fl.readback().unwrap().data[..4], &[30, 30, 30, 255]);
    fl.unmount(&mut host);
}

#[test]
fn stale_handles_are_ignored() {
    let mut host = HeadlessHost::new(Viewport::new(4.0, 4.0));
    let mut fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    let first = host.next_frame().unwrap();
    assert!(fl.on_frame(first, &mut host));
    assert!(!fl.on_frame(first, &mut host));
    assert!(!fl.on_frame(FrameHandle(9_999), &mut host));
    assert_eq!(fl.view().draws, 1);
    fl.unmount(&mut host);
}

#[test]
fn set_raster_restarts_with_a_single_pending_frame() {
    let mut host = HeadlessHost::new(Viewport::new(4.0, 4.0));
    let mut fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    let r = raster();
    fl.set_raster(Some(r.clone()), &mut host).unwrap();
    assert_eq!(host.pending_frames(), 1);

    let h = host.next_frame().unwrap();
    assert!(fl.on_frame(h, &mut host));
    assert!(fl.view().saw_raster);

    // Same buffer: nothing to restart.
    let before = host.pending_frames();
    fl.set_raster(Some(r), &mut host).unwrap();
    assert_eq!(host.pending_frames(), before);

    fl.set_raster(None, &mut host).unwrap();
    assert_eq!(host.pending_frames(), 1);
    let h = host.next_frame().unwrap();
    assert!(fl.on_frame(h, &mut host));
    assert!(!fl.view().saw_raster);
    fl.unmount(&mut host);
}

#[test]
fn undrawable_viewport_leaves_loop_inactive() {
    let mut host = HeadlessHost::new(Viewport::new(0.0, 10.0));
    let mut fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    assert!(!fl.is_active());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listener_count(), 0);
    assert!(!fl.on_frame(FrameHandle(1), &mut host));
    assert!(fl.readback().is_none());

    let mut sink = InMemorySink::new();
    assert!(record(&mut fl, &mut host, 2, Fps::new(30, 1).unwrap(), &mut sink).is_err());
    fl.unmount(&mut host);
}

#[test]
fn resize_follows_the_host_viewport() {
    let mut host = HeadlessHost::new(Viewport::new(10.0, 10.0));
    let mut fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    assert!(host.set_viewport(Viewport::new(10.0, 5.0).with_dpr(2.0)));
    fl.on_resize(&host);
    assert_eq!(fl.device_size(), Some((20, 10)));

    // An undrawable size keeps the previous surface.
    host.set_viewport(Viewport::new(0.0, 0.0));
    fl.on_resize(&host);
    assert_eq!(fl.device_size(), Some((20, 10)));
    fl.unmount(&mut host);
}

#[test]
fn record_pushes_sequential_frames() {
    let mut host = HeadlessHost::new(Viewport::new(6.0, 4.0));
    let mut fl = FrameLoop::mount(Counter::default(), None, &mut host).unwrap();
    let mut sink = InMemorySink::new();
    let n = record(&mut fl, &mut host, 4, Fps::new(24, 1).unwrap(), &mut sink).unwrap();
    assert_eq!(n, 4);
    assert_eq!(sink.frames().len(), 4);
    assert_eq!(sink.config().unwrap().width, 6);
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.data[0], ((i + 1) * 10) as u8);
    }
    fl.unmount(&mut host);
    assert_eq!(host.pending_frames(), 0);
}
