use super::*;
use crate::foundation::core::Canvas;

#[test]
fn band_transform_maps_corners() {
    let src = Rect::new(0.0, 10.0, 64.0, 12.0);
    let dst = Rect::new(100.0, 50.0, 300.0, 60.0);
    let t = band_transform(src, dst);
    let a = t * Point::new(0.0, 10.0);
    let b = t * Point::new(64.0, 12.0);
    assert!((a - Point::new(100.0, 50.0)).hypot() < 1e-9);
    assert!((b - Point::new(300.0, 60.0)).hypot() < 1e-9);
}

#[test]
fn band_transform_tolerates_degenerate_source() {
    let t = band_transform(Rect::new(5.0, 5.0, 5.0, 5.0), Rect::new(0.0, 0.0, 10.0, 10.0));
    let p = t * Point::new(5.0, 5.0);
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn polygon_is_closed() {
    let path = polygon(&[
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
    ]);
    assert_eq!(path.elements().len(), 4);
    assert!(matches!(
        path.elements().last(),
        Some(kurbo::PathEl::ClosePath)
    ));
    assert!(polygon(&[]).elements().is_empty());
    let bbox = kurbo::Shape::bounding_box(&path);
    assert_eq!(bbox.size(), kurbo::Size::new(4.0, 3.0));
    assert_eq!(bbox.origin(), Point::ORIGIN);
}

#[test]
fn raster_paint_rejects_empty_raster() {
    let empty = PatternRaster::filled(
        Canvas {
            width: 0,
            height: 4,
        },
        Rgba8::opaque_gray(0),
    );
    assert!(RasterPaint::new(empty).is_err());
    let ok = PatternRaster::filled(
        Canvas {
            width: 3,
            height: 4,
        },
        Rgba8::opaque_gray(7),
    );
    let paint = RasterPaint::new(ok.clone()).unwrap();
    assert_eq!((paint.width(), paint.height()), (3.0, 4.0));
    assert!(paint.raster().ptr_eq(&ok));
}
