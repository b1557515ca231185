//! Query-string settings driving both tools end to end.

#![cfg(all(feature = "settings", feature = "std"))]

use zensheet::guide::Primitive;
use zensheet::settings::{self, ParseWarning};
use zensheet::{CaptureRegion, GridType, ReadingOrder, Rect, SheetParams, Size, compute_placements};

#[test]
fn sheet_query_to_placements() {
    let result = settings::parse("?cols=2&repeats=2&order=vertical&viewport=240&bgcolor=ivory");
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    let s = result.settings;

    let params = s.sheet_params(SheetParams::new());
    assert_eq!(params.order, ReadingOrder::ColumnMajorRtl);
    let placed = compute_placements(3, &params).unwrap();
    assert_eq!(placed.len(), 6);
    assert_eq!((placed[0].row, placed[0].col), (0, 2));
    assert_eq!((placed[5].row, placed[5].col), (1, 0));

    // (240 - 20 - 5) / 2 = 107, 107 * 1.2 = 128.4
    assert_eq!(s.cell_metrics().unwrap().cell, Size::new(107, 128));
    assert_ne!(s.background(), zensheet::Color::WHITE);
}

#[test]
fn capture_query_to_overlay() {
    let s = settings::parse("w=200&h=300&grid=%E5%9B%9E&opacity=50&border=2").settings;
    let mut region = CaptureRegion::new();
    s.apply_to_region(&mut region).unwrap();

    let overlay = region.overlay();
    assert_eq!(region.grid(), GridType::Hui);
    assert_eq!(overlay.guides[2], Primitive::Rect(Rect::new(50, 50, 100, 200)));
    assert_eq!(overlay.guide_stroke.opacity, 0.5);
    assert_eq!(overlay.border_stroke.width, 2);
}

#[test]
fn bad_values_leave_defaults() {
    let result = settings::parse("w=huge&grid=square&prefix=a/b&speed=3");
    assert_eq!(result.warnings.len(), 4);
    assert!(matches!(
        result.warnings[3],
        ParseWarning::KeyNotRecognized { ref key, .. } if key == "speed"
    ));

    let mut region = CaptureRegion::new();
    result.settings.apply_to_region(&mut region).unwrap();
    assert_eq!(region, CaptureRegion::new());
}
