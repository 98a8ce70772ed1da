use draft_pad::geometry::hit_testing::hit_test;
use draft_pad::scene::Scene;
use draft_pad::shape::{Handle, LineStyle, ShapeId, ShapeKind, factory};
use egui::{Color32, Pos2};

fn line(id: u64, start: Pos2, end: Pos2) -> draft_pad::shape::Shape {
    let mut shape = factory::create_line(ShapeId(id), LineStyle::Solid, start, Color32::BLACK, 2.0);
    if let ShapeKind::Line { end: e, .. } = &mut shape.kind {
        *e = end;
    }
    shape
}

#[test]
fn test_line_tolerance_is_six_pixels() {
    let mut scene = Scene::new();
    let id = scene.next_shape_id();
    scene.add_shape(line(id.0, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0)));

    assert_eq!(scene.shape_at(Pos2::new(50.0, 0.0)), Some(id));
    assert_eq!(scene.shape_at(Pos2::new(50.0, 6.0)), Some(id));
    assert_eq!(scene.shape_at(Pos2::new(50.0, 7.0)), None);
    // Beyond the end the distance is measured to the endpoint.
    assert_eq!(scene.shape_at(Pos2::new(105.0, 0.0)), Some(id));
    assert_eq!(scene.shape_at(Pos2::new(107.0, 0.0)), None);
}

#[test]
fn test_brace_uses_padded_bounds() {
    // Left brace: spans y -50..50 at x = 0, tip at x = -30.
    let brace = factory::create_brace(ShapeId(1), Pos2::new(0.0, 0.0), Color32::BLACK, 2.0);
    assert!(hit_test(&brace, Pos2::new(-15.0, 40.0)));
    assert!(hit_test(&brace, Pos2::new(8.0, 0.0)));
    assert!(!hit_test(&brace, Pos2::new(9.0, 0.0)));
    assert!(!hit_test(&brace, Pos2::new(-15.0, 59.0)));
}

#[test]
fn test_handles_are_grabbed_within_ten_pixels() {
    let circle = factory::create_circle(ShapeId(1), Pos2::new(0.0, 0.0), Color32::BLACK, 2.0);
    assert_eq!(circle.handle_at(Pos2::new(57.0, 6.0)), Some(Handle::Radius));
    assert_eq!(circle.handle_at(Pos2::new(0.0, 30.0)), None);
    // A body hit away from any handle grabs the shape as a whole.
    assert_eq!(circle.pick_handle(Pos2::new(0.0, 50.0)), Some(Handle::Center));
}
