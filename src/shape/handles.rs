use egui::{Pos2, Vec2};

use super::{
    BraceOrientation, HANDLE_GRAB_RADIUS, MIN_BRACE_SIZE, MIN_BRACE_WIDTH, MIN_CIRCLE_RADIUS,
    MIN_POLYGON_SIZE, Shape, ShapeId, ShapeKind,
};
use crate::geometry::hit_testing;

/// An interactive control point of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Moves the shape (rotates a polygon when the rotate modifier is held).
    Center,
    /// Circle radius, drawn at angle 0.
    Radius,
    Start,
    End,
    /// Polygon vertex: scales by distance from the center.
    Corner(usize),
    /// Polygon edge midpoint: relocates the center.
    Edge(usize),
    BraceTop,
    BraceBottom,
    BraceWidth,
}

/// Every handle of a shape with its current position, in drawing order.
pub fn handles(shape: &Shape) -> Vec<(Handle, Pos2)> {
    match &shape.kind {
        ShapeKind::Line { start, end, .. } => vec![(Handle::Start, *start), (Handle::End, *end)],
        ShapeKind::Circle { center, radius } => vec![
            (Handle::Center, *center),
            (Handle::Radius, Pos2::new(center.x + radius, center.y)),
        ],
        ShapeKind::Polygon { center, .. } => {
            let vertices = shape.vertices();
            let n = vertices.len();
            let mut out = Vec::with_capacity(n * 2 + 1);
            for (i, v) in vertices.iter().enumerate() {
                out.push((Handle::Corner(i), *v));
            }
            for i in 0..n {
                let mid = vertices[i].lerp(vertices[(i + 1) % n], 0.5);
                out.push((Handle::Edge(i), mid));
            }
            out.push((Handle::Center, *center));
            out
        }
        ShapeKind::Brace { center, .. } => {
            let mut out = vec![(Handle::Center, *center)];
            if let Some([top, bottom, tip]) = shape.brace_extents() {
                out.push((Handle::BraceTop, top));
                out.push((Handle::BraceBottom, bottom));
                out.push((Handle::BraceWidth, tip));
            }
            out
        }
    }
}

impl Shape {
    /// The handle closest to `pos`, if it lies within grabbing distance.
    pub fn handle_at(&self, pos: Pos2) -> Option<Handle> {
        handles(self)
            .into_iter()
            .map(|(handle, at)| (handle, at.distance(pos)))
            .filter(|(_, distance)| *distance <= HANDLE_GRAB_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    /// Handle to drag for a pointer-down at `pos`: a nearby handle, otherwise a
    /// body hit grabs the shape as a whole.
    pub fn pick_handle(&self, pos: Pos2) -> Option<Handle> {
        self.handle_at(pos).or_else(|| {
            if hit_testing::hit_test(self, pos) {
                Some(Handle::Center)
            } else {
                None
            }
        })
    }
}

/// An in-progress handle drag.
///
/// Every pointer move is applied to the snapshot taken at drag start, so the
/// result depends only on where the pointer is now.
#[derive(Debug, Clone)]
pub struct HandleDrag {
    shape_id: ShapeId,
    handle: Handle,
    origin: Pos2,
    before: Shape,
    rotate: bool,
}

impl HandleDrag {
    pub fn new(before: Shape, handle: Handle, origin: Pos2, rotate: bool) -> Self {
        Self {
            shape_id: before.id,
            handle,
            origin,
            before,
            rotate,
        }
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// The shape as it was when the drag began.
    pub fn before(&self) -> &Shape {
        &self.before
    }

    /// Shape produced by dragging the handle to `pointer`.
    pub fn apply(&self, pointer: Pos2) -> Shape {
        let mut shape = self.before.clone();
        let delta = pointer - self.origin;

        match (&mut shape.kind, self.handle) {
            (ShapeKind::Line { start, .. }, Handle::Start) => *start = pointer,
            (ShapeKind::Line { end, .. }, Handle::End) => *end = pointer,
            (ShapeKind::Line { start, end, .. }, Handle::Center) => {
                // The grab moves the start point onto the pointer, keeping the vector.
                let vector = *end - *start;
                *start = pointer;
                *end = pointer + vector;
            }

            (ShapeKind::Circle { center, .. }, Handle::Center) => *center += delta,
            (ShapeKind::Circle { center, radius }, Handle::Radius) => {
                *radius = center.distance(pointer).max(MIN_CIRCLE_RADIUS);
            }

            (ShapeKind::Polygon { center, rotation, .. }, Handle::Center) => {
                if self.rotate {
                    let start_angle = angle_of(self.origin - *center);
                    *rotation += angle_of(pointer - *center) - start_angle;
                } else {
                    *center += delta;
                }
            }
            (ShapeKind::Polygon { center, size, .. }, Handle::Corner(_)) => {
                *size = (2.0 * center.distance(pointer)).max(MIN_POLYGON_SIZE);
            }
            (ShapeKind::Polygon { center, .. }, Handle::Edge(_)) => *center = pointer,

            (ShapeKind::Brace { center, .. }, Handle::Center) => *center += delta,
            (
                ShapeKind::Brace {
                    center,
                    size,
                    orientation,
                    ..
                },
                Handle::BraceTop | Handle::BraceBottom,
            ) => {
                let offset = if orientation.is_horizontal() {
                    center.y - pointer.y
                } else {
                    center.x - pointer.x
                };
                *size = (2.0 * offset.abs()).max(MIN_BRACE_SIZE);
            }
            (
                ShapeKind::Brace {
                    center,
                    width,
                    orientation,
                    ..
                },
                Handle::BraceWidth,
            ) => {
                let offset = if orientation.is_horizontal() {
                    pointer.x - center.x
                } else {
                    pointer.y - center.y
                };
                *width = offset.abs().max(MIN_BRACE_WIDTH);
                *orientation = match (orientation.is_horizontal(), offset < 0.0) {
                    (true, true) => BraceOrientation::Left,
                    (true, false) => BraceOrientation::Right,
                    (false, true) => BraceOrientation::Top,
                    (false, false) => BraceOrientation::Bottom,
                };
            }

            (kind, handle) => {
                log::warn!("Handle {:?} does not apply to {:?}", handle, kind);
            }
        }

        shape
    }
}

fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{PolygonSides, factory};
    use egui::Color32;

    #[test]
    fn circle_radius_floor() {
        let circle = factory::create_circle(ShapeId(1), Pos2::new(100.0, 100.0), Color32::BLACK, 2.0);
        let drag = HandleDrag::new(circle, Handle::Radius, Pos2::new(150.0, 100.0), false);

        let dragged = drag.apply(Pos2::new(102.0, 100.0));
        assert_eq!(dragged.kind, ShapeKind::Circle { center: Pos2::new(100.0, 100.0), radius: 5.0 });
    }

    #[test]
    fn polygon_rotation_is_relative_to_grab_angle() {
        let square = factory::create_polygon(
            ShapeId(1),
            PolygonSides::Square,
            Pos2::ZERO,
            Color32::BLACK,
            2.0,
        );
        // Grab to the right of the center, then move straight below it: a quarter turn.
        let drag = HandleDrag::new(square, Handle::Center, Pos2::new(5.0, 0.0), true);
        let rotated = drag.apply(Pos2::new(0.0, 5.0));
        match rotated.kind {
            ShapeKind::Polygon { center, rotation, .. } => {
                assert_eq!(center, Pos2::ZERO);
                let expected = 45f32.to_radians() + std::f32::consts::FRAC_PI_2;
                assert!((rotation - expected).abs() < 1e-4);
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn brace_width_flips_orientation() {
        let brace = factory::create_brace(ShapeId(1), Pos2::new(100.0, 100.0), Color32::BLACK, 2.0);
        let drag = HandleDrag::new(brace, Handle::BraceWidth, Pos2::new(70.0, 100.0), false);

        let flipped = drag.apply(Pos2::new(140.0, 100.0));
        match flipped.kind {
            ShapeKind::Brace { width, orientation, .. } => {
                assert_eq!(width, 40.0);
                assert_eq!(orientation, BraceOrientation::Right);
            }
            _ => panic!("expected brace"),
        }

        let shallow = drag.apply(Pos2::new(97.0, 100.0));
        match shallow.kind {
            ShapeKind::Brace { width, orientation, .. } => {
                assert_eq!(width, MIN_BRACE_WIDTH);
                assert_eq!(orientation, BraceOrientation::Left);
            }
            _ => panic!("expected brace"),
        }
    }

    fn brace_size(shape: &Shape) -> f32 {
        match shape.kind {
            ShapeKind::Brace { size, .. } => size,
            _ => panic!("expected brace"),
        }
    }

    #[test]
    fn brace_ends_resize_across_the_span() {
        // Left braces span vertically.
        let brace = factory::create_brace(ShapeId(1), Pos2::new(100.0, 100.0), Color32::BLACK, 2.0);
        let top = HandleDrag::new(brace.clone(), Handle::BraceTop, Pos2::new(100.0, 50.0), false);
        assert_eq!(brace_size(&top.apply(Pos2::new(100.0, 30.0))), 140.0);
        assert_eq!(brace_size(&top.apply(Pos2::new(100.0, 95.0))), MIN_BRACE_SIZE);
        let bottom = HandleDrag::new(brace, Handle::BraceBottom, Pos2::new(100.0, 150.0), false);
        assert_eq!(brace_size(&bottom.apply(Pos2::new(130.0, 160.0))), 120.0);

        // Top braces span horizontally.
        let mut brace = factory::create_brace(ShapeId(2), Pos2::new(100.0, 100.0), Color32::BLACK, 2.0);
        if let ShapeKind::Brace { orientation, .. } = &mut brace.kind {
            *orientation = BraceOrientation::Top;
        }
        let top = HandleDrag::new(brace.clone(), Handle::BraceTop, Pos2::new(50.0, 100.0), false);
        assert_eq!(brace_size(&top.apply(Pos2::new(20.0, 140.0))), 160.0);
        assert_eq!(brace_size(&top.apply(Pos2::new(105.0, 100.0))), MIN_BRACE_SIZE);
        let bottom = HandleDrag::new(brace, Handle::BraceBottom, Pos2::new(150.0, 100.0), false);
        assert_eq!(brace_size(&bottom.apply(Pos2::new(190.0, 100.0))), 180.0);
    }

    #[test]
    fn polygon_edge_moves_center_to_pointer() {
        let square = factory::create_polygon(
            ShapeId(1),
            PolygonSides::Square,
            Pos2::ZERO,
            Color32::BLACK,
            2.0,
        );
        let drag = HandleDrag::new(square, Handle::Edge(0), Pos2::new(0.0, 35.0), false);
        match drag.apply(Pos2::new(40.0, -10.0)).kind {
            ShapeKind::Polygon { center, size, .. } => {
                assert_eq!(center, Pos2::new(40.0, -10.0));
                assert_eq!(size, 100.0);
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn polygon_center_drag_translates() {
        let hexagon = factory::create_polygon(
            ShapeId(1),
            PolygonSides::Hexagon,
            Pos2::new(100.0, 100.0),
            Color32::BLACK,
            2.0,
        );
        let drag = HandleDrag::new(hexagon, Handle::Center, Pos2::new(105.0, 100.0), false);
        match drag.apply(Pos2::new(115.0, 120.0)).kind {
            ShapeKind::Polygon { center, rotation, .. } => {
                assert_eq!(center, Pos2::new(110.0, 120.0));
                assert_eq!(rotation, PolygonSides::Hexagon.default_rotation());
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn line_grab_moves_start_to_pointer() {
        let mut line = factory::create_line(
            ShapeId(1),
            crate::shape::LineStyle::Solid,
            Pos2::new(0.0, 0.0),
            Color32::BLACK,
            2.0,
        );
        if let ShapeKind::Line { end, .. } = &mut line.kind {
            *end = Pos2::new(100.0, 0.0);
        }
        let drag = HandleDrag::new(line, Handle::Center, Pos2::new(50.0, 0.0), false);
        let moved = drag.apply(Pos2::new(60.0, 10.0));
        match moved.kind {
            ShapeKind::Line { start, end, .. } => {
                assert_eq!(start, Pos2::new(60.0, 10.0));
                assert_eq!(end, Pos2::new(160.0, 10.0));
            }
            _ => panic!("expected line"),
        }
    }
}
