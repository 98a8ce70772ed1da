use egui::Pos2;

use crate::geometry::{calculate_bounds, distance_to_line_segment};
use crate::shape::{
    BRACE_HIT_PADDING, CIRCLE_CENTER_TOLERANCE, CIRCLE_RING_TOLERANCE, LINE_HIT_TOLERANCE,
    POLYGON_HIT_PADDING, Shape, ShapeId, ShapeKind,
};

/// Whether `pos` touches the shape, within the per-kind tolerance.
///
/// Polygons and braces use a padded bounding box rather than exact containment.
pub fn hit_test(shape: &Shape, pos: Pos2) -> bool {
    match &shape.kind {
        ShapeKind::Line { start, end, .. } => {
            distance_to_line_segment(pos, *start, *end) <= LINE_HIT_TOLERANCE
        }
        ShapeKind::Circle { center, radius } => {
            let distance = center.distance(pos);
            (distance - radius).abs() <= CIRCLE_RING_TOLERANCE
                || distance <= CIRCLE_CENTER_TOLERANCE
        }
        ShapeKind::Polygon { .. } => {
            calculate_bounds(&shape.vertices(), POLYGON_HIT_PADDING).contains(pos)
        }
        ShapeKind::Brace { .. } => shape
            .brace_extents()
            .is_some_and(|extents| calculate_bounds(&extents, BRACE_HIT_PADDING).contains(pos)),
    }
}

/// The topmost (most recently inserted) shape under `pos`.
pub fn topmost_hit(shapes: &[Shape], pos: Pos2) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| hit_test(shape, pos))
        .map(|shape| shape.id)
}
