use egui::{Color32, Pos2, Vec2};
use std::f32::consts::TAU;

use crate::scene::Scene;
use crate::shape::{
    HANDLE_RADIUS, LineStyle, SEGMENT_TICK_HALF_LENGTH, Shape, ShapeKind, handles::handles,
};
use crate::stroke::{MutableStroke, StrokeMode};

pub const CONFIRMING_OPACITY: f32 = 0.75;
pub const GUIDE_COLOR: Color32 = Color32::from_rgb(156, 163, 175);
pub const HANDLE_FILL: Color32 = Color32::WHITE;
pub const HANDLE_STROKE: Color32 = Color32::from_rgb(37, 99, 235);
pub const HANDLE_STROKE_WIDTH: f32 = 1.5;

const CIRCLE_SEGMENTS: usize = 64;
const CURVE_STEPS: usize = 12;

/// How new pixels combine with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    /// Removes existing pixels where the source is opaque.
    DestinationOut,
}

impl From<StrokeMode> for Blend {
    fn from(mode: StrokeMode) -> Self {
        match mode {
            StrokeMode::Draw => Blend::SourceOver,
            StrokeMode::Erase => Blend::DestinationOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
}

pub const SHAPE_DASH: Dash = Dash { on: 8.0, off: 6.0 };
pub const GUIDE_DASH: Dash = Dash { on: 4.0, off: 4.0 };

/// One primitive of a rendered frame, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Path {
        points: Vec<Pos2>,
        closed: bool,
        width: f32,
        color: Color32,
        dash: Option<Dash>,
        blend: Blend,
    },
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
        blend: Blend,
    },
    Handle {
        center: Pos2,
        radius: f32,
    },
}

/// Flattens the whole scene into draw operations, back to front: shapes, the
/// pending line, strokes, the stroke in progress, then the selection overlay.
pub fn build_display_list(scene: &Scene, active_stroke: Option<&MutableStroke>) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    for shape in scene.shapes() {
        let opacity = if scene.confirming() == Some(shape.id) {
            CONFIRMING_OPACITY
        } else {
            1.0
        };
        push_shape(&mut ops, shape, opacity);
    }
    if let Some(pending) = scene.pending() {
        push_shape(&mut ops, pending, 1.0);
    }

    for stroke in scene.strokes() {
        push_stroke(&mut ops, stroke.points(), stroke.width(), stroke.color(), stroke.mode());
    }
    if let Some(stroke) = active_stroke {
        push_stroke(&mut ops, stroke.points(), stroke.width(), stroke.color(), stroke.mode());
    }

    if let Some(selected) = scene.selected_shape() {
        for (points, closed) in shape_paths(selected) {
            ops.push(DrawOp::Path {
                points,
                closed,
                width: 1.0,
                color: GUIDE_COLOR,
                dash: Some(GUIDE_DASH),
                blend: Blend::SourceOver,
            });
        }
        for (_, center) in handles(selected) {
            ops.push(DrawOp::Handle {
                center,
                radius: HANDLE_RADIUS,
            });
        }
    }

    ops
}

fn push_shape(ops: &mut Vec<DrawOp>, shape: &Shape, opacity: f32) {
    let color = shape.color.gamma_multiply(opacity);
    let dashed = matches!(
        shape.kind,
        ShapeKind::Line {
            style: LineStyle::Dashed,
            ..
        }
    );
    for (i, (points, closed)) in shape_paths(shape).into_iter().enumerate() {
        ops.push(DrawOp::Path {
            points,
            closed,
            width: shape.width,
            color,
            // Only the main path is dashed, never the segment ticks
            dash: (dashed && i == 0).then_some(SHAPE_DASH),
            blend: Blend::SourceOver,
        });
    }
}

fn push_stroke(ops: &mut Vec<DrawOp>, points: &[Pos2], width: f32, color: Color32, mode: StrokeMode) {
    match points {
        [] => {}
        [single] => ops.push(DrawOp::Dot {
            center: *single,
            radius: width / 2.0,
            color,
            blend: mode.into(),
        }),
        _ => ops.push(DrawOp::Path {
            points: smooth_stroke(points),
            closed: false,
            width,
            color,
            dash: None,
            blend: mode.into(),
        }),
    }
}

/// Outline polylines of a shape; the bool marks closed paths.
pub fn shape_paths(shape: &Shape) -> Vec<(Vec<Pos2>, bool)> {
    match &shape.kind {
        ShapeKind::Line { style, start, end } => {
            let mut paths = vec![(vec![*start, *end], false)];
            if *style == LineStyle::Segment {
                let direction = *end - *start;
                let normal = if direction.length() > f32::EPSILON {
                    direction.normalized().rot90()
                } else {
                    Vec2::Y
                };
                for p in [*start, *end] {
                    let tick = normal * SEGMENT_TICK_HALF_LENGTH;
                    paths.push((vec![p - tick, p + tick], false));
                }
            }
            paths
        }
        ShapeKind::Circle { center, radius } => {
            let points = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 * TAU / CIRCLE_SEGMENTS as f32;
                    *center + Vec2::angled(angle) * *radius
                })
                .collect();
            vec![(points, true)]
        }
        ShapeKind::Polygon { .. } => vec![(shape.vertices(), true)],
        ShapeKind::Brace {
            center,
            size,
            width,
            orientation,
        } => {
            let half = size / 2.0;
            let depth = width * orientation.sign();
            let horizontal = orientation.is_horizontal();
            // (u, v): u runs along the span, v towards the tip
            let at = |u: f32, v: f32| {
                if horizontal {
                    Pos2::new(center.x + v, center.y + u)
                } else {
                    Pos2::new(center.x + u, center.y + v)
                }
            };
            let shoulder = depth / 2.0;

            let mut points = vec![at(-half, 0.0)];
            flatten_quad(&mut points, at(-half, 0.0), at(-half, shoulder), at(-half / 2.0, shoulder));
            flatten_quad(&mut points, at(-half / 2.0, shoulder), at(0.0, shoulder), at(0.0, depth));
            flatten_quad(&mut points, at(0.0, depth), at(0.0, shoulder), at(half / 2.0, shoulder));
            flatten_quad(&mut points, at(half / 2.0, shoulder), at(half, shoulder), at(half, 0.0));
            vec![(points, false)]
        }
    }
}

/// Smooths a freehand polyline with quadratic curves through segment midpoints.
pub fn smooth_stroke(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    let mut cursor = points[0];
    for i in 1..points.len() - 1 {
        let control = points[i];
        let end = points[i].lerp(points[i + 1], 0.5);
        flatten_quad(&mut out, cursor, control, end);
        cursor = end;
    }
    out.push(points[points.len() - 1]);
    out
}

/// Appends the curve's points after `from` (which is assumed to be present already).
fn flatten_quad(out: &mut Vec<Pos2>, from: Pos2, control: Pos2, to: Pos2) {
    for step in 1..=CURVE_STEPS {
        let t = step as f32 / CURVE_STEPS as f32;
        let a = from.lerp(control, t);
        let b = control.lerp(to, t);
        out.push(a.lerp(b, t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ShapeId, factory};
    use crate::stroke::Stroke;

    #[test]
    fn shapes_are_drawn_beneath_strokes() {
        let mut scene = Scene::new();
        scene.push_stroke(Stroke::new(
            StrokeMode::Draw,
            Color32::BLACK,
            4.0,
            vec![Pos2::new(1.0, 1.0)],
        ));
        let id = scene.next_shape_id();
        scene.add_shape(factory::create_circle(id, Pos2::ZERO, Color32::RED, 2.0));

        let ops = build_display_list(&scene, None);
        assert!(matches!(ops[0], DrawOp::Path { closed: true, .. }));
        assert!(matches!(ops.last(), Some(DrawOp::Dot { .. })));
    }

    #[test]
    fn confirming_shape_is_translucent_and_shows_handles() {
        let mut scene = Scene::new();
        let id = scene.next_shape_id();
        scene.add_shape(factory::create_circle(id, Pos2::ZERO, Color32::RED, 2.0));
        scene.set_confirming(Some(id));
        scene.set_selected(Some(id));

        let ops = build_display_list(&scene, None);
        match &ops[0] {
            DrawOp::Path { color, .. } => assert_eq!(*color, Color32::RED.gamma_multiply(0.75)),
            other => panic!("unexpected op {:?}", other),
        }
        let handles = ops.iter().filter(|op| matches!(op, DrawOp::Handle { .. })).count();
        assert_eq!(handles, 2);
    }

    #[test]
    fn erase_strokes_use_destination_out() {
        let mut scene = Scene::new();
        scene.push_stroke(Stroke::new(
            StrokeMode::Erase,
            Color32::BLACK,
            16.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)],
        ));
        let ops = build_display_list(&scene, None);
        assert!(matches!(
            ops[0],
            DrawOp::Path {
                blend: Blend::DestinationOut,
                ..
            }
        ));
    }

    #[test]
    fn segment_has_ticks_and_dashed_line_is_dashed() {
        let segment = factory::create_line(ShapeId(1), LineStyle::Segment, Pos2::ZERO, Color32::BLACK, 2.0);
        assert_eq!(shape_paths(&segment).len(), 3);

        let mut ops = Vec::new();
        let dashed = factory::create_line(ShapeId(2), LineStyle::Dashed, Pos2::ZERO, Color32::BLACK, 2.0);
        push_shape(&mut ops, &dashed, 1.0);
        assert!(matches!(ops[0], DrawOp::Path { dash: Some(_), .. }));
    }

    #[test]
    fn smoothing_keeps_the_endpoints() {
        let points = [Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0), Pos2::new(20.0, 0.0)];
        let smooth = smooth_stroke(&points);
        assert_eq!(smooth.first(), Some(&points[0]));
        assert_eq!(smooth.last(), Some(&points[2]));
        assert!(smooth.len() > points.len());
    }

    #[test]
    fn brace_path_reaches_the_tip() {
        let brace = factory::create_brace(ShapeId(1), Pos2::new(100.0, 100.0), Color32::BLACK, 2.0);
        let (points, closed) = &shape_paths(&brace)[0];
        assert!(!closed);
        assert!(points.contains(&Pos2::new(70.0, 100.0)));
        assert_eq!(points.first(), Some(&Pos2::new(100.0, 50.0)));
        assert_eq!(points.last(), Some(&Pos2::new(100.0, 150.0)));
    }
}
