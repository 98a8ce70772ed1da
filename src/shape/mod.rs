use egui::{Color32, Pos2};
use std::f32::consts::TAU;

pub(crate) mod common;
pub mod handles;

pub use common::*;
pub use handles::{Handle, HandleDrag};

/// Stable identifier of a shape within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendering variant of the line family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    /// Solid line with perpendicular ticks at both endpoints.
    Segment,
}

/// Regular polygons; the variant implies the vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonSides {
    Square,
    Triangle,
    Pentagon,
    Hexagon,
}

impl PolygonSides {
    pub fn count(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Square => 4,
            Self::Pentagon => 5,
            Self::Hexagon => 6,
        }
    }

    /// Rotation that puts the polygon in its canonical pose (flat bottom edge).
    pub fn default_rotation(self) -> f32 {
        match self {
            Self::Square => 45f32.to_radians(),
            Self::Triangle | Self::Pentagon => (-90f32).to_radians(),
            Self::Hexagon => 30f32.to_radians(),
        }
    }
}

/// Which way the pointed side of a brace faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceOrientation {
    Left,
    Right,
    Top,
    Bottom,
}

impl BraceOrientation {
    /// Left/right braces span vertically, top/bottom braces horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// -1 when the tip points towards negative x/y, +1 otherwise.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left | Self::Top => -1.0,
            Self::Right | Self::Bottom => 1.0,
        }
    }
}

/// Geometry of a shape, one variant per primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line {
        style: LineStyle,
        start: Pos2,
        end: Pos2,
    },
    Circle {
        center: Pos2,
        radius: f32,
    },
    Polygon {
        sides: PolygonSides,
        center: Pos2,
        size: f32,
        rotation: f32,
    },
    Brace {
        center: Pos2,
        /// Span along the brace.
        size: f32,
        /// Depth from the straight side to the tip.
        width: f32,
        orientation: BraceOrientation,
    },
}

/// A placed geometric primitive with its own identity and stroke style.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub color: Color32,
    pub width: f32,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(id: ShapeId, color: Color32, width: f32, kind: ShapeKind) -> Self {
        Self {
            id,
            color,
            width,
            kind,
        }
    }

    pub fn shape_type(&self) -> &'static str {
        match &self.kind {
            ShapeKind::Line { style: LineStyle::Solid, .. } => "line",
            ShapeKind::Line { style: LineStyle::Dashed, .. } => "dashed",
            ShapeKind::Line { style: LineStyle::Segment, .. } => "segment",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Polygon { sides: PolygonSides::Square, .. } => "square",
            ShapeKind::Polygon { sides: PolygonSides::Triangle, .. } => "triangle",
            ShapeKind::Polygon { sides: PolygonSides::Pentagon, .. } => "pentagon",
            ShapeKind::Polygon { sides: PolygonSides::Hexagon, .. } => "hexagon",
            ShapeKind::Brace { .. } => "brace",
        }
    }

    /// Vertices of a polygon, empty for every other kind.
    pub fn vertices(&self) -> Vec<Pos2> {
        match self.kind {
            ShapeKind::Polygon {
                sides,
                center,
                size,
                rotation,
            } => polygon_vertices(center, size, rotation, sides.count()),
            _ => Vec::new(),
        }
    }

    /// The points a brace is fitted to: both ends of the straight side, then the tip.
    pub fn brace_extents(&self) -> Option<[Pos2; 3]> {
        match self.kind {
            ShapeKind::Brace {
                center,
                size,
                width,
                orientation,
            } => Some(brace_extents(center, size, width, orientation)),
            _ => None,
        }
    }
}

pub fn polygon_vertices(center: Pos2, size: f32, rotation: f32, count: usize) -> Vec<Pos2> {
    let radius = size / 2.0;
    (0..count)
        .map(|i| {
            let angle = rotation + i as f32 * TAU / count as f32;
            Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

pub fn brace_extents(
    center: Pos2,
    size: f32,
    width: f32,
    orientation: BraceOrientation,
) -> [Pos2; 3] {
    let half = size / 2.0;
    let depth = width * orientation.sign();
    if orientation.is_horizontal() {
        [
            Pos2::new(center.x, center.y - half),
            Pos2::new(center.x, center.y + half),
            Pos2::new(center.x + depth, center.y),
        ]
    } else {
        [
            Pos2::new(center.x - half, center.y),
            Pos2::new(center.x + half, center.y),
            Pos2::new(center.x, center.y + depth),
        ]
    }
}

/// Factory functions for the shapes a tool click creates.
pub mod factory {
    use super::*;

    pub fn create_line(id: ShapeId, style: LineStyle, at: Pos2, color: Color32, width: f32) -> Shape {
        Shape::new(
            id,
            color,
            width,
            ShapeKind::Line {
                style,
                start: at,
                end: at,
            },
        )
    }

    pub fn create_circle(id: ShapeId, center: Pos2, color: Color32, width: f32) -> Shape {
        Shape::new(
            id,
            color,
            width,
            ShapeKind::Circle {
                center,
                radius: DEFAULT_CIRCLE_RADIUS,
            },
        )
    }

    pub fn create_polygon(
        id: ShapeId,
        sides: PolygonSides,
        center: Pos2,
        color: Color32,
        width: f32,
    ) -> Shape {
        Shape::new(
            id,
            color,
            width,
            ShapeKind::Polygon {
                sides,
                center,
                size: DEFAULT_POLYGON_SIZE,
                rotation: sides.default_rotation(),
            },
        )
    }

    pub fn create_brace(id: ShapeId, center: Pos2, color: Color32, width: f32) -> Shape {
        Shape::new(
            id,
            color,
            width,
            ShapeKind::Brace {
                center,
                size: DEFAULT_BRACE_SIZE,
                width: DEFAULT_BRACE_WIDTH,
                orientation: BraceOrientation::Left,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn square_default_pose_is_axis_aligned() {
        let square = factory::create_polygon(
            ShapeId(1),
            PolygonSides::Square,
            Pos2::new(100.0, 100.0),
            Color32::BLACK,
            2.0,
        );
        let vertices = square.vertices();
        assert_eq!(vertices.len(), 4);

        // At 45 degrees the first vertex sits on the diagonal.
        let offset = 50.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx(vertices[0].x, 100.0 + offset));
        assert!(approx(vertices[0].y, 100.0 + offset));
    }

    #[test]
    fn triangle_points_up() {
        let triangle = factory::create_polygon(
            ShapeId(1),
            PolygonSides::Triangle,
            Pos2::ZERO,
            Color32::BLACK,
            2.0,
        );
        let top = triangle.vertices()[0];
        assert!(approx(top.x, 0.0));
        assert!(approx(top.y, -50.0));
    }

    #[test]
    fn brace_extents_follow_orientation() {
        let left = brace_extents(Pos2::new(0.0, 0.0), 100.0, 30.0, BraceOrientation::Left);
        assert_eq!(left[0], Pos2::new(0.0, -50.0));
        assert_eq!(left[1], Pos2::new(0.0, 50.0));
        assert_eq!(left[2], Pos2::new(-30.0, 0.0));

        let bottom = brace_extents(Pos2::new(0.0, 0.0), 100.0, 30.0, BraceOrientation::Bottom);
        assert_eq!(bottom[2], Pos2::new(0.0, 30.0));
    }
}
