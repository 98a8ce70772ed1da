use egui::{Color32, Key, Pos2};

use super::AxisLock;
use crate::shape::{LineStyle, PolygonSides, Shape, ShapeId, ShapeKind, factory};

/// Tools that place a structured shape instead of freehand ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTool {
    Line,
    Dashed,
    Segment,
    Square,
    Triangle,
    Pentagon,
    Hexagon,
    Circle,
    Brace,
}

impl ShapeTool {
    pub const ALL: [ShapeTool; 9] = [
        ShapeTool::Line,
        ShapeTool::Dashed,
        ShapeTool::Segment,
        ShapeTool::Square,
        ShapeTool::Triangle,
        ShapeTool::Pentagon,
        ShapeTool::Hexagon,
        ShapeTool::Circle,
        ShapeTool::Brace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Dashed => "Dashed",
            Self::Segment => "Segment",
            Self::Square => "Square",
            Self::Triangle => "Triangle",
            Self::Pentagon => "Pentagon",
            Self::Hexagon => "Hexagon",
            Self::Circle => "Circle",
            Self::Brace => "Brace",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Line => "／",
            Self::Dashed => "┄",
            Self::Segment => "├┤",
            Self::Square => "□",
            Self::Triangle => "△",
            Self::Pentagon => "⬠",
            Self::Hexagon => "⬡",
            Self::Circle => "○",
            Self::Brace => "{",
        }
    }

    pub fn shortcut(self) -> Key {
        match self {
            Self::Line => Key::L,
            Self::Dashed => Key::D,
            Self::Segment => Key::S,
            Self::Square => Key::Q,
            Self::Triangle => Key::T,
            Self::Pentagon => Key::P,
            Self::Hexagon => Key::H,
            Self::Circle => Key::C,
            Self::Brace => Key::B,
        }
    }

    /// Line tools take two clicks: anchor, then free endpoint.
    pub fn line_style(self) -> Option<LineStyle> {
        match self {
            Self::Line => Some(LineStyle::Solid),
            Self::Dashed => Some(LineStyle::Dashed),
            Self::Segment => Some(LineStyle::Segment),
            _ => None,
        }
    }

    pub fn is_two_click(self) -> bool {
        self.line_style().is_some()
    }

    /// Shape placed by a click at `at`. Line tools yield a zero-length line
    /// anchored at the click.
    pub fn create(self, id: ShapeId, at: Pos2, color: Color32, width: f32) -> Shape {
        match self {
            Self::Line | Self::Dashed | Self::Segment => {
                let style = self.line_style().unwrap_or(LineStyle::Solid);
                factory::create_line(id, style, at, color, width)
            }
            Self::Square => factory::create_polygon(id, PolygonSides::Square, at, color, width),
            Self::Triangle => factory::create_polygon(id, PolygonSides::Triangle, at, color, width),
            Self::Pentagon => factory::create_polygon(id, PolygonSides::Pentagon, at, color, width),
            Self::Hexagon => factory::create_polygon(id, PolygonSides::Hexagon, at, color, width),
            Self::Circle => factory::create_circle(id, at, color, width),
            Self::Brace => factory::create_brace(id, at, color, width),
        }
    }
}

/// Moves the free endpoint of a two-click line towards `pointer`.
///
/// `Dashed` lines follow the pointer freely when unlocked; plain lines and
/// segments keep the anchor's y even without a lock.
pub fn track_endpoint(line: &mut Shape, pointer: Pos2, lock: AxisLock) {
    let ShapeKind::Line { style, start, end } = &mut line.kind else {
        return;
    };
    *end = match (lock, *style) {
        (AxisLock::Horizontal, _) => Pos2::new(pointer.x, start.y),
        (AxisLock::Vertical, _) => Pos2::new(start.x, pointer.y),
        (AxisLock::None, LineStyle::Dashed) => pointer,
        (AxisLock::None, LineStyle::Solid | LineStyle::Segment) => Pos2::new(pointer.x, start.y),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(tool: ShapeTool, lock: AxisLock) -> Pos2 {
        let mut line = tool.create(ShapeId(1), Pos2::new(10.0, 10.0), Color32::BLACK, 2.0);
        track_endpoint(&mut line, Pos2::new(50.0, 80.0), lock);
        match line.kind {
            ShapeKind::Line { end, .. } => end,
            _ => panic!("expected line"),
        }
    }

    #[test]
    fn axis_locks_clamp_the_endpoint() {
        assert_eq!(endpoint(ShapeTool::Line, AxisLock::Horizontal), Pos2::new(50.0, 10.0));
        assert_eq!(endpoint(ShapeTool::Segment, AxisLock::Vertical), Pos2::new(10.0, 80.0));
        assert_eq!(endpoint(ShapeTool::Dashed, AxisLock::None), Pos2::new(50.0, 80.0));
    }

    #[test]
    fn unlocked_plain_line_keeps_anchor_row() {
        assert_eq!(endpoint(ShapeTool::Line, AxisLock::None), Pos2::new(50.0, 10.0));
    }

    #[test]
    fn polygon_tools_use_default_size() {
        let hexagon = ShapeTool::Hexagon.create(ShapeId(3), Pos2::ZERO, Color32::BLACK, 2.0);
        match hexagon.kind {
            ShapeKind::Polygon { sides, size, rotation, .. } => {
                assert_eq!(sides, PolygonSides::Hexagon);
                assert_eq!(size, 100.0);
                assert!((rotation - 30f32.to_radians()).abs() < 1e-6);
            }
            _ => panic!("expected polygon"),
        }
    }
}
