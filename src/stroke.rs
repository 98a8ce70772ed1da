use egui::{Color32, Pos2};

/// How a stroke is composited onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeMode {
    #[default]
    Draw,
    /// Punches through everything already drawn (destination-out).
    Erase,
}

// Immutable stroke, stored in the scene once the pointer is released
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    mode: StrokeMode,
    color: Color32,
    width: f32,
    points: Vec<Pos2>,
}

// Mutable stroke for the gesture in progress
#[derive(Debug, Clone)]
pub struct MutableStroke {
    mode: StrokeMode,
    color: Color32,
    width: f32,
    points: Vec<Pos2>,
}

impl Stroke {
    pub fn new(mode: StrokeMode, color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        Self {
            mode,
            color,
            width,
            points,
        }
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}

impl MutableStroke {
    pub fn new(mode: StrokeMode, color: Color32, width: f32) -> Self {
        Self {
            mode,
            color,
            width,
            points: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Freeze the gesture into an immutable stroke.
    pub fn finish(self) -> Stroke {
        Stroke::new(self.mode, self.color, self.width, self.points)
    }
}
