use egui::{Color32, Key};

use crate::config::PadConfig;
use crate::stroke::StrokeMode;

mod shape_tool;

pub use shape_tool::{ShapeTool, track_endpoint};

/// Constraint applied to the free endpoint of a two-click line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    /// Keep the endpoint on the anchor's y.
    Horizontal,
    /// Keep the endpoint on the anchor's x.
    Vertical,
}

impl AxisLock {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Free",
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}

/// What a pointer-down on empty canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    Draw,
    Erase,
    Shape(ShapeTool),
}

/// Tool selection and pen settings of a draft pad.
#[derive(Debug, Clone)]
pub struct ToolState {
    ink: StrokeMode,
    shape_tool: Option<ShapeTool>,
    axis_lock: AxisLock,
    pen_color: Color32,
    pen_width: f32,
    eraser_width: f32,
}

impl ToolState {
    pub fn new(config: &PadConfig) -> Self {
        Self {
            ink: StrokeMode::Draw,
            shape_tool: None,
            axis_lock: AxisLock::default(),
            pen_color: config.pen_color,
            pen_width: config.pen_width,
            eraser_width: config.eraser_width,
        }
    }

    pub fn mode(&self) -> ToolMode {
        match (self.shape_tool, self.ink) {
            (Some(tool), _) => ToolMode::Shape(tool),
            (None, StrokeMode::Draw) => ToolMode::Draw,
            (None, StrokeMode::Erase) => ToolMode::Erase,
        }
    }

    pub fn ink(&self) -> StrokeMode {
        self.ink
    }

    pub fn set_ink(&mut self, ink: StrokeMode) {
        self.ink = ink;
    }

    pub fn shape_tool(&self) -> Option<ShapeTool> {
        self.shape_tool
    }

    pub fn set_shape_tool(&mut self, tool: Option<ShapeTool>) {
        self.shape_tool = tool;
    }

    pub fn axis_lock(&self) -> AxisLock {
        self.axis_lock
    }

    pub fn set_axis_lock(&mut self, lock: AxisLock) {
        self.axis_lock = lock;
    }

    pub fn pen_color(&self) -> Color32 {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: Color32) {
        self.pen_color = color;
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn set_pen_width(&mut self, width: f32) {
        self.pen_width = width;
    }

    pub fn eraser_width(&self) -> f32 {
        self.eraser_width
    }

    pub fn set_eraser_width(&mut self, width: f32) {
        self.eraser_width = width;
    }

    /// Width of a new freehand stroke in the current ink mode.
    pub fn stroke_width(&self) -> f32 {
        match self.ink {
            StrokeMode::Draw => self.pen_width,
            StrokeMode::Erase => self.eraser_width,
        }
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(&PadConfig::default())
    }
}

/// Shape tool bound to a bare letter key.
pub fn tool_for_key(key: Key) -> Option<ShapeTool> {
    ShapeTool::ALL.into_iter().find(|tool| tool.shortcut() == key)
}
