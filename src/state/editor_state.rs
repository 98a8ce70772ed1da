//! The pointer-gesture state machine of the draft pad.
//!
//! Only one gesture can be in flight at a time. Pointer-down leaves `Idle`,
//! pointer-up (or the pointer leaving the canvas) returns to it:
//!
//! ```text
//!              ┌──────────────────┐
//!        ┌─────►     Drawing      ├─────┐
//!        │     └──────────────────┘     │
//! ┌──────┴───┐                      ┌───▼──────┐
//! │   Idle   │                      │   Idle   │
//! └──────┬───┘                      └───▲──────┘
//!        │     ┌──────────────────┐     │
//!        └─────►  DraggingHandle  ├─────┘
//!              └──────────────────┘
//! ```
//!
//! The two-click line gesture is not a pointer state: between its clicks the
//! pointer is up, and the half-built line lives in the scene as the pending
//! shape.
use crate::shape::HandleDrag;
use crate::stroke::MutableStroke;

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Idle,
    /// A freehand stroke is accumulating points.
    Drawing { stroke: MutableStroke },
    /// A shape handle follows the pointer.
    DraggingHandle { drag: HandleDrag },
}

impl EditorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn active_stroke(&self) -> Option<&MutableStroke> {
        match self {
            Self::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    pub fn active_drag(&self) -> Option<&HandleDrag> {
        match self {
            Self::DraggingHandle { drag } => Some(drag),
            _ => None,
        }
    }

    /// Leaves the current gesture, handing back whatever it held.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
            Self::DraggingHandle { .. } => "Dragging handle",
        }
    }
}
