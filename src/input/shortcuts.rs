use egui::{Key, Modifiers};

use crate::shape::BraceOrientation;
use crate::tools::{AxisLock, ShapeTool, tool_for_key};

/// What a key press asks the pad to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Undo,
    Redo,
    Finish,
    Escape,
    Delete,
    SelectTool(ShapeTool),
    AxisLock(AxisLock),
    Orient(BraceOrientation),
}

/// Keyboard binding table.
///
/// Bare letters pick shape tools; axis locks need Shift so that `h` stays
/// Hexagon while `Shift+H` locks horizontally.
pub fn key_action(key: Key, modifiers: Modifiers) -> Option<KeyAction> {
    if modifiers.command {
        return match key {
            Key::Z if modifiers.shift => Some(KeyAction::Redo),
            Key::Z => Some(KeyAction::Undo),
            Key::Y => Some(KeyAction::Redo),
            _ => None,
        };
    }
    if modifiers.alt {
        return None;
    }

    match key {
        Key::Enter => Some(KeyAction::Finish),
        Key::Escape => Some(KeyAction::Escape),
        Key::Delete | Key::Backspace => Some(KeyAction::Delete),
        Key::ArrowLeft => Some(KeyAction::Orient(BraceOrientation::Left)),
        Key::ArrowRight => Some(KeyAction::Orient(BraceOrientation::Right)),
        Key::ArrowUp => Some(KeyAction::Orient(BraceOrientation::Top)),
        Key::ArrowDown => Some(KeyAction::Orient(BraceOrientation::Bottom)),
        Key::H if modifiers.shift => Some(KeyAction::AxisLock(AxisLock::Horizontal)),
        Key::V if modifiers.shift => Some(KeyAction::AxisLock(AxisLock::Vertical)),
        Key::N if modifiers.shift => Some(KeyAction::AxisLock(AxisLock::None)),
        _ if modifiers.shift => None,
        _ => tool_for_key(key).map(KeyAction::SelectTool),
    }
}
