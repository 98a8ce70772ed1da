use super::CommandResult;
use crate::error::HistoryError;
use crate::scene::Scene;
use crate::shape::{Shape, ShapeId};
use crate::stroke::Stroke;

/// Reversible scene mutations recorded in the undo history.
///
/// Every variant keeps full snapshots, so a command can be replayed in either
/// direction without consulting the scene for what it used to look like.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A finished freehand stroke appended at `index`.
    AddStroke { index: usize, stroke: Stroke },

    /// A shape committed via finish.
    AddShape { shape: Shape },

    /// A committed shape deleted from `index` in the z-order.
    RemoveShape { index: usize, shape: Shape },

    /// A committed shape reshaped by a handle drag or orientation change.
    UpdateShape {
        id: ShapeId,
        before: Shape,
        after: Shape,
    },
}

impl Command {
    /// Apply the command to the scene (first time or redo).
    pub fn execute(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::AddStroke { index, stroke } => {
                if *index != scene.strokes().len() {
                    return Err(HistoryError::StrokeNotFound(*index));
                }
                scene.push_stroke(stroke.clone());
                Ok(())
            }

            Command::AddShape { shape } => {
                scene.add_shape(shape.clone());
                Ok(())
            }

            Command::RemoveShape { shape, .. } => scene
                .remove_shape(shape.id)
                .map(|_| ())
                .ok_or(HistoryError::ShapeNotFound(shape.id)),

            Command::UpdateShape { id, after, .. } => scene
                .replace_shape(after.clone())
                .map(|_| ())
                .ok_or(HistoryError::ShapeNotFound(*id)),
        }
    }

    /// Revert the command on the scene.
    pub fn undo(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::AddStroke { index, .. } => scene
                .truncate_strokes(*index)
                .map(|_| ())
                .ok_or(HistoryError::StrokeNotFound(*index)),

            Command::AddShape { shape } => scene
                .remove_shape(shape.id)
                .map(|_| ())
                .ok_or(HistoryError::ShapeNotFound(shape.id)),

            Command::RemoveShape { index, shape } => {
                scene.insert_shape(*index, shape.clone());
                Ok(())
            }

            Command::UpdateShape { id, before, .. } => scene
                .replace_shape(before.clone())
                .map(|_| ())
                .ok_or(HistoryError::ShapeNotFound(*id)),
        }
    }

    /// Short description for the history panel.
    pub fn label(&self) -> String {
        match self {
            Command::AddStroke { stroke, .. } => match stroke.mode() {
                crate::stroke::StrokeMode::Draw => "Draw stroke".to_owned(),
                crate::stroke::StrokeMode::Erase => "Erase stroke".to_owned(),
            },
            Command::AddShape { shape } => format!("Add {}", shape.shape_type()),
            Command::RemoveShape { shape, .. } => format!("Remove {}", shape.shape_type()),
            Command::UpdateShape { after, .. } => format!("Edit {}", after.shape_type()),
        }
    }
}
