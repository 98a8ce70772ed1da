use super::Command;
use crate::error::HistoryError;
use crate::scene::Scene;

/// Manages the history of recorded commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command whose effect is already applied to the scene.
    pub fn record(&mut self, command: Command) {
        log::debug!("Recording {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear(); // A fresh action discards the redo branch
    }

    /// Execute a command and add it to the history if successful
    pub fn execute(&mut self, command: Command, scene: &mut Scene) -> Result<(), HistoryError> {
        command.execute(scene)?;
        self.record(command);
        Ok(())
    }

    /// Undo the last command. Returns `Ok(false)` when there is nothing to undo.
    ///
    /// A command that no longer applies to the scene is dropped.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<bool, HistoryError> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        command.undo(scene)?;
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Redo the last undone command. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<bool, HistoryError> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        command.execute(scene)?;
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
