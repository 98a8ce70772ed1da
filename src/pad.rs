use egui::{Color32, Context, Key, Modifiers, Pos2, Vec2};

use crate::command::{Command, CommandHistory};
use crate::config::PadConfig;
use crate::input::shortcuts::{KeyAction, key_action};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::shape::{BraceOrientation, Handle, HandleDrag, LineStyle, ShapeId, ShapeKind};
use crate::state::EditorState;
use crate::stroke::{MutableStroke, StrokeMode};
use crate::tools::{AxisLock, ShapeTool, ToolMode, ToolState, track_endpoint};

/// One draft pad instance: scene, history, tools and the gesture in flight.
///
/// All methods take canvas-local coordinates. Every mutation schedules a
/// redraw; the host calls [`DraftPad::redraw_if_pending`] once per frame.
pub struct DraftPad {
    open: bool,
    close_requested: bool,
    scene: Scene,
    history: CommandHistory,
    tools: ToolState,
    state: EditorState,
    renderer: Renderer,
    config: PadConfig,
}

impl Default for DraftPad {
    fn default() -> Self {
        Self::new(PadConfig::default())
    }
}

impl DraftPad {
    pub fn new(config: PadConfig) -> Self {
        Self {
            open: false,
            close_requested: false,
            scene: Scene::new(),
            history: CommandHistory::new(),
            tools: ToolState::new(&config),
            state: EditorState::Idle,
            renderer: Renderer::new(),
            config,
        }
    }

    /// Starts a fresh session on `ctx`. Nothing from a previous session survives.
    pub fn open(&mut self, ctx: &Context) {
        log::info!("Opening draft pad");
        self.reset_session();
        self.renderer.attach(ctx);
        self.open = true;
        self.close_requested = false;
    }

    /// Ends the session, discarding the drawing and releasing the canvas.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        log::info!("Closing draft pad");
        self.config.remember_tools(&self.tools);
        self.reset_session();
        self.renderer.detach();
        self.open = false;
        self.close_requested = false;
    }

    fn reset_session(&mut self) {
        self.scene = Scene::new();
        self.history.clear();
        self.state = EditorState::Idle;
        self.tools = ToolState::new(&self.config);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Set by Escape (with nothing left to unwind) or the close control.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Config including the pen settings currently in use.
    pub fn current_config(&self) -> PadConfig {
        let mut config = self.config.clone();
        config.remember_tools(&self.tools);
        config
    }

    pub fn resize(&mut self, size: Vec2, pixels_per_point: f32) {
        self.renderer.resize(size, pixels_per_point);
    }

    pub fn redraw_if_pending(&mut self) -> bool {
        self.renderer
            .redraw_if_pending(&self.scene, self.state.active_stroke())
    }

    // ---- Pointer -------------------------------------------------------------

    pub fn pointer_down(&mut self, pos: Pos2, modifiers: Modifiers) {
        if !self.state.is_idle() {
            // A down without a matching up (e.g. focus loss); close that gesture first.
            self.pointer_up(pos);
        }

        if self.commit_pending_line(pos) {
            return;
        }

        if let Some(id) = self.scene.confirming().or(self.scene.selected()) {
            if self.begin_drag(id, pos, modifiers) {
                return;
            }
            if self.scene.confirming().is_some() {
                self.finish();
                return;
            }
            self.scene.set_selected(None);
            self.renderer.schedule();
        }

        // Alt-press picks up a committed shape; a plain press always creates.
        if modifiers.alt {
            if let Some(id) = self.scene.shape_at(pos) {
                self.scene.set_selected(Some(id));
                self.begin_drag(id, pos, modifiers);
                self.renderer.schedule();
                return;
            }
        }

        match self.tools.mode() {
            ToolMode::Shape(tool) => self.place_shape(tool, pos),
            ToolMode::Draw | ToolMode::Erase => {
                let mut stroke = MutableStroke::new(
                    self.tools.ink(),
                    self.tools.pen_color(),
                    self.tools.stroke_width(),
                );
                stroke.add_point(pos);
                self.state = EditorState::Drawing { stroke };
                self.renderer.schedule();
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        match &mut self.state {
            EditorState::Drawing { stroke } => {
                stroke.add_point(pos);
                self.renderer.schedule();
            }
            EditorState::DraggingHandle { drag } => {
                let shape = drag.apply(pos);
                if self.scene.replace_shape(shape).is_none() {
                    log::warn!("Dragged shape {} vanished, ending drag", drag.shape_id());
                    self.state = EditorState::Idle;
                }
                self.renderer.schedule();
            }
            EditorState::Idle => {
                let lock = self.tools.axis_lock();
                if let Some(line) = self.scene.pending_mut() {
                    track_endpoint(line, pos, lock);
                    self.renderer.schedule();
                }
            }
        }
    }

    /// Ends the gesture in flight. Pointer-leave is routed here as well.
    pub fn pointer_up(&mut self, _pos: Pos2) {
        match self.state.take() {
            EditorState::Drawing { stroke } => {
                if stroke.is_empty() {
                    return;
                }
                let stroke = stroke.finish();
                let index = self.scene.push_stroke(stroke.clone());
                self.history.record(Command::AddStroke { index, stroke });
                self.renderer.schedule();
            }
            EditorState::DraggingHandle { drag } => self.end_drag(drag),
            EditorState::Idle => {}
        }
    }

    /// Records a finished reshape of a committed shape.
    fn end_drag(&mut self, drag: HandleDrag) {
        let id = drag.shape_id();
        // Reshaping a confirming shape becomes part of its AddShape.
        if self.scene.confirming() == Some(id) {
            return;
        }
        match self.scene.shape(id) {
            Some(after) if after != drag.before() => {
                self.history.record(Command::UpdateShape {
                    id,
                    before: drag.before().clone(),
                    after: after.clone(),
                });
            }
            _ => {}
        }
    }

    /// Leaves the gesture in flight before history is replayed. A reshape is
    /// kept as its own entry; a half-drawn stroke is dropped.
    fn settle_gesture(&mut self) {
        if let EditorState::DraggingHandle { drag } = self.state.take() {
            self.end_drag(drag);
        }
    }

    /// Second click of a two-click line: fix the endpoint and start confirming.
    fn commit_pending_line(&mut self, pos: Pos2) -> bool {
        let lock = self.tools.axis_lock();
        let Some(mut line) = self.scene.take_pending() else {
            return false;
        };
        track_endpoint(&mut line, pos, lock);
        let id = line.id;
        let dashed = matches!(line.kind, ShapeKind::Line { style: LineStyle::Dashed, .. });
        self.scene.add_shape(line);
        self.scene.set_confirming(Some(id));
        self.scene.set_selected(Some(id));
        if !dashed {
            self.tools.set_axis_lock(AxisLock::Horizontal);
        }
        log::debug!("Committed line {}", id);
        self.renderer.schedule();
        true
    }

    fn place_shape(&mut self, tool: ShapeTool, pos: Pos2) {
        let id = self.scene.next_shape_id();
        let shape = tool.create(id, pos, self.tools.pen_color(), self.tools.pen_width());
        if tool.is_two_click() {
            self.scene.set_pending(shape);
        } else {
            self.scene.add_shape(shape);
            self.scene.set_confirming(Some(id));
        }
        self.scene.set_selected(Some(id));
        log::debug!("Placed {} {}", tool.name(), id);
        self.renderer.schedule();
    }

    fn begin_drag(&mut self, id: ShapeId, pos: Pos2, modifiers: Modifiers) -> bool {
        let Some(shape) = self.scene.shape(id) else {
            return false;
        };
        let Some(handle) = shape.pick_handle(pos) else {
            return false;
        };
        let rotate = modifiers.shift && handle == Handle::Center;
        log::debug!("Dragging {:?} of {}", handle, id);
        self.state = EditorState::DraggingHandle {
            drag: HandleDrag::new(shape.clone(), handle, pos, rotate),
        };
        true
    }

    // ---- Confirmation --------------------------------------------------------

    /// Commits the confirming shape into history. Returns false when nothing
    /// was confirming.
    pub fn finish(&mut self) -> bool {
        let Some(id) = self.scene.confirming() else {
            return false;
        };
        self.end_drag_on(id);
        let Some(shape) = self.scene.shape(id).cloned() else {
            self.scene.set_confirming(None);
            return false;
        };
        log::debug!("Finished {} {}", shape.shape_type(), id);
        self.history.record(Command::AddShape { shape });
        self.scene.set_confirming(None);
        self.scene.set_selected(None);
        self.tools.set_shape_tool(None);
        self.renderer.schedule();
        true
    }

    /// Drops the confirming shape without a trace in history. The tool stays active.
    pub fn cancel(&mut self) -> bool {
        let Some(id) = self.scene.confirming() else {
            return false;
        };
        self.end_drag_on(id);
        self.scene.remove_shape(id);
        log::debug!("Cancelled {}", id);
        self.renderer.schedule();
        true
    }

    fn end_drag_on(&mut self, id: ShapeId) {
        if self.state.active_drag().map(|drag| drag.shape_id()) == Some(id) {
            self.state = EditorState::Idle;
        }
    }

    /// Unwinds one level: confirming shape, pending line, shape tool, then the pad.
    pub fn escape(&mut self) {
        if self.cancel() {
            return;
        }
        if self.scene.take_pending().is_some() {
            self.renderer.schedule();
            return;
        }
        if self.tools.shape_tool().is_some() {
            self.tools.set_shape_tool(None);
            self.scene.set_selected(None);
            self.renderer.schedule();
            return;
        }
        log::debug!("Escape with nothing to unwind, requesting close");
        self.close_requested = true;
    }

    // ---- Tools ---------------------------------------------------------------

    pub fn select_shape_tool(&mut self, tool: ShapeTool) {
        self.finish();
        self.scene.take_pending();
        self.scene.set_selected(None);
        self.tools.set_shape_tool(Some(tool));
        log::debug!("Selected {} tool", tool.name());
        self.renderer.schedule();
    }

    pub fn select_ink(&mut self, mode: StrokeMode) {
        self.finish();
        self.scene.take_pending();
        self.scene.set_selected(None);
        self.tools.set_shape_tool(None);
        self.tools.set_ink(mode);
        self.renderer.schedule();
    }

    pub fn set_axis_lock(&mut self, lock: AxisLock) {
        self.tools.set_axis_lock(lock);
        let Some(line) = self.scene.pending_mut() else {
            return;
        };
        // Re-clamp the free endpoint against the new lock.
        if let ShapeKind::Line { end, .. } = line.kind {
            track_endpoint(line, end, lock);
            self.renderer.schedule();
        }
    }

    /// Picking a colour also switches back to the pen.
    pub fn set_pen_color(&mut self, color: Color32) {
        self.tools.set_pen_color(color);
        self.tools.set_ink(StrokeMode::Draw);
    }

    pub fn set_pen_width(&mut self, width: f32) {
        self.tools.set_pen_width(width);
    }

    /// Picking an eraser width also switches to the eraser.
    pub fn set_eraser_width(&mut self, width: f32) {
        self.tools.set_eraser_width(width);
        self.tools.set_ink(StrokeMode::Erase);
    }

    // ---- Editing -------------------------------------------------------------

    pub fn undo(&mut self) {
        self.settle_gesture();
        match self.history.undo(&mut self.scene) {
            Ok(true) => self.renderer.schedule(),
            Ok(false) => {}
            Err(err) => {
                log::warn!("Undo failed: {}", err);
                self.renderer.schedule();
            }
        }
    }

    pub fn redo(&mut self) {
        self.settle_gesture();
        match self.history.redo(&mut self.scene) {
            Ok(true) => self.renderer.schedule(),
            Ok(false) => {}
            Err(err) => {
                log::warn!("Redo failed: {}", err);
                self.renderer.schedule();
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Wipes the drawing and both history stacks.
    pub fn clear(&mut self) {
        log::info!("Clearing draft pad");
        self.state = EditorState::Idle;
        self.scene.clear();
        self.history.clear();
        self.renderer.schedule();
    }

    /// Removes the selected shape. A confirming shape is cancelled and a
    /// pending line dropped instead.
    pub fn delete_selected(&mut self) -> bool {
        if self.cancel() {
            return true;
        }
        if self.scene.take_pending().is_some() {
            self.renderer.schedule();
            return true;
        }
        let Some(id) = self.scene.selected() else {
            return false;
        };
        self.end_drag_on(id);
        let Some((index, shape)) = self.scene.remove_shape(id) else {
            return false;
        };
        log::debug!("Removed {} {}", shape.shape_type(), id);
        self.history.record(Command::RemoveShape { index, shape });
        self.renderer.schedule();
        true
    }

    /// Points the confirming or selected brace in `orientation`.
    pub fn set_brace_orientation(&mut self, orientation: BraceOrientation) -> bool {
        let Some(id) = self.scene.confirming().or(self.scene.selected()) else {
            return false;
        };
        let confirming = self.scene.confirming() == Some(id);
        let Some(shape) = self.scene.shape_mut(id) else {
            return false;
        };
        let before = shape.clone();
        let ShapeKind::Brace { orientation: current, .. } = &mut shape.kind else {
            return false;
        };
        if *current == orientation {
            return true;
        }
        *current = orientation;
        let after = shape.clone();
        if !confirming {
            self.history.record(Command::UpdateShape { id, before, after });
        }
        self.renderer.schedule();
        true
    }

    /// Applies a keyboard shortcut. Returns whether the key was used.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let Some(action) = key_action(key, modifiers) else {
            return false;
        };
        match action {
            KeyAction::Undo => self.undo(),
            KeyAction::Redo => self.redo(),
            KeyAction::Finish => return self.finish(),
            KeyAction::Escape => self.escape(),
            KeyAction::Delete => return self.delete_selected(),
            KeyAction::SelectTool(tool) => self.select_shape_tool(tool),
            KeyAction::AxisLock(lock) => self.set_axis_lock(lock),
            KeyAction::Orient(orientation) => return self.set_brace_orientation(orientation),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_unwinds_one_level_at_a_time() {
        let mut pad = DraftPad::default();
        pad.select_shape_tool(ShapeTool::Line);
        pad.pointer_down(Pos2::new(10.0, 10.0), Modifiers::NONE);
        pad.pointer_up(Pos2::new(10.0, 10.0));
        assert!(pad.scene().pending().is_some());

        pad.escape();
        assert!(pad.scene().pending().is_none());
        assert_eq!(pad.tools().shape_tool(), Some(ShapeTool::Line));

        pad.escape();
        assert_eq!(pad.tools().shape_tool(), None);
        assert!(!pad.close_requested());

        pad.escape();
        assert!(pad.close_requested());
    }

    #[test]
    fn cancel_leaves_no_history() {
        let mut pad = DraftPad::default();
        pad.select_shape_tool(ShapeTool::Square);
        pad.pointer_down(Pos2::new(50.0, 50.0), Modifiers::NONE);
        pad.pointer_up(Pos2::new(50.0, 50.0));
        assert_eq!(pad.scene().shapes().len(), 1);

        assert!(pad.cancel());
        assert!(pad.scene().shapes().is_empty());
        assert!(!pad.can_undo());
        assert_eq!(pad.tools().shape_tool(), Some(ShapeTool::Square));
    }

    #[test]
    fn switching_tools_finishes_confirming_shape() {
        let mut pad = DraftPad::default();
        pad.select_shape_tool(ShapeTool::Circle);
        pad.pointer_down(Pos2::new(100.0, 100.0), Modifiers::NONE);
        pad.pointer_up(Pos2::new(100.0, 100.0));

        pad.select_shape_tool(ShapeTool::Triangle);
        assert_eq!(pad.scene().confirming(), None);
        assert_eq!(pad.history().undo_stack().len(), 1);
        assert_eq!(pad.tools().shape_tool(), Some(ShapeTool::Triangle));
    }

    #[test]
    fn colour_pick_returns_to_pen() {
        let mut pad = DraftPad::default();
        pad.select_ink(StrokeMode::Erase);
        pad.set_pen_color(Color32::RED);
        assert_eq!(pad.tools().mode(), ToolMode::Draw);
        assert_eq!(pad.tools().pen_color(), Color32::RED);
    }

    #[test]
    fn eraser_width_pick_switches_to_eraser() {
        let mut pad = DraftPad::default();
        pad.set_eraser_width(24.0);
        assert_eq!(pad.tools().mode(), ToolMode::Erase);
        assert_eq!(pad.tools().stroke_width(), 24.0);
    }

    #[test]
    fn clear_empties_scene_and_history() {
        let mut pad = DraftPad::default();
        pad.pointer_down(Pos2::new(0.0, 0.0), Modifiers::NONE);
        pad.pointer_up(Pos2::new(0.0, 0.0));
        assert!(pad.can_undo());

        pad.clear();
        assert!(pad.scene().is_empty());
        assert!(!pad.can_undo());
        assert!(!pad.can_redo());
    }
}
