use egui::Pos2;

use crate::geometry::hit_testing;
use crate::id_generator::IdGenerator;
use crate::shape::{Shape, ShapeId};
use crate::stroke::Stroke;

/// Everything currently on the draft pad.
///
/// Shapes and strokes are kept in insertion order, which is also their
/// z-order: shapes are drawn first, strokes on top of them. Besides the two
/// committed collections the scene tracks the transient editing state:
///
/// - the *pending* line of a two-click line gesture (not yet in `shapes`)
/// - the *confirming* shape, placed but awaiting finish or cancel
/// - the *selected* shape whose handles are interactive
#[derive(Debug, Default)]
pub struct Scene {
    strokes: Vec<Stroke>,
    shapes: Vec<Shape>,
    pending: Option<Shape>,
    confirming: Option<ShapeId>,
    selected: Option<ShapeId>,
    ids: IdGenerator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.shapes.is_empty() && self.pending.is_none()
    }

    /// Appends a finished stroke, returning its index.
    pub fn push_stroke(&mut self, stroke: Stroke) -> usize {
        self.strokes.push(stroke);
        self.strokes.len() - 1
    }

    /// Drops the stroke at `index` and everything drawn after it.
    pub fn truncate_strokes(&mut self, index: usize) -> Option<Stroke> {
        if index >= self.strokes.len() {
            return None;
        }
        let removed = self.strokes.drain(index..).next();
        removed
    }

    pub fn next_shape_id(&mut self) -> ShapeId {
        self.ids.generate_id()
    }

    /// Appends a shape on top of the others, returning its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Puts a shape back at its previous position in the z-order.
    pub fn insert_shape(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Removes a shape, returning where it was and what it looked like.
    ///
    /// Clears the confirming and selected markers if they referred to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        if self.confirming == Some(id) {
            self.confirming = None;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some((index, shape))
    }

    /// Replaces the shape with the same id, returning the old version.
    pub fn replace_shape(&mut self, shape: Shape) -> Option<Shape> {
        let slot = self.shape_mut(shape.id)?;
        Some(std::mem::replace(slot, shape))
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id == id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    /// Topmost committed shape under `pos`.
    pub fn shape_at(&self, pos: Pos2) -> Option<ShapeId> {
        hit_testing::topmost_hit(&self.shapes, pos)
    }

    pub fn pending(&self) -> Option<&Shape> {
        self.pending.as_ref()
    }

    pub fn pending_mut(&mut self) -> Option<&mut Shape> {
        self.pending.as_mut()
    }

    pub fn set_pending(&mut self, shape: Shape) {
        self.pending = Some(shape);
    }

    pub fn take_pending(&mut self) -> Option<Shape> {
        let pending = self.pending.take();
        if let Some(shape) = &pending {
            if self.selected == Some(shape.id) {
                self.selected = None;
            }
        }
        pending
    }

    pub fn confirming(&self) -> Option<ShapeId> {
        self.confirming
    }

    pub fn set_confirming(&mut self, id: Option<ShapeId>) {
        self.confirming = id;
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<ShapeId>) {
        self.selected = id;
    }

    /// The shape whose handles are live: the pending line, otherwise the
    /// selected committed shape.
    pub fn selected_shape(&self) -> Option<&Shape> {
        let id = self.selected?;
        match &self.pending {
            Some(pending) if pending.id == id => Some(pending),
            _ => self.shape(id),
        }
    }

    /// Empties the scene. The id counter keeps running so ids stay unique.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.shapes.clear();
        self.pending = None;
        self.confirming = None;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::factory;
    use crate::stroke::StrokeMode;
    use egui::Color32;

    #[test]
    fn removing_a_shape_clears_its_markers() {
        let mut scene = Scene::new();
        let id = scene.next_shape_id();
        scene.add_shape(factory::create_circle(id, Pos2::ZERO, Color32::BLACK, 2.0));
        scene.set_confirming(Some(id));
        scene.set_selected(Some(id));

        let (index, shape) = scene.remove_shape(id).unwrap();
        assert_eq!(index, 0);
        assert_eq!(shape.id, id);
        assert_eq!(scene.confirming(), None);
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut scene = Scene::new();
        let first = scene.next_shape_id();
        scene.clear();
        assert!(scene.next_shape_id() > first);
    }

    #[test]
    fn truncate_drops_later_strokes() {
        let mut scene = Scene::new();
        for i in 0..3 {
            scene.push_stroke(Stroke::new(
                StrokeMode::Draw,
                Color32::BLACK,
                4.0,
                vec![Pos2::new(i as f32, 0.0)],
            ));
        }
        let removed = scene.truncate_strokes(1).unwrap();
        assert_eq!(removed.points()[0], Pos2::new(1.0, 0.0));
        assert_eq!(scene.strokes().len(), 1);
        assert!(scene.truncate_strokes(5).is_none());
    }
}
