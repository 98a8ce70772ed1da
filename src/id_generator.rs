use crate::shape::ShapeId;

/// Hands out shape identifiers for a single scene.
///
/// Identifiers only ever increase, so a removed shape's id is never handed out
/// again; undo restores the removed snapshot with the id it already carries.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdGenerator::new();
        let a = ids.generate_id();
        let b = ids.generate_id();
        assert!(b > a);
        assert_eq!(ids.generate_id(), ShapeId(3));
    }
}
