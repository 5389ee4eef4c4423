//! Read-only views of a tree's shape.

use quadra_core::{EntityId, Position};

use crate::quad::square_contains;

/// A leaf and the entities it holds, borrowed from the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafView<'a> {
    /// Center of the leaf square.
    pub center: Position,
    /// Half the side length.
    pub half_width: f32,
    /// Subdivision level; 0 for the top-level quads.
    pub level: u8,
    /// Entities in insertion order.
    pub entities: &'a [EntityId],
}

impl LeafView<'_> {
    /// Whether `position` lies inside the closed leaf square.
    pub fn contains(&self, position: Position) -> bool {
        square_contains(self.center, self.half_width, position)
    }
}

/// Counts gathered by [`QuadTree::stats`](crate::QuadTree::stats).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Live quads, top-level included.
    pub nodes: usize,
    /// Quads without children.
    pub leaves: usize,
    /// Quads that have split.
    pub internal: usize,
    /// Deepest level reached by any quad.
    pub deepest_level: u8,
    /// Entity references held by leaves.
    pub entities: usize,
    /// Population of the fullest leaf.
    pub largest_leaf: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_view_contains_its_border() {
        let view = LeafView {
            center: Position::new(10.0, 10.0),
            half_width: 5.0,
            level: 1,
            entities: &[],
        };
        assert!(view.contains(Position::new(15.0, 5.0)));
        assert!(!view.contains(Position::new(15.5, 10.0)));
    }
}
