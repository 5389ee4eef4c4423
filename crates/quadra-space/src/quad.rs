//! A single quadtree node.

use quadra_arena::{GrowVec, Region};
use quadra_core::{EntityId, Position};

/// One square cell of the tree.
///
/// A quad is a leaf while `children` is `None`; its `entities` array then
/// holds the references routed to it. Once split, `children` names a
/// region of exactly four quads (in [`Quadrant`](crate::Quadrant) order) and
/// the entity array is abandoned.
#[derive(Clone, Debug, Default)]
pub struct Quad {
    pub(crate) center: Position,
    pub(crate) half_width: f32,
    pub(crate) level: u8,
    pub(crate) entities: GrowVec<EntityId>,
    pub(crate) children: Option<Region>,
}

impl Quad {
    pub(crate) fn new(
        center: Position,
        half_width: f32,
        level: u8,
        entities: GrowVec<EntityId>,
    ) -> Self {
        Self {
            center,
            half_width,
            level,
            entities,
            children: None,
        }
    }

    /// Center of the square.
    pub fn center(&self) -> Position {
        self.center
    }

    /// Half the side length.
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Subdivision level; 0 for the top-level quads.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether this quad still holds entities directly.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Region of the four children, if split.
    pub fn children(&self) -> Option<Region> {
        self.children
    }

    /// Entities held directly. Always 0 once split.
    pub fn population(&self) -> usize {
        if self.is_leaf() {
            self.entities.len()
        } else {
            0
        }
    }

    /// Whether `position` lies inside the closed square.
    pub fn contains(&self, position: Position) -> bool {
        square_contains(self.center, self.half_width, position)
    }
}

/// Closed-square membership shared by [`Quad`] and
/// [`LeafView`](crate::LeafView).
pub(crate) fn square_contains(center: Position, half_width: f32, position: Position) -> bool {
    let offset = (position - center).abs();
    offset.x <= half_width && offset.y <= half_width
}
