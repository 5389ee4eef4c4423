//! Entity positions and the [`PositionSource`] trait.

use indexmap::IndexMap;

use crate::id::EntityId;

/// 2D world-space position.
pub type Position = glam::Vec2;

/// Read access to the current position of host entities.
///
/// The quadtree never copies entity state. It reads a position when an
/// entity is inserted and again when a split redistributes a leaf, so
/// the source must stay unchanged for the duration of a step's inserts.
pub trait PositionSource {
    /// Current position of `entity`, or `None` if the entity is unknown.
    fn position(&self, entity: EntityId) -> Option<Position>;
}

impl PositionSource for [Position] {
    fn position(&self, entity: EntityId) -> Option<Position> {
        self.get(entity.index()).copied()
    }
}

impl PositionSource for Vec<Position> {
    fn position(&self, entity: EntityId) -> Option<Position> {
        self.as_slice().position(entity)
    }
}

impl PositionSource for IndexMap<EntityId, Position> {
    fn position(&self, entity: EntityId) -> Option<Position> {
        self.get(&entity).copied()
    }
}

impl<P: PositionSource + ?Sized> PositionSource for &P {
    fn position(&self, entity: EntityId) -> Option<Position> {
        (**self).position(entity)
    }
}
