//! Test utilities for Quadra development.
//!
//! Provides [`PositionTable`], a keyed [`PositionSource`] with a builder
//! API, and deterministic position generators in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;
use quadra_core::{EntityId, Position, PositionSource};

/// Entity positions keyed by id, iterated in insertion order.
///
/// Unlike a `Vec<Position>` source, ids need not be dense, so a test can
/// leave gaps to provoke `UnknownEntity` errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionTable {
    entries: IndexMap<EntityId, Position>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, entity: EntityId, position: Position) -> Self {
        self.set(entity, position);
        self
    }

    /// Insert or move an entity.
    pub fn set(&mut self, entity: EntityId, position: Position) {
        self.entries.insert(entity, position);
    }

    /// Drop an entity, keeping the order of the others.
    pub fn remove(&mut self, entity: EntityId) -> Option<Position> {
        self.entries.shift_remove(&entity)
    }

    /// Entities in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.keys().copied()
    }

    /// `(entity, position)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Position)> + '_ {
        self.entries.iter().map(|(&id, &pos)| (id, pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PositionSource for PositionTable {
    fn position(&self, entity: EntityId) -> Option<Position> {
        self.entries.get(&entity).copied()
    }
}

impl FromIterator<(EntityId, Position)> for PositionTable {
    fn from_iter<I: IntoIterator<Item = (EntityId, Position)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<&[Position]> for PositionTable {
    /// Dense table: entity `i` at `positions[i]`.
    fn from(positions: &[Position]) -> Self {
        positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| (EntityId(i as u32), pos))
            .collect()
    }
}
