//! Per-step access to a tree.
//!
//! [`StepGuard`] is returned by [`QuadTree::begin_step`]. It holds the tree
//! mutably for the whole step, so slices returned by its queries cannot
//! outlive the transient storage they point into.

use quadra_core::{EntityId, Position, PositionSource, StepId};
use tracing::{debug, warn};

use crate::error::SpaceError;
use crate::inspect::{LeafView, TreeStats};
use crate::quadrant::QuadPath;
use crate::tree::QuadTree;

/// Outcome of [`StepGuard::insert_all`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertReport {
    /// Entities placed in the tree.
    pub inserted: usize,
    /// Entities that were refused, with the reason.
    pub rejected: Vec<(EntityId, SpaceError)>,
    /// Inserted entities that lay outside the world extent and were routed
    /// to an edge quad.
    pub clamped: usize,
}

impl InsertReport {
    /// Whether every entity was placed.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Exclusive handle to a [`QuadTree`] for one step.
pub struct StepGuard<'a> {
    tree: &'a mut QuadTree,
}

impl<'a> StepGuard<'a> {
    pub(crate) fn new(tree: &'a mut QuadTree) -> Self {
        Self { tree }
    }

    /// The step this guard belongs to.
    pub fn step(&self) -> StepId {
        self.tree.step()
    }

    /// Insert one entity. See [`QuadTree::insert`].
    pub fn insert<P: PositionSource + ?Sized>(
        &mut self,
        entity: EntityId,
        position: Position,
        positions: &P,
    ) -> Result<(), SpaceError> {
        self.tree.insert(entity, position, positions)
    }

    /// Insert every entity in `entities`, reading positions from `positions`.
    ///
    /// A refused entity does not stop the rest; it is recorded in the
    /// report. Entities the source has no position for are refused with
    /// [`SpaceError::UnknownEntity`].
    pub fn insert_all<I, P>(&mut self, entities: I, positions: &P) -> InsertReport
    where
        I: IntoIterator<Item = EntityId>,
        P: PositionSource + ?Sized,
    {
        let mut report = InsertReport::default();
        let clamped_before = self.tree.clamped();
        for entity in entities {
            let result = match positions.position(entity) {
                Some(position) => self.tree.insert(entity, position, positions),
                None => Err(SpaceError::UnknownEntity { entity }),
            };
            match result {
                Ok(()) => report.inserted += 1,
                Err(err) => {
                    warn!(%entity, error = %err, "entity not inserted");
                    report.rejected.push((entity, err));
                }
            }
        }
        report.clamped = self.tree.clamped().saturating_sub(clamped_before);
        if report.clamped > 0 {
            warn!(
                step = %self.tree.step(),
                clamped = report.clamped,
                "entities outside world extent routed to edge quads"
            );
        }
        debug!(
            step = %self.tree.step(),
            inserted = report.inserted,
            rejected = report.rejected.len(),
            "bulk insert finished"
        );
        report
    }

    /// Entities in the leaf `position` resolves to.
    pub fn query(&self, position: Position) -> Result<&[EntityId], SpaceError> {
        self.tree.query(position)
    }

    /// The leaf `position` resolves to.
    pub fn leaf_at(&self, position: Position) -> Result<LeafView<'_>, SpaceError> {
        self.tree.leaf_at(position)
    }

    /// Quadrants taken from the top level down to the resolving leaf.
    pub fn locate(&self, position: Position) -> Result<QuadPath, SpaceError> {
        self.tree.locate(position)
    }

    /// Every leaf, depth first.
    pub fn leaves(&self) -> Result<Vec<LeafView<'_>>, SpaceError> {
        self.tree.leaves()
    }

    /// Shape and population summary.
    pub fn stats(&self) -> Result<TreeStats, SpaceError> {
        self.tree.stats()
    }

    /// Read-only access to the tree.
    pub fn tree(&self) -> &QuadTree {
        self.tree
    }
}
