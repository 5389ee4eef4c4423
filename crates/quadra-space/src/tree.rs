//! The quadtree index.
//!
//! [`QuadTree`] owns two [`StepArena`]s: one of [`Quad`]s and one of entity
//! references for leaf arrays. The four top-level quads and their arrays
//! are persistent; everything a split creates is transient. The lifecycle
//! per simulation step is:
//!
//! 1. `reset_transient()`: rewind both arenas, dropping every child quad
//! 2. `reset_for_step()`: empty the four top-level leaves
//! 3. `insert()` for every entity, splitting leaves as they fill
//! 4. `query()`: read the leaf a position resolves to
//!
//! [`QuadTree::begin_step`] performs 1 and 2 in order and hands out a
//! [`StepGuard`] for 3 and 4.

use quadra_arena::{ArenaError, GrowVec, Lifetime, Region, ScratchRegion, StepArena};
use quadra_core::{EntityId, Position, PositionSource, StepId};
use tracing::{debug, trace};

use crate::config::{BoundsPolicy, QuadTreeConfig};
use crate::error::SpaceError;
use crate::inspect::{LeafView, TreeStats};
use crate::quad::Quad;
use crate::quadrant::{QuadPath, Quadrant};
use crate::step::StepGuard;

/// Fixed-depth, lazily subdivided spatial index over point entities.
///
/// # Examples
///
/// ```
/// use quadra_core::{EntityId, Position};
/// use quadra_space::{QuadTree, QuadTreeConfig};
///
/// let positions = vec![Position::new(100.0, 100.0), Position::new(-100.0, 100.0)];
/// let mut tree = QuadTree::new(QuadTreeConfig::new(2000.0)).unwrap();
///
/// let mut step = tree.begin_step().unwrap();
/// step.insert(EntityId(0), positions[0], &positions).unwrap();
/// step.insert(EntityId(1), positions[1], &positions).unwrap();
/// assert_eq!(step.query(Position::new(100.0, 100.0)).unwrap(), &[EntityId(0)]);
/// assert_eq!(step.query(Position::new(-100.0, 100.0)).unwrap(), &[EntityId(1)]);
/// ```
pub struct QuadTree {
    /// Quads. The four top-level quads are persistent, children transient.
    nodes: StepArena<Quad>,
    /// Backing storage for every leaf's entity array.
    lists: StepArena<EntityId>,
    /// Persistent region holding the four top-level quads.
    roots: Region,
    /// Positions gathered for redistribution. Nested splits stack on top.
    scratch: ScratchRegion<(EntityId, Position)>,
    config: QuadTreeConfig,
    step: StepId,
    /// Out-of-extent inserts routed to an edge quad since the last clear.
    clamped: usize,
}

impl QuadTree {
    /// Build a tree with four empty top-level leaves.
    ///
    /// Each top-level quad covers one quarter of the world: centers at
    /// `(±h/2, ±h/2)` with half-width `h/2`, where `h` is
    /// [`QuadTreeConfig::half_extent`].
    pub fn new(config: QuadTreeConfig) -> Result<Self, SpaceError> {
        config.validate()?;
        let mut nodes = StepArena::new(config.node_arena.clone())?;
        let mut lists = StepArena::new(config.list_arena.clone())?;

        let roots = nodes.alloc(4, Lifetime::Persistent)?;
        let half_width = config.half_extent * 0.5;
        let capacity = config.initial_leaf_capacity();
        for quadrant in Quadrant::ALL {
            let entities = GrowVec::with_capacity(&mut lists, capacity, Lifetime::Persistent)?;
            nodes.resolve_mut(&roots)?[quadrant.index() as usize] =
                Quad::new(quadrant.offset() * half_width, half_width, 0, entities);
        }

        debug!(
            half_extent = config.half_extent,
            split_threshold = config.split_threshold,
            max_level = config.max_level,
            "quadtree initialised"
        );

        Ok(Self {
            nodes,
            lists,
            roots,
            scratch: ScratchRegion::new(capacity as usize * 2),
            config,
            step: StepId::default(),
            clamped: 0,
        })
    }

    /// Start a new step: rewind transient storage, clear the top level.
    ///
    /// The returned guard borrows the tree mutably, so nothing read during
    /// the previous step can still be held.
    pub fn begin_step(&mut self) -> Result<StepGuard<'_>, SpaceError> {
        self.reset_transient();
        self.reset_for_step()?;
        self.step = self.step.next();
        debug!(step = %self.step, "quadtree step begun");
        Ok(StepGuard::new(self))
    }

    /// Rewind both arenas' transient pools.
    ///
    /// Every child quad and child array is invalidated. Call
    /// [`reset_for_step`](Self::reset_for_step) next: until then the
    /// top-level quads still name children that no longer exist, and routing
    /// into them fails with a stale-handle error.
    pub fn reset_transient(&mut self) {
        self.nodes.reset_transient();
        self.lists.reset_transient();
    }

    /// Empty the four top-level quads and mark them unsplit.
    ///
    /// Deeper levels are not visited; they disappear with the transient
    /// rewind.
    pub fn reset_for_step(&mut self) -> Result<(), SpaceError> {
        for quad in self.nodes.resolve_mut(&self.roots)? {
            quad.entities.clear();
            quad.children = None;
        }
        self.scratch.reset();
        self.clamped = 0;
        trace!("top-level quads cleared");
        Ok(())
    }

    /// Insert `entity` at `position`.
    ///
    /// `positions` is read again for every entity of a leaf that splits, so
    /// it must know all entities inserted this step. On error the tree is
    /// left as it was before the call.
    pub fn insert<P: PositionSource + ?Sized>(
        &mut self,
        entity: EntityId,
        position: Position,
        positions: &P,
    ) -> Result<(), SpaceError> {
        let outside = self.admit(position)?;
        let leaf = self.walk_from(self.roots, Position::ZERO, position, None)?;
        self.add_to_leaf(leaf, entity, positions)?;
        if outside {
            self.clamped += 1;
            debug!(
                %entity,
                x = position.x,
                y = position.y,
                "entity outside world extent routed to edge quad"
            );
        }
        Ok(())
    }

    /// Entities in the leaf that `position` resolves to.
    pub fn query(&self, position: Position) -> Result<&[EntityId], SpaceError> {
        Ok(self.leaf_at(position)?.entities)
    }

    /// The leaf that `position` resolves to.
    pub fn leaf_at(&self, position: Position) -> Result<LeafView<'_>, SpaceError> {
        self.admit(position)?;
        let leaf = self.walk_from(self.roots, Position::ZERO, position, None)?;
        self.view(self.quad(&leaf)?)
    }

    /// Quadrants taken from the top level down to the resolving leaf.
    pub fn locate(&self, position: Position) -> Result<QuadPath, SpaceError> {
        self.admit(position)?;
        let mut path = QuadPath::new();
        self.walk_from(self.roots, Position::ZERO, position, Some(&mut path))?;
        Ok(path)
    }

    /// Every leaf, in depth-first quadrant order.
    pub fn leaves(&self) -> Result<Vec<LeafView<'_>>, SpaceError> {
        let mut out = Vec::new();
        self.for_each_quad(|quad| {
            if quad.is_leaf() {
                out.push(self.view(quad)?);
            }
            Ok(())
        })?;
        Ok(out)
    }

    /// Shape and population summary.
    pub fn stats(&self) -> Result<TreeStats, SpaceError> {
        let mut stats = TreeStats::default();
        self.for_each_quad(|quad| {
            stats.nodes += 1;
            stats.deepest_level = stats.deepest_level.max(quad.level);
            if quad.is_leaf() {
                let population = quad.entities.len();
                stats.leaves += 1;
                stats.entities += population;
                stats.largest_leaf = stats.largest_leaf.max(population);
            } else {
                stats.internal += 1;
            }
            Ok(())
        })?;
        Ok(stats)
    }

    /// The four top-level quads in [`Quadrant`] order.
    pub fn top_level(&self) -> Result<&[Quad], SpaceError> {
        Ok(self.nodes.resolve(&self.roots)?)
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of steps begun via [`begin_step`](Self::begin_step).
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Entities placed from outside the world extent since the top level
    /// was last cleared.
    pub fn clamped(&self) -> usize {
        self.clamped
    }

    /// Generation of the transient pools.
    pub fn transient_generation(&self) -> u32 {
        self.lists.generation()
    }

    /// Memory held by both arenas, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.nodes.memory_bytes() + self.lists.memory_bytes()
    }

    /// Validate `position`; `Ok(true)` if it lies outside the extent but
    /// the policy allows it.
    fn admit(&self, position: Position) -> Result<bool, SpaceError> {
        if !position.is_finite() {
            return Err(SpaceError::InvalidPosition { position });
        }
        let half_extent = self.config.half_extent;
        let outside = position.x.abs() > half_extent || position.y.abs() > half_extent;
        if outside && self.config.bounds == BoundsPolicy::Reject {
            return Err(SpaceError::OutOfWorldBounds {
                position,
                half_extent,
            });
        }
        Ok(outside)
    }

    /// Descend from a set of four siblings around `center` to a leaf.
    fn walk_from(
        &self,
        mut siblings: Region,
        mut center: Position,
        position: Position,
        mut path: Option<&mut QuadPath>,
    ) -> Result<Region, SpaceError> {
        loop {
            let quadrant = Quadrant::of(position, center);
            if let Some(path) = &mut path {
                path.push(quadrant);
            }
            let node = child(siblings, quadrant)?;
            let quad = self.quad(&node)?;
            match quad.children {
                Some(children) => {
                    siblings = children;
                    center = quad.center;
                }
                None => return Ok(node),
            }
        }
    }

    fn add_to_leaf<P: PositionSource + ?Sized>(
        &mut self,
        node: Region,
        entity: EntityId,
        positions: &P,
    ) -> Result<(), SpaceError> {
        let threshold = self.config.split_threshold as usize;
        let max_level = self.config.max_level;

        let quad = first_mut(self.nodes.resolve_mut(&node)?)?;
        quad.entities.push(&mut self.lists, entity)?;
        if quad.entities.len() <= threshold || quad.level >= max_level {
            return Ok(());
        }

        if let Err(err) = self.split(node, positions) {
            let quad = first_mut(self.nodes.resolve_mut(&node)?)?;
            quad.entities.pop(&self.lists)?;
            return Err(err);
        }
        Ok(())
    }

    /// Turn a leaf into an internal quad with four transient children.
    ///
    /// The parent only becomes internal once every entity has been placed,
    /// so a failure part-way leaves it an intact leaf.
    fn split<P: PositionSource + ?Sized>(
        &mut self,
        node: Region,
        positions: &P,
    ) -> Result<(), SpaceError> {
        let mark = self.scratch.mark();
        let result = self.redistribute(node, mark, positions);
        self.scratch.release(mark);
        result
    }

    fn redistribute<P: PositionSource + ?Sized>(
        &mut self,
        node: Region,
        mark: usize,
        positions: &P,
    ) -> Result<(), SpaceError> {
        let (center, half_width, level, entities) = {
            let quad = self.quad(&node)?;
            (quad.center, quad.half_width, quad.level, quad.entities.clone())
        };

        for &entity in entities.iter(&self.lists)? {
            let position = positions
                .position(entity)
                .ok_or(SpaceError::UnknownEntity { entity })?;
            if !position.is_finite() {
                return Err(SpaceError::InvalidPosition { position });
            }
            self.scratch.push((entity, position));
        }

        let child_half = half_width * 0.5;
        let capacity = self.config.initial_leaf_capacity();
        let children = self.nodes.alloc(4, Lifetime::Transient)?;
        for quadrant in Quadrant::ALL {
            let entities = GrowVec::with_capacity(&mut self.lists, capacity, Lifetime::Transient)?;
            self.nodes.resolve_mut(&children)?[quadrant.index() as usize] = Quad::new(
                center + quadrant.offset() * child_half,
                child_half,
                level + 1,
                entities,
            );
        }

        let end = self.scratch.used();
        for index in mark..end {
            let (entity, position) =
                self.scratch
                    .get(index)
                    .ok_or(ArenaError::IndexOutOfRange {
                        index,
                        len: self.scratch.used(),
                    })?;
            let leaf = self.walk_from(children, center, position, None)?;
            self.add_to_leaf(leaf, entity, positions)?;
        }

        first_mut(self.nodes.resolve_mut(&node)?)?.children = Some(children);
        debug!(
            level,
            x = center.x,
            y = center.y,
            population = end - mark,
            "quad split"
        );
        Ok(())
    }

    fn quad(&self, node: &Region) -> Result<&Quad, SpaceError> {
        Ok(first(self.nodes.resolve(node)?)?)
    }

    fn view<'a>(&'a self, quad: &Quad) -> Result<LeafView<'a>, SpaceError> {
        Ok(LeafView {
            center: quad.center,
            half_width: quad.half_width,
            level: quad.level,
            entities: quad.entities.as_slice(&self.lists)?,
        })
    }

    /// Pre-order walk over every live quad.
    fn for_each_quad(
        &self,
        mut visit: impl FnMut(&Quad) -> Result<(), SpaceError>,
    ) -> Result<(), SpaceError> {
        let mut pending = Vec::with_capacity(16);
        push_siblings(&mut pending, self.roots);
        while let Some(node) = pending.pop() {
            let quad = self.quad(&node)?;
            if let Some(children) = quad.children {
                push_siblings(&mut pending, children);
            }
            visit(quad)?;
        }
        Ok(())
    }
}

fn child(siblings: Region, quadrant: Quadrant) -> Result<Region, ArenaError> {
    siblings
        .element(quadrant.index())
        .ok_or(ArenaError::IndexOutOfRange {
            index: quadrant.index() as usize,
            len: siblings.len() as usize,
        })
}

/// Push in reverse so that popping yields `NorthWest` first.
fn push_siblings(pending: &mut Vec<Region>, siblings: Region) {
    pending.extend(
        Quadrant::ALL
            .iter()
            .rev()
            .filter_map(|q| siblings.element(q.index())),
    );
}

fn first<T>(slots: &[T]) -> Result<&T, ArenaError> {
    slots
        .first()
        .ok_or(ArenaError::IndexOutOfRange { index: 0, len: 0 })
}

fn first_mut<T>(slots: &mut [T]) -> Result<&mut T, ArenaError> {
    slots
        .first_mut()
        .ok_or(ArenaError::IndexOutOfRange { index: 0, len: 0 })
}
