//! Quadtree configuration and out-of-extent policy.

use quadra_arena::ArenaConfig;

use crate::error::SpaceError;

/// How the tree treats positions outside its world extent.
///
/// The extent is the square `[-half_extent, half_extent]²`. Positions on
/// the border are inside. Non-finite positions are always rejected,
/// whatever the policy.
///
/// # Examples
///
/// ```
/// use quadra_core::{EntityId, Position};
/// use quadra_space::{BoundsPolicy, QuadTree, QuadTreeConfig, SpaceError};
///
/// let positions = vec![Position::new(9000.0, 0.0)];
///
/// // Clamp: the far-away entity lands in the nearest edge leaf.
/// let mut tree = QuadTree::new(QuadTreeConfig::default()).unwrap();
/// tree.insert(EntityId(0), positions[0], &positions).unwrap();
/// assert_eq!(tree.query(Position::new(3999.0, 1.0)).unwrap(), &[EntityId(0)]);
///
/// // Reject: the same insert is refused.
/// let config = QuadTreeConfig::default().with_bounds(BoundsPolicy::Reject);
/// let mut tree = QuadTree::new(config).unwrap();
/// let err = tree.insert(EntityId(0), positions[0], &positions).unwrap_err();
/// assert!(matches!(err, SpaceError::OutOfWorldBounds { .. }));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundsPolicy {
    /// Route the position by the usual quadrant comparisons. It ends up in
    /// the edge leaf nearest to it.
    #[default]
    Clamp,
    /// Refuse the insert or query with [`SpaceError::OutOfWorldBounds`].
    Reject,
}

/// Configuration for a [`QuadTree`](crate::QuadTree).
///
/// Validated by [`QuadTree::new`](crate::QuadTree::new); immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// Half-width of the square world centered at the origin.
    ///
    /// Default: 4000.0. The four top-level quads each cover one quarter,
    /// with half-width `half_extent / 2`.
    pub half_extent: f32,

    /// A leaf whose population exceeds this splits (unless at `max_level`).
    ///
    /// Default: 10.
    pub split_threshold: u32,

    /// Deepest level a quad may reach. Top-level quads are level 0; quads
    /// at `max_level` never split.
    ///
    /// Default: 4.
    pub max_level: u8,

    /// Initial capacity of every leaf's entity array.
    ///
    /// `None` (default) means twice the split threshold.
    pub leaf_capacity: Option<u32>,

    /// Out-of-extent policy. Default: [`BoundsPolicy::Clamp`].
    pub bounds: BoundsPolicy,

    /// Arena holding quads. Sized in quads.
    pub node_arena: ArenaConfig,

    /// Arena holding leaf entity arrays. Sized in entity references.
    pub list_arena: ArenaConfig,
}

impl QuadTreeConfig {
    /// Default world half-extent.
    pub const DEFAULT_HALF_EXTENT: f32 = 4000.0;

    /// Default split threshold.
    pub const DEFAULT_SPLIT_THRESHOLD: u32 = 10;

    /// Default maximum level.
    pub const DEFAULT_MAX_LEVEL: u8 = 4;

    /// Default node arena segment size, in quads.
    pub const DEFAULT_NODE_SEGMENT_SIZE: u32 = 4096;

    /// Deepest supported level. Beyond this, child half-widths lose
    /// precision in `f32` for any practical world size.
    pub const MAX_LEVEL_LIMIT: u8 = 24;

    /// Create a config for a world of the given half-extent.
    pub fn new(half_extent: f32) -> Self {
        Self {
            half_extent,
            split_threshold: Self::DEFAULT_SPLIT_THRESHOLD,
            max_level: Self::DEFAULT_MAX_LEVEL,
            leaf_capacity: None,
            bounds: BoundsPolicy::default(),
            node_arena: ArenaConfig::new(Self::DEFAULT_NODE_SEGMENT_SIZE),
            list_arena: ArenaConfig::default(),
        }
    }

    /// Set the split threshold.
    pub fn with_split_threshold(mut self, threshold: u32) -> Self {
        self.split_threshold = threshold;
        self
    }

    /// Set the maximum level.
    pub fn with_max_level(mut self, max_level: u8) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set an explicit initial leaf capacity.
    pub fn with_leaf_capacity(mut self, capacity: u32) -> Self {
        self.leaf_capacity = Some(capacity);
        self
    }

    /// Set the out-of-extent policy.
    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the node arena configuration.
    pub fn with_node_arena(mut self, arena: ArenaConfig) -> Self {
        self.node_arena = arena;
        self
    }

    /// Set the list arena configuration.
    pub fn with_list_arena(mut self, arena: ArenaConfig) -> Self {
        self.list_arena = arena;
        self
    }

    /// Initial capacity of leaf entity arrays.
    pub fn initial_leaf_capacity(&self) -> u32 {
        self.leaf_capacity
            .unwrap_or_else(|| self.split_threshold.saturating_mul(2))
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(SpaceError::InvalidConfig {
                reason: format!("half_extent must be finite and > 0 (got {})", self.half_extent),
            });
        }
        if self.split_threshold == 0 {
            return Err(SpaceError::InvalidConfig {
                reason: "split_threshold must be >= 1".into(),
            });
        }
        if self.max_level > Self::MAX_LEVEL_LIMIT {
            return Err(SpaceError::InvalidConfig {
                reason: format!(
                    "max_level must be <= {} (got {})",
                    Self::MAX_LEVEL_LIMIT,
                    self.max_level
                ),
            });
        }
        if self.node_arena.segment_size < 4 {
            return Err(SpaceError::InvalidConfig {
                reason: format!(
                    "node arena segment_size must hold one set of 4 quads (got {})",
                    self.node_arena.segment_size
                ),
            });
        }
        self.node_arena.validate()?;
        self.list_arena.validate()?;
        Ok(())
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HALF_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = QuadTreeConfig::default();
        assert_eq!(config.half_extent, 4000.0);
        assert_eq!(config.split_threshold, 10);
        assert_eq!(config.max_level, 4);
        assert_eq!(config.initial_leaf_capacity(), 20);
        assert_eq!(config.bounds, BoundsPolicy::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn leaf_capacity_follows_threshold_unless_set() {
        let config = QuadTreeConfig::default().with_split_threshold(3);
        assert_eq!(config.initial_leaf_capacity(), 6);
        assert_eq!(config.with_leaf_capacity(1).initial_leaf_capacity(), 1);
    }

    #[test]
    fn rejects_bad_extent() {
        for extent in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                QuadTreeConfig::new(extent).validate(),
                Err(SpaceError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn rejects_zero_threshold_and_deep_trees() {
        assert!(QuadTreeConfig::default()
            .with_split_threshold(0)
            .validate()
            .is_err());
        assert!(QuadTreeConfig::default().with_max_level(25).validate().is_err());
        assert!(QuadTreeConfig::default().with_max_level(0).validate().is_ok());
    }

    #[test]
    fn leaf_capacity_may_exceed_list_segment() {
        let config = QuadTreeConfig::default()
            .with_list_arena(ArenaConfig::new(8))
            .with_leaf_capacity(9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn arena_config_errors_are_wrapped() {
        let config = QuadTreeConfig::default()
            .with_list_arena(ArenaConfig::new(64).with_max_persistent_segments(0));
        assert!(matches!(config.validate(), Err(SpaceError::Arena(_))));
    }
}
