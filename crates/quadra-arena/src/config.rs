//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for a [`StepArena`](crate::StepArena).
///
/// Sizes are counted in elements of the arena's element type, not bytes.
/// Both lifetimes share the same segment size but have separate segment
/// budgets. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of each segment in elements.
    ///
    /// Default: 65_536. A longer allocation gets a segment of its own
    /// length, counted against the same budget.
    pub segment_size: u32,

    /// Maximum number of persistent segments.
    ///
    /// Default: 4. Persistent memory only grows when a long-lived array
    /// outgrows its capacity.
    pub max_persistent_segments: u16,

    /// Maximum number of transient segments.
    ///
    /// Default: 64. Transient segments are kept across rewinds and reused.
    pub max_transient_segments: u16,
}

impl ArenaConfig {
    /// Default segment size in elements.
    pub const DEFAULT_SEGMENT_SIZE: u32 = 65_536;

    /// Default persistent segment budget.
    pub const DEFAULT_MAX_PERSISTENT_SEGMENTS: u16 = 4;

    /// Default transient segment budget.
    pub const DEFAULT_MAX_TRANSIENT_SEGMENTS: u16 = 64;

    /// Create a config with the given segment size and default budgets.
    pub fn new(segment_size: u32) -> Self {
        Self {
            segment_size,
            max_persistent_segments: Self::DEFAULT_MAX_PERSISTENT_SEGMENTS,
            max_transient_segments: Self::DEFAULT_MAX_TRANSIENT_SEGMENTS,
        }
    }

    /// Set the persistent segment budget.
    pub fn with_max_persistent_segments(mut self, max: u16) -> Self {
        self.max_persistent_segments = max;
        self
    }

    /// Set the transient segment budget.
    pub fn with_max_transient_segments(mut self, max: u16) -> Self {
        self.max_transient_segments = max;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.segment_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "segment_size must be >= 1".into(),
            });
        }
        if self.max_persistent_segments == 0 || self.max_transient_segments == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "each lifetime needs at least one segment (persistent {}, transient {})",
                    self.max_persistent_segments, self.max_transient_segments,
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEGMENT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_size, ArenaConfig::DEFAULT_SEGMENT_SIZE);
    }

    #[test]
    fn zero_segment_size_rejected() {
        let config = ArenaConfig::new(0);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_budget_rejected() {
        let config = ArenaConfig::new(16).with_max_transient_segments(0);
        assert!(config.validate().is_err());
    }
}
