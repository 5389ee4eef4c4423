//! Error types for quadtree operations.

use std::error::Error;
use std::fmt;

use quadra_arena::ArenaError;
use quadra_core::{EntityId, Position};

/// Errors arising from tree construction, insertion, or queries.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// A position lies outside the world extent and the tree rejects such
    /// positions ([`BoundsPolicy::Reject`](crate::BoundsPolicy::Reject)).
    OutOfWorldBounds {
        /// The offending position.
        position: Position,
        /// Half-width of the square world centered at the origin.
        half_extent: f32,
    },
    /// A position with a NaN or infinite component.
    InvalidPosition {
        /// The offending position.
        position: Position,
    },
    /// The position source has no entry for an entity the tree holds.
    UnknownEntity {
        /// The entity without a position.
        entity: EntityId,
    },
    /// The tree configuration is invalid.
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
    /// The underlying arena refused an allocation or a stale handle was hit.
    Arena(ArenaError),
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfWorldBounds {
                position,
                half_extent,
            } => {
                write!(
                    f,
                    "position ({}, {}) outside world extent [-{half_extent}, {half_extent}]",
                    position.x, position.y
                )
            }
            Self::InvalidPosition { position } => {
                write!(f, "non-finite position ({}, {})", position.x, position.y)
            }
            Self::UnknownEntity { entity } => write!(f, "no position for entity {entity}"),
            Self::InvalidConfig { reason } => write!(f, "invalid quadtree config: {reason}"),
            Self::Arena(err) => write!(f, "arena: {err}"),
        }
    }
}

impl Error for SpaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArenaError> for SpaceError {
    fn from(err: ArenaError) -> Self {
        Self::Arena(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_errors_convert_and_chain() {
        let err: SpaceError = ArenaError::StaleHandle {
            handle_generation: 1,
            current_generation: 2,
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("arena: stale handle"));
    }

    #[test]
    fn bounds_message_names_extent() {
        let err = SpaceError::OutOfWorldBounds {
            position: Position::new(5000.0, 0.0),
            half_extent: 4000.0,
        };
        assert_eq!(
            err.to_string(),
            "position (5000, 0) outside world extent [-4000, 4000]"
        );
        assert!(err.source().is_none());
    }
}
