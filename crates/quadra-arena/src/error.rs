//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena and container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A container or segment pool cannot hold the requested elements.
    ///
    /// Raised by a [`FixedVec`](crate::FixedVec) at capacity and by a
    /// lifetime whose segment budget is exhausted.
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Elements available to the request.
        capacity: usize,
    },
    /// A transient [`Region`](crate::Region) from a generation that has
    /// been rewound.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u32,
        /// The arena's current transient generation.
        current_generation: u32,
    },
    /// A checked index past the container's length.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The container's length.
        len: usize,
    },
    /// The arena configuration is invalid.
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, capacity {capacity}"
                )
            }
            Self::StaleHandle {
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, current {current_generation}"
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_generations() {
        let err = ArenaError::StaleHandle {
            handle_generation: 3,
            current_generation: 5,
        };
        assert_eq!(err.to_string(), "stale handle: generation 3, current 5");
    }

    #[test]
    fn display_capacity() {
        let err = ArenaError::CapacityExceeded {
            requested: 9,
            capacity: 8,
        };
        assert!(err.to_string().contains("requested 9"));
    }
}
