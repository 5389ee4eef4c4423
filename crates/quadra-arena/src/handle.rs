//! Region handles and allocation lifetimes.
//!
//! A [`Region`] encodes the physical location of an allocation within a
//! [`StepArena`](crate::StepArena). It is generation-scoped: the
//! `generation` field allows O(1) staleness checks without a lookup table.

use std::fmt;

/// How long an allocation stays valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Lives as long as the arena. Never rewound.
    #[default]
    Persistent,
    /// Invalidated wholesale by [`StepArena::reset_transient`](crate::StepArena::reset_transient).
    Transient,
}

/// Which segment pool a [`Region`] points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// In the persistent pool (generation 0 forever).
    Persistent {
        /// Index into the persistent segment list.
        segment_index: u16,
    },
    /// In the transient pool.
    Transient {
        /// Index into the transient segment list.
        segment_index: u16,
    },
}

impl Location {
    /// The lifetime of the pool this location belongs to.
    pub fn lifetime(self) -> Lifetime {
        match self {
            Self::Persistent { .. } => Lifetime::Persistent,
            Self::Transient { .. } => Lifetime::Transient,
        }
    }

    /// Segment index within the pool.
    pub fn segment_index(self) -> u16 {
        match self {
            Self::Persistent { segment_index } | Self::Transient { segment_index } => {
                segment_index
            }
        }
    }
}

/// Handle to a contiguous run of elements inside a [`StepArena`](crate::StepArena).
///
/// Handles are plain data. They do not borrow the arena, so holding one
/// across a rewind is possible; resolving it afterwards is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Region {
    /// Transient generation when this allocation was made (0 for persistent).
    pub(crate) generation: u32,
    /// Element offset within the target segment.
    pub(crate) offset: u32,
    /// Length of the allocation in elements.
    pub(crate) len: u32,
    /// Which pool and segment this handle points into.
    pub(crate) location: Location,
}

impl Region {
    /// Create a new handle.
    pub(crate) fn new(generation: u32, offset: u32, len: u32, location: Location) -> Self {
        Self {
            generation,
            offset,
            len,
            location,
        }
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Length of the allocation in elements.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The location descriptor.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The lifetime of the pool this region lives in.
    pub fn lifetime(&self) -> Lifetime {
        self.location.lifetime()
    }

    /// Single-element sub-region at `index`, or `None` past the end.
    pub fn element(&self, index: u32) -> Option<Region> {
        (index < self.len).then(|| Region::new(self.generation, self.offset + index, 1, self.location))
    }
}

impl Default for Region {
    /// An empty persistent region. Resolves to an empty slice.
    fn default() -> Self {
        Self::new(0, 0, 0, Location::Persistent { segment_index: 0 })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(gen={}, off={}, len={}, {:?})",
            self.generation, self.offset, self.len, self.location
        )
    }
}
