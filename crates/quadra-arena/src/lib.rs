//! Two-lifetime bump arena with generation-checked handles.
//!
//! Storage for the quadtree is carved out of typed bump arenas. Each
//! [`StepArena`] keeps two independent segment pools:
//!
//! ```text
//! StepArena<T>
//! ├── persistent: SegmentList<T>  ←─── allocated at startup, generation 0 forever
//! └── transient:  SegmentList<T>  ←─── rewound by reset_transient(), generation += 1
//! ```
//!
//! Allocations return a [`Region`] handle instead of a pointer. A transient
//! region remembers the generation it was allocated in, so resolving it
//! after a rewind fails with [`ArenaError::StaleHandle`] rather than
//! reading memory that has since been handed out again.
//!
//! On top of the arena sits [`ArenaVec`], a contiguous array that grows by
//! reallocating inside its own lifetime. [`GrowVec`] doubles on overflow;
//! [`FixedVec`] refuses to grow.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
pub mod scratch;
pub mod segment;
pub mod vec;

pub use arena::StepArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::{Lifetime, Location, Region};
pub use scratch::ScratchRegion;
pub use vec::{ArenaVec, Doubling, Fixed, FixedVec, GrowVec, Growth};
