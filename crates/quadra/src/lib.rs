//! Quadra: an arena-backed quadtree for per-step spatial indexing.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Quadra sub-crates. For most users, adding `quadra` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quadra::prelude::*;
//!
//! // Three entities, one per quadrant of the world.
//! let positions = vec![
//!     Position::new(-100.0, 100.0),
//!     Position::new(100.0, 100.0),
//!     Position::new(100.0, -100.0),
//! ];
//! let mut tree = QuadTree::new(QuadTreeConfig::new(2000.0)).unwrap();
//!
//! let mut step = tree.begin_step().unwrap();
//! for (i, &pos) in positions.iter().enumerate() {
//!     step.insert(EntityId(i as u32), pos, &positions).unwrap();
//! }
//! assert_eq!(step.query(Position::new(-1.0, 1.0)).unwrap(), &[EntityId(0)]);
//! assert_eq!(step.query(Position::new(1.0, -1.0)).unwrap(), &[EntityId(2)]);
//! assert!(step.query(Position::new(-1.0, -1.0)).unwrap().is_empty());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `quadra-arena` | Bump arena, region handles, growable arrays |
//! | [`types`] | `quadra-core` | IDs, positions, the position-source trait |
//! | [`space`] | `quadra-space` | The quadtree and its configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Two-lifetime bump arena and growable arrays (`quadra-arena`).
///
/// [`arena::GrowVec`] is usable on its own for per-step scratch lists.
pub use quadra_arena as arena;

/// Identifiers and positions (`quadra-core`).
pub use quadra_core as types;

/// The quadtree index (`quadra-space`).
pub use quadra_space as space;

/// Common imports for typical Quadra usage.
///
/// ```rust
/// use quadra::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use quadra_arena::{ArenaConfig, ArenaError, GrowVec, Lifetime, StepArena};

    // Core types
    pub use quadra_core::{EntityId, Position, PositionSource, StepId};

    // Space
    pub use quadra_space::{
        BoundsPolicy, InsertReport, QuadTree, QuadTreeConfig, SpaceError, StepGuard,
    };
}
