//! Arena-backed quadtree for locating entities by position.
//!
//! The world is a square `[-h, h]²` split into four permanent top-level
//! quads. A leaf that collects more than `split_threshold` entities splits
//! into four children (until `max_level`), and its entities are
//! redistributed among them. Every child is allocated in transient arena
//! memory and discarded wholesale at the start of the next step, so a
//! rebuild costs nothing beyond the inserts themselves.
//!
//! # Usage
//!
//! ```
//! use quadra_core::{EntityId, Position};
//! use quadra_space::{QuadTree, QuadTreeConfig};
//!
//! let positions: Vec<Position> = (0..40)
//!     .map(|i| Position::new(10.0 + i as f32, 10.0))
//!     .collect();
//! let mut tree = QuadTree::new(QuadTreeConfig::default()).unwrap();
//!
//! for _ in 0..3 {
//!     let mut step = tree.begin_step().unwrap();
//!     let report = step.insert_all((0..40).map(EntityId), &positions);
//!     assert!(report.is_complete());
//!     assert!(step.stats().unwrap().deepest_level > 0);
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod inspect;
pub mod quad;
pub mod quadrant;
pub mod step;
pub mod tree;

pub use config::{BoundsPolicy, QuadTreeConfig};
pub use error::SpaceError;
pub use inspect::{LeafView, TreeStats};
pub use quad::Quad;
pub use quadrant::{QuadPath, Quadrant};
pub use step::{InsertReport, StepGuard};
pub use tree::QuadTree;
