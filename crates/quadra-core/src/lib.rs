//! Core types and traits for the Quadra spatial index.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and the position-source abstraction shared by the
//! arena and quadtree crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod position;

pub use id::{EntityId, StepId};
pub use position::{Position, PositionSource};
