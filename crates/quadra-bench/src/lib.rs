//! Benchmark profiles for the Quadra spatial index.
//!
//! - [`uniform_profile`]: entities scattered over the default world
//! - [`crowded_profile`]: most entities packed into one small area, forcing
//!   splits down to the maximum level
//! - [`rebuild`]: one full step (rewind, clear, insert everything)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quadra_core::{EntityId, Position};
use quadra_space::{QuadTree, QuadTreeConfig, SpaceError};
use quadra_test_utils::fixtures;

/// A world configuration paired with one step's worth of positions.
pub struct Profile {
    pub config: QuadTreeConfig,
    pub positions: Vec<Position>,
}

/// `n` entities spread uniformly over the default 8000×8000 world.
pub fn uniform_profile(n: usize, seed: u64) -> Profile {
    let config = QuadTreeConfig::default();
    let positions = fixtures::scatter(n, config.half_extent, seed);
    Profile { config, positions }
}

/// `n` entities, 90% of them within 50 units of one point.
pub fn crowded_profile(n: usize, seed: u64) -> Profile {
    let config = QuadTreeConfig::default();
    let crowd = n * 9 / 10;
    let mut positions = fixtures::cluster(crowd, Position::new(1234.0, -987.0), 50.0, seed);
    positions.extend(fixtures::scatter(n - crowd, config.half_extent, seed ^ 1));
    Profile { config, positions }
}

/// Run one step: begin, then insert every entity of `positions`.
pub fn rebuild(tree: &mut QuadTree, positions: &[Position]) -> Result<(), SpaceError> {
    let mut step = tree.begin_step()?;
    for (i, &position) in positions.iter().enumerate() {
        step.insert(EntityId(i as u32), position, positions)?;
    }
    Ok(())
}
