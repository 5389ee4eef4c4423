//! Deterministic position generators.
//!
//! - [`grid`]: evenly spaced points covering the world
//! - [`cluster`]: points packed around one center
//! - [`scatter`]: hashed points spread over the whole extent
//!
//! All generators are pure functions of their arguments, so a failing
//! test or a benchmark run can be reproduced from its seed alone.

use quadra_core::Position;

/// SplitMix64 finaliser. Good enough spread for fixtures.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Value in `[-1, 1)` for stream position `i` under `seed`.
fn signed_unit(seed: u64, i: u64) -> f32 {
    let bits = mix(seed ^ mix(i)) >> 40;
    (bits as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
}

/// `per_side × per_side` points on a regular lattice strictly inside
/// `[-half_extent, half_extent]²`, row-major from the north-west corner.
pub fn grid(per_side: u32, half_extent: f32) -> Vec<Position> {
    let step = 2.0 * half_extent / per_side as f32;
    let start = -half_extent + step * 0.5;
    let mut out = Vec::with_capacity((per_side * per_side) as usize);
    for row in 0..per_side {
        for col in 0..per_side {
            out.push(Position::new(
                start + col as f32 * step,
                -start - row as f32 * step,
            ));
        }
    }
    out
}

/// `n` points within `radius` of `center` on each axis.
pub fn cluster(n: usize, center: Position, radius: f32, seed: u64) -> Vec<Position> {
    (0..n as u64)
        .map(|i| {
            center
                + Position::new(
                    signed_unit(seed, 2 * i) * radius,
                    signed_unit(seed, 2 * i + 1) * radius,
                )
        })
        .collect()
}

/// `n` points spread over `[-half_extent, half_extent)²`.
pub fn scatter(n: usize, half_extent: f32, seed: u64) -> Vec<Position> {
    cluster(n, Position::ZERO, half_extent, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_inside_and_row_major() {
        let points = grid(4, 100.0);
        assert_eq!(points.len(), 16);
        assert_eq!(points[0], Position::new(-75.0, 75.0));
        assert_eq!(points[1], Position::new(-25.0, 75.0));
        assert_eq!(points[15], Position::new(75.0, -75.0));
        assert!(points.iter().all(|p| p.x.abs() < 100.0 && p.y.abs() < 100.0));
    }

    #[test]
    fn cluster_stays_within_radius() {
        let center = Position::new(500.0, -500.0);
        let points = cluster(200, center, 10.0, 7);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert!((p.x - center.x).abs() <= 10.0);
            assert!((p.y - center.y).abs() <= 10.0);
        }
    }

    #[test]
    fn scatter_is_deterministic_per_seed() {
        assert_eq!(scatter(50, 4000.0, 42), scatter(50, 4000.0, 42));
        assert_ne!(scatter(50, 4000.0, 42), scatter(50, 4000.0, 43));
    }

    #[test]
    fn scatter_reaches_every_top_level_quarter() {
        let points = scatter(400, 4000.0, 1);
        let quarters = [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];
        for (sx, sy) in quarters {
            assert!(points.iter().any(|p| p.x * sx > 0.0 && p.y * sy > 0.0));
        }
    }
}
