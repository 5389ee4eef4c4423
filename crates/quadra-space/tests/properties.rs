//! Property tests over random entity layouts.

use proptest::prelude::*;
use quadra_core::{EntityId, Position};
use quadra_space::{QuadTree, QuadTreeConfig};

const HALF_EXTENT: f32 = 1000.0;

fn arb_positions(max: usize) -> impl Strategy<Value = Vec<Position>> {
    let coord = -HALF_EXTENT..=HALF_EXTENT;
    prop::collection::vec((coord.clone(), coord), 0..max)
        .prop_map(|pairs| pairs.into_iter().map(|(x, y)| Position::new(x, y)).collect())
}

/// Positions snapped to a coarse lattice, so many entities coincide.
fn arb_crowded_positions(max: usize) -> impl Strategy<Value = Vec<Position>> {
    prop::collection::vec((-4i32..=4, -4i32..=4), 0..max).prop_map(|cells| {
        cells
            .into_iter()
            .map(|(x, y)| Position::new(x as f32 * 125.0, y as f32 * 125.0))
            .collect()
    })
}

fn build(config: QuadTreeConfig, positions: &[Position]) -> QuadTree {
    let mut tree = QuadTree::new(config).unwrap();
    let mut step = tree.begin_step().unwrap();
    let report = step.insert_all((0..positions.len() as u32).map(EntityId), positions);
    assert!(report.is_complete(), "rejected: {:?}", report.rejected);
    tree
}

fn config(threshold: u32, max_level: u8) -> QuadTreeConfig {
    QuadTreeConfig::new(HALF_EXTENT)
        .with_split_threshold(threshold)
        .with_max_level(max_level)
}

proptest! {
    #[test]
    fn leaves_respect_threshold_unless_at_max_level(
        positions in arb_crowded_positions(300),
        threshold in 1u32..12,
        max_level in 0u8..6,
    ) {
        let tree = build(config(threshold, max_level), &positions);
        for leaf in tree.leaves().unwrap() {
            prop_assert!(
                leaf.entities.len() <= threshold as usize || leaf.level == max_level,
                "leaf at level {} holds {} entities",
                leaf.level,
                leaf.entities.len(),
            );
            prop_assert!(leaf.level <= max_level);
        }
    }

    #[test]
    fn every_entity_is_found_exactly_once(positions in arb_positions(300)) {
        let tree = build(QuadTreeConfig::new(HALF_EXTENT), &positions);
        for (i, &position) in positions.iter().enumerate() {
            let id = EntityId(i as u32);
            let hits = tree.query(position).unwrap();
            prop_assert_eq!(hits.iter().filter(|&&e| e == id).count(), 1);
        }
        let total: usize = tree.leaves().unwrap().iter().map(|l| l.entities.len()).sum();
        prop_assert_eq!(total, positions.len());
    }

    #[test]
    fn entities_sit_in_leaves_that_contain_them(positions in arb_positions(200)) {
        let tree = build(config(4, 5), &positions);
        for leaf in tree.leaves().unwrap() {
            for &entity in leaf.entities {
                prop_assert!(leaf.contains(positions[entity.index()]));
            }
        }
    }

    #[test]
    fn locate_agrees_with_leaf_level(positions in arb_positions(200)) {
        let tree = build(config(3, 6), &positions);
        for &position in &positions {
            let path = tree.locate(position).unwrap();
            let leaf = tree.leaf_at(position).unwrap();
            prop_assert_eq!(path.len(), leaf.level as usize + 1);
        }
    }

    #[test]
    fn begin_step_restores_fresh_shape(positions in arb_crowded_positions(200)) {
        let fresh = QuadTree::new(config(2, 4)).unwrap().stats().unwrap();
        let mut tree = build(config(2, 4), &positions);
        tree.begin_step().unwrap();
        prop_assert_eq!(tree.stats().unwrap(), fresh);
        tree.begin_step().unwrap();
        prop_assert_eq!(tree.stats().unwrap(), fresh);
    }
}
