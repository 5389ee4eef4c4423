//! Arena behaviour across several simulated steps.

use quadra_arena::{ArenaConfig, ArenaError, FixedVec, GrowVec, Lifetime, StepArena};

#[test]
fn persistent_arrays_survive_many_rewinds() {
    let mut arena = StepArena::<u32>::new(ArenaConfig::new(256)).unwrap();
    let mut kept = GrowVec::with_capacity(&mut arena, 4, Lifetime::Persistent).unwrap();

    for step in 0..10u32 {
        arena.reset_transient();
        let mut scratch = GrowVec::with_capacity(&mut arena, 2, Lifetime::Transient).unwrap();
        for i in 0..50 {
            scratch.push(&mut arena, step * 100 + i).unwrap();
        }
        kept.push(&mut arena, step).unwrap();
        assert_eq!(scratch.len(), 50);
        assert_eq!(scratch.last(&arena).unwrap(), Some(&(step * 100 + 49)));
    }

    assert_eq!(
        kept.as_slice(&arena).unwrap(),
        (0..10).collect::<Vec<_>>().as_slice()
    );
    assert_eq!(arena.generation(), 10);
}

#[test]
fn transient_memory_is_reused_after_rewind() {
    let mut arena = StepArena::<u64>::new(ArenaConfig::new(64).with_max_transient_segments(2)).unwrap();
    for _ in 0..100 {
        arena.reset_transient();
        for _ in 0..4 {
            let region = arena.alloc(32, Lifetime::Transient).unwrap();
            assert_eq!(region.len(), 32);
        }
        assert_eq!(arena.used(Lifetime::Transient), 128);
    }
    assert_eq!(arena.segment_count(Lifetime::Transient), 2);
}

#[test]
fn handles_from_an_old_step_are_refused_everywhere() {
    let mut arena = StepArena::<u8>::new(ArenaConfig::default()).unwrap();
    let mut old = GrowVec::with_capacity(&mut arena, 8, Lifetime::Transient).unwrap();
    old.push(&mut arena, 7).unwrap();
    let region = old.region();
    arena.reset_transient();

    let stale = |err: ArenaError| matches!(err, ArenaError::StaleHandle { .. });
    assert!(stale(arena.resolve(&region).unwrap_err()));
    assert!(stale(old.as_slice(&arena).unwrap_err()));
    assert!(stale(old.push(&mut arena, 8).unwrap_err()));
    assert!(stale(arena.check(&region).unwrap_err()));
}

#[test]
fn fixed_vec_in_persistent_memory_is_bounded() {
    let mut arena = StepArena::<i16>::new(ArenaConfig::default()).unwrap();
    let mut vec = FixedVec::with_capacity(&mut arena, 3, Lifetime::Persistent).unwrap();
    assert_eq!(vec.last(&arena).unwrap(), None);
    for v in [1, 2, 3] {
        vec.push(&mut arena, v).unwrap();
    }
    assert_eq!(
        vec.push(&mut arena, 4),
        Err(ArenaError::CapacityExceeded {
            requested: 4,
            capacity: 3
        })
    );
    assert_eq!(vec.as_slice(&arena).unwrap(), &[1, 2, 3]);
}
