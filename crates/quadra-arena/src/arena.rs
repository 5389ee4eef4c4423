//! The two-lifetime step arena.
//!
//! [`StepArena`] is the allocation service the quadtree consumes. It owns a
//! persistent and a transient [`SegmentList`] and the transient generation
//! counter. The lifecycle per simulation step is:
//!
//! 1. `reset_transient()`: rewind the transient pool, bump the generation
//! 2. `alloc(len, Lifetime::Transient)`: any number of bump allocations
//! 3. `resolve()` / `resolve_mut()`: O(1) reads and writes through handles
//!
//! Persistent allocations are made once and survive every rewind.

use tracing::trace;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::{Lifetime, Location, Region};
use crate::segment::SegmentList;

/// Bump arena with a persistent and a transient pool.
///
/// There is no individual free. Memory comes back only when the transient
/// pool is rewound or the arena is dropped.
pub struct StepArena<T> {
    /// Pool that is never rewound.
    persistent: SegmentList<T>,
    /// Pool rewound once per step.
    transient: SegmentList<T>,
    /// Current transient generation (incremented on rewind).
    generation: u32,
    config: ArenaConfig,
}

impl<T: Clone + Default> StepArena<T> {
    /// Create a new arena, pre-allocating one segment per lifetime.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            persistent: SegmentList::new(config.segment_size, config.max_persistent_segments),
            transient: SegmentList::new(config.segment_size, config.max_transient_segments),
            generation: 0,
            config,
        })
    }

    /// Bump-allocate `len` elements with the given lifetime.
    ///
    /// The returned region is filled with `T::default()`.
    pub fn alloc(&mut self, len: u32, lifetime: Lifetime) -> Result<Region, ArenaError> {
        match lifetime {
            Lifetime::Persistent => {
                let (segment_index, offset) = self.persistent.alloc(len)?;
                Ok(Region::new(
                    0,
                    offset,
                    len,
                    Location::Persistent { segment_index },
                ))
            }
            Lifetime::Transient => {
                let (segment_index, offset) = self.transient.alloc(len)?;
                Ok(Region::new(
                    self.generation,
                    offset,
                    len,
                    Location::Transient { segment_index },
                ))
            }
        }
    }

    /// Fail with `StaleHandle` if `region` predates the last rewind.
    pub fn check(&self, region: &Region) -> Result<(), ArenaError> {
        match region.location {
            Location::Persistent { .. } => Ok(()),
            Location::Transient { .. } if region.generation == self.generation => Ok(()),
            Location::Transient { .. } => Err(ArenaError::StaleHandle {
                handle_generation: region.generation,
                current_generation: self.generation,
            }),
        }
    }

    /// Resolve a region to a shared slice.
    pub fn resolve(&self, region: &Region) -> Result<&[T], ArenaError> {
        self.check(region)?;
        Ok(match region.location {
            Location::Persistent { segment_index } => {
                self.persistent.slice(segment_index, region.offset, region.len)
            }
            Location::Transient { segment_index } => {
                self.transient.slice(segment_index, region.offset, region.len)
            }
        })
    }

    /// Resolve a region to a mutable slice.
    pub fn resolve_mut(&mut self, region: &Region) -> Result<&mut [T], ArenaError> {
        self.check(region)?;
        Ok(match region.location {
            Location::Persistent { segment_index } => {
                self.persistent
                    .slice_mut(segment_index, region.offset, region.len)
            }
            Location::Transient { segment_index } => {
                self.transient
                    .slice_mut(segment_index, region.offset, region.len)
            }
        })
    }

    /// Clone the first `count` elements of `src` into the start of `dst`.
    ///
    /// Both regions must be live and `count` must fit in both. The regions
    /// may overlap; the copy then behaves as if `src` were read first.
    pub fn copy(&mut self, src: &Region, dst: &Region, count: u32) -> Result<(), ArenaError> {
        self.check(src)?;
        self.check(dst)?;
        let limit = src.len.min(dst.len);
        if count > limit {
            return Err(ArenaError::CapacityExceeded {
                requested: count as usize,
                capacity: limit as usize,
            });
        }
        let from = (src.location.segment_index(), src.offset);
        let to = (dst.location.segment_index(), dst.offset);
        match (src.location, dst.location) {
            (Location::Persistent { .. }, Location::Persistent { .. }) => {
                self.persistent.copy(from, to, count);
            }
            (Location::Transient { .. }, Location::Transient { .. }) => {
                self.transient.copy(from, to, count);
            }
            _ => {
                let staged = self.resolve(src)?[..count as usize].to_vec();
                self.resolve_mut(dst)?[..count as usize].clone_from_slice(&staged);
            }
        }
        Ok(())
    }

    /// Rewind the transient pool and start a new generation.
    ///
    /// Every transient region handed out before this call becomes stale.
    /// Persistent regions are untouched.
    pub fn reset_transient(&mut self) {
        trace!(
            generation = self.generation,
            used = self.transient.total_used(),
            "rewinding transient arena"
        );
        self.transient.reset();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current transient generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Elements currently allocated in the given lifetime.
    pub fn used(&self, lifetime: Lifetime) -> usize {
        match lifetime {
            Lifetime::Persistent => self.persistent.total_used(),
            Lifetime::Transient => self.transient.total_used(),
        }
    }

    /// Segments currently allocated in the given lifetime.
    pub fn segment_count(&self, lifetime: Lifetime) -> usize {
        match lifetime {
            Lifetime::Persistent => self.persistent.segment_count(),
            Lifetime::Transient => self.transient.segment_count(),
        }
    }

    /// Memory held by both pools, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.persistent.memory_bytes() + self.transient.memory_bytes()
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_arena() -> StepArena<u32> {
        StepArena::new(ArenaConfig::new(64)).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(StepArena::<u32>::new(ArenaConfig::new(0)).is_err());
    }

    #[test]
    fn persistent_regions_have_generation_zero() {
        let mut arena = small_arena();
        arena.reset_transient();
        let r = arena.alloc(4, Lifetime::Persistent).unwrap();
        assert_eq!(r.generation(), 0);
        assert_eq!(r.lifetime(), Lifetime::Persistent);
    }

    #[test]
    fn transient_regions_carry_current_generation() {
        let mut arena = small_arena();
        arena.reset_transient();
        arena.reset_transient();
        let r = arena.alloc(4, Lifetime::Transient).unwrap();
        assert_eq!(r.generation(), 2);
        assert_eq!(arena.generation(), 2);
    }

    #[test]
    fn write_then_resolve() {
        let mut arena = small_arena();
        let r = arena.alloc(3, Lifetime::Transient).unwrap();
        arena.resolve_mut(&r).unwrap().copy_from_slice(&[4, 5, 6]);
        assert_eq!(arena.resolve(&r).unwrap(), &[4, 5, 6]);
    }

    #[test]
    fn transient_handle_goes_stale_after_rewind() {
        let mut arena = small_arena();
        let r = arena.alloc(3, Lifetime::Transient).unwrap();
        arena.reset_transient();
        assert_eq!(
            arena.resolve(&r),
            Err(ArenaError::StaleHandle {
                handle_generation: 0,
                current_generation: 1,
            })
        );
        assert!(arena.check(&r).is_err());
    }

    #[test]
    fn persistent_survives_rewind() {
        let mut arena = small_arena();
        let r = arena.alloc(2, Lifetime::Persistent).unwrap();
        arena.resolve_mut(&r).unwrap().copy_from_slice(&[1, 2]);
        arena.reset_transient();
        assert_eq!(arena.resolve(&r).unwrap(), &[1, 2]);
    }

    #[test]
    fn rewind_only_clears_transient_usage() {
        let mut arena = small_arena();
        let _ = arena.alloc(5, Lifetime::Persistent).unwrap();
        let _ = arena.alloc(7, Lifetime::Transient).unwrap();
        assert_eq!(arena.used(Lifetime::Transient), 7);
        arena.reset_transient();
        assert_eq!(arena.used(Lifetime::Transient), 0);
        assert_eq!(arena.used(Lifetime::Persistent), 5);
    }

    #[test]
    fn copy_rejects_oversized_count() {
        let mut arena = small_arena();
        let a = arena.alloc(2, Lifetime::Transient).unwrap();
        let b = arena.alloc(4, Lifetime::Transient).unwrap();
        assert!(matches!(
            arena.copy(&a, &b, 3),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn copy_tolerates_overlapping_regions() {
        let mut arena = small_arena();
        let r = arena.alloc(4, Lifetime::Transient).unwrap();
        arena.resolve_mut(&r).unwrap().copy_from_slice(&[1, 2, 3, 4]);

        arena.copy(&r, &r, 2).unwrap();
        assert_eq!(arena.resolve(&r).unwrap(), &[1, 2, 3, 4]);

        let second = r.element(1).unwrap();
        arena.copy(&r, &second, 1).unwrap();
        assert_eq!(arena.resolve(&r).unwrap(), &[1, 1, 3, 4]);

        let last = r.element(3).unwrap();
        arena.copy(&last, &r, 1).unwrap();
        assert_eq!(arena.resolve(&r).unwrap(), &[4, 1, 3, 4]);
    }

    #[test]
    fn copy_between_lifetimes() {
        let mut arena = small_arena();
        let a = arena.alloc(2, Lifetime::Persistent).unwrap();
        arena.resolve_mut(&a).unwrap().copy_from_slice(&[8, 9]);
        let b = arena.alloc(2, Lifetime::Transient).unwrap();
        arena.copy(&a, &b, 2).unwrap();
        assert_eq!(arena.resolve(&b).unwrap(), &[8, 9]);
    }

    #[test]
    fn transient_budget_exhaustion_is_reported() {
        let config = ArenaConfig::new(8).with_max_transient_segments(1);
        let mut arena = StepArena::<u32>::new(config).unwrap();
        let _ = arena.alloc(8, Lifetime::Transient).unwrap();
        assert!(matches!(
            arena.alloc(1, Lifetime::Transient),
            Err(ArenaError::CapacityExceeded { .. })
        ));
        arena.reset_transient();
        assert!(arena.alloc(8, Lifetime::Transient).is_ok());
    }
}
