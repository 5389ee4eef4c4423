//! Contiguous arrays backed by a [`StepArena`].
//!
//! [`ArenaVec`] stores a [`Region`] plus a logical length. The elements live
//! in the arena, so every operation that touches them takes the arena as a
//! parameter. Growth is a policy ([`Growth`]): [`GrowVec`] reallocates into
//! a region of `2 * capacity + 1` when full, [`FixedVec`] reports
//! [`ArenaError::CapacityExceeded`] instead.
//!
//! When a `GrowVec` reallocates, its old region is left behind as garbage.
//! That is only sound because nothing else refers to it: an `ArenaVec` is
//! the sole owner of its region and is deliberately not `Copy`.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::arena::StepArena;
use crate::error::ArenaError;
use crate::handle::{Lifetime, Region};

/// Capacity policy applied when an append would overflow.
pub trait Growth {
    /// Capacity to reallocate to, or `None` if the container may not grow.
    fn next_capacity(current: u32) -> Option<u32>;
}

/// Grow to `2 * capacity + 1`.
#[derive(Debug)]
pub enum Doubling {}

impl Growth for Doubling {
    fn next_capacity(current: u32) -> Option<u32> {
        current.checked_mul(2)?.checked_add(1)
    }
}

/// Never grow.
#[derive(Debug)]
pub enum Fixed {}

impl Growth for Fixed {
    fn next_capacity(_current: u32) -> Option<u32> {
        None
    }
}

/// Array that reallocates inside its lifetime when full.
pub type GrowVec<T> = ArenaVec<T, Doubling>;

/// Array with a capacity fixed at creation.
pub type FixedVec<T> = ArenaVec<T, Fixed>;

/// Arena-backed contiguous array.
///
/// Invariants: `len <= capacity`, and capacity never shrinks.
pub struct ArenaVec<T, G = Doubling> {
    region: Region,
    len: u32,
    lifetime: Lifetime,
    _marker: PhantomData<fn() -> (T, G)>,
}

impl<T: Clone + Default, G: Growth> ArenaVec<T, G> {
    /// Allocate an empty array with room for `capacity` elements.
    pub fn with_capacity(
        arena: &mut StepArena<T>,
        capacity: u32,
        lifetime: Lifetime,
    ) -> Result<Self, ArenaError> {
        let region = arena.alloc(capacity, lifetime)?;
        Ok(Self {
            region,
            len: 0,
            lifetime,
            _marker: PhantomData,
        })
    }

    /// Extend the length by one and return the new last slot.
    ///
    /// The slot holds `T::default()` unless it was written before a
    /// [`clear`](Self::clear). If the array is full it grows according to
    /// `G`; the existing elements are copied into the new region.
    pub fn append<'a>(&mut self, arena: &'a mut StepArena<T>) -> Result<&'a mut T, ArenaError> {
        arena.check(&self.region)?;
        let needed = self.len + 1;
        if needed > self.region.len {
            let capacity = G::next_capacity(self.region.len).ok_or(
                ArenaError::CapacityExceeded {
                    requested: needed as usize,
                    capacity: self.region.len as usize,
                },
            )?;
            let grown = arena.alloc(capacity, self.lifetime)?;
            arena.copy(&self.region, &grown, self.len)?;
            trace!(
                from = self.region.len,
                to = capacity,
                lifetime = ?self.lifetime,
                "arena vec grew"
            );
            self.region = grown;
        }
        self.len = needed;
        let slots = arena.resolve_mut(&self.region)?;
        Ok(&mut slots[needed as usize - 1])
    }

    /// Append `value`.
    pub fn push(&mut self, arena: &mut StepArena<T>, value: T) -> Result<(), ArenaError> {
        *self.append(arena)? = value;
        Ok(())
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self, arena: &StepArena<T>) -> Result<Option<T>, ArenaError> {
        let Some(value) = self.last(arena)?.cloned() else {
            return Ok(None);
        };
        self.len -= 1;
        Ok(Some(value))
    }

    /// The live elements.
    pub fn as_slice<'a>(&self, arena: &'a StepArena<T>) -> Result<&'a [T], ArenaError> {
        Ok(&arena.resolve(&self.region)?[..self.len as usize])
    }

    /// The live elements, mutably.
    pub fn as_mut_slice<'a>(
        &self,
        arena: &'a mut StepArena<T>,
    ) -> Result<&'a mut [T], ArenaError> {
        Ok(&mut arena.resolve_mut(&self.region)?[..self.len as usize])
    }

    /// Iterate over the live elements.
    pub fn iter<'a>(
        &self,
        arena: &'a StepArena<T>,
    ) -> Result<std::slice::Iter<'a, T>, ArenaError> {
        Ok(self.as_slice(arena)?.iter())
    }

    /// Element at `index`, checked against the length.
    pub fn get<'a>(&self, arena: &'a StepArena<T>, index: usize) -> Result<&'a T, ArenaError> {
        self.as_slice(arena)?
            .get(index)
            .ok_or(ArenaError::IndexOutOfRange {
                index,
                len: self.len as usize,
            })
    }

    /// Mutable element at `index`, checked against the length.
    pub fn get_mut<'a>(
        &self,
        arena: &'a mut StepArena<T>,
        index: usize,
    ) -> Result<&'a mut T, ArenaError> {
        let len = self.len as usize;
        self.as_mut_slice(arena)?
            .get_mut(index)
            .ok_or(ArenaError::IndexOutOfRange { index, len })
    }

    /// Last element, or `None` if empty.
    pub fn last<'a>(&self, arena: &'a StepArena<T>) -> Result<Option<&'a T>, ArenaError> {
        Ok(self.as_slice(arena)?.last())
    }
}

impl<T, G> ArenaVec<T, G> {
    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the array has no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements the current region can hold without growing.
    pub fn capacity(&self) -> usize {
        self.region.len as usize
    }

    /// Lifetime new regions are allocated from.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Handle to the current backing region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Bytes held by the current backing region.
    pub fn memory_bytes(&self) -> usize {
        self.capacity() * self.element_size()
    }

    /// Set the length to zero. Capacity and region are kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<T, G> Default for ArenaVec<T, G> {
    /// An empty, zero-capacity persistent array. The first append allocates.
    fn default() -> Self {
        Self {
            region: Region::default(),
            len: 0,
            lifetime: Lifetime::Persistent,
            _marker: PhantomData,
        }
    }
}

impl<T, G> Clone for ArenaVec<T, G> {
    /// Clones the handle, not the elements. Only arena storage uses this.
    fn clone(&self) -> Self {
        Self {
            region: self.region,
            len: self.len,
            lifetime: self.lifetime,
            _marker: PhantomData,
        }
    }
}

impl<T, G> fmt::Debug for ArenaVec<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaVec")
            .field("len", &self.len)
            .field("capacity", &self.region.len)
            .field("lifetime", &self.lifetime)
            .field("region", &self.region)
            .finish()
    }
}
