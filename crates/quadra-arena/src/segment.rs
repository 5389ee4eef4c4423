//! Fixed-size bump blocks and the pools built from them.
//!
//! A [`Segment`] is one `Vec<T>` allocated at full size up front, handed out
//! front to back. A [`SegmentList`] chains segments up to a budget; one
//! [`StepArena`](crate::StepArena) lifetime is one list.

use crate::error::ArenaError;

/// One block of `T` slots with a bump cursor.
///
/// Never shrinks or frees; [`reset`](Self::reset) only moves the cursor.
pub struct Segment<T> {
    slots: Vec<T>,
    top: usize,
}

impl<T: Clone + Default> Segment<T> {
    /// A block of `capacity` default-valued slots.
    pub fn new(capacity: u32) -> Self {
        Self {
            slots: vec![T::default(); capacity as usize],
            top: 0,
        }
    }

    /// Claim the next `len` slots and return their offset.
    ///
    /// Claimed slots are overwritten with `T::default()`: after a rewind
    /// they still hold whatever the previous generation wrote.
    pub fn alloc(&mut self, len: u32) -> Option<u32> {
        let start = self.top;
        let end = start.checked_add(len as usize)?;
        let claimed = self.slots.get_mut(start..end)?;
        claimed.fill(T::default());
        self.top = end;
        u32::try_from(start).ok()
    }

    /// Slots `offset..offset + len`.
    ///
    /// # Panics
    ///
    /// If the range runs past the block. Regions handed out by the arena
    /// never do.
    pub fn slice(&self, offset: u32, len: u32) -> &[T] {
        let start = offset as usize;
        &self.slots[start..start + len as usize]
    }

    /// Mutable form of [`slice`](Self::slice).
    pub fn slice_mut(&mut self, offset: u32, len: u32) -> &mut [T] {
        let start = offset as usize;
        &mut self.slots[start..start + len as usize]
    }
}

impl<T> Segment<T> {
    /// Rewind the cursor. Slot contents are left in place.
    pub fn reset(&mut self) {
        self.top = 0;
    }

    /// Slots claimed since the last reset.
    pub fn used(&self) -> usize {
        self.top
    }

    /// Size of the block in slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots still free.
    pub fn remaining(&self) -> usize {
        self.slots.len() - self.top
    }

    /// Bytes held by the block.
    pub fn memory_bytes(&self) -> usize {
        self.slots.len() * std::mem::size_of::<T>()
    }
}

/// A budgeted chain of [`Segment`]s.
///
/// Allocation fills segments in order. A request that does not fit in the
/// current segment moves on to the next one, reusing segments kept from
/// before a reset and creating new ones while the budget allows. A single
/// allocation always lies inside one segment. Segments are `segment_size`
/// slots, except that a longer request gets a segment of exactly its own
/// length; that segment counts against the budget like any other and is
/// kept for reuse after a reset.
pub struct SegmentList<T> {
    segments: Vec<Segment<T>>,
    segment_size: u32,
    max_segments: u16,
    current: usize,
}

impl<T: Clone + Default> SegmentList<T> {
    /// A list with its first segment already allocated.
    pub fn new(segment_size: u32, max_segments: u16) -> Self {
        Self {
            segments: vec![Segment::new(segment_size)],
            segment_size,
            max_segments,
            current: 0,
        }
    }

    /// Claim `len` contiguous slots; returns `(segment_index, offset)`.
    pub fn alloc(&mut self, len: u32) -> Result<(u16, u32), ArenaError> {
        for index in self.current..self.segments.len() {
            if let Some(offset) = self.segments[index].alloc(len) {
                self.current = index;
                return Ok((index as u16, offset));
            }
        }

        if self.segments.len() >= self.max_segments as usize {
            return Err(ArenaError::CapacityExceeded {
                requested: len as usize,
                capacity: self.remaining(),
            });
        }

        let mut fresh = Segment::new(self.segment_size.max(len));
        let offset = fresh.alloc(len).ok_or(ArenaError::CapacityExceeded {
            requested: len as usize,
            capacity: fresh.capacity(),
        })?;
        self.segments.push(fresh);
        self.current = self.segments.len() - 1;
        Ok((self.current as u16, offset))
    }

    /// See [`Segment::slice`].
    pub fn slice(&self, segment_index: u16, offset: u32, len: u32) -> &[T] {
        self.segments[segment_index as usize].slice(offset, len)
    }

    /// See [`Segment::slice_mut`].
    pub fn slice_mut(&mut self, segment_index: u16, offset: u32, len: u32) -> &mut [T] {
        self.segments[segment_index as usize].slice_mut(offset, len)
    }

    /// Clone `len` slots from `src` to `dst`, each given as
    /// `(segment_index, offset)`. The ranges may overlap.
    pub fn copy(&mut self, src: (u16, u32), dst: (u16, u32), len: u32) {
        let len = len as usize;
        if len == 0 || src == dst {
            return;
        }
        let (src_seg, src_at) = (src.0 as usize, src.1 as usize);
        let (dst_seg, dst_at) = (dst.0 as usize, dst.1 as usize);

        if src_seg == dst_seg {
            let slots = &mut self.segments[src_seg].slots;
            if src_at + len <= dst_at {
                let (from, to) = slots.split_at_mut(dst_at);
                to[..len].clone_from_slice(&from[src_at..src_at + len]);
            } else if dst_at + len <= src_at {
                let (to, from) = slots.split_at_mut(src_at);
                to[dst_at..dst_at + len].clone_from_slice(&from[..len]);
            } else if dst_at < src_at {
                for i in 0..len {
                    slots[dst_at + i] = slots[src_at + i].clone();
                }
            } else {
                for i in (0..len).rev() {
                    slots[dst_at + i] = slots[src_at + i].clone();
                }
            }
            return;
        }

        let (low, high) = self.segments.split_at_mut(src_seg.max(dst_seg));
        let (from, to) = if src_seg < dst_seg {
            (&low[src_seg], &mut high[0])
        } else {
            (&high[0], &mut low[dst_seg])
        };
        to.slots[dst_at..dst_at + len].clone_from_slice(&from.slots[src_at..src_at + len]);
    }
}

impl<T> SegmentList<T> {
    /// Rewind every segment and start filling from the first again.
    pub fn reset(&mut self) {
        self.segments.iter_mut().for_each(Segment::reset);
        self.current = 0;
    }

    /// Segments created so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Bytes held by all segments.
    pub fn memory_bytes(&self) -> usize {
        self.segments.iter().map(Segment::memory_bytes).sum()
    }

    /// Slots claimed across all segments.
    pub fn total_used(&self) -> usize {
        self.segments.iter().map(Segment::used).sum()
    }

    /// Slots a future allocation could still reach, unborn segments included.
    fn remaining(&self) -> usize {
        let unborn = (self.max_segments as usize).saturating_sub(self.segments.len());
        let reachable: usize = self.segments[self.current..]
            .iter()
            .map(Segment::remaining)
            .sum();
        reachable + unborn * self.segment_size as usize
    }
}
