//! A fixed-capacity, power-of-two circular buffer with no internal
//! synchronization.
//!
//! `RingBuffer<T>` is the one container shared by the dispatcher's rate
//! window (timestamps) and pending-job queue. It is deliberately *not*
//! thread-safe: callers are responsible for single-owner access (see the
//! crate that builds the dispatcher on top of this one). Capacity is
//! constrained to a power of two so indexing can use a bitmask instead of
//! a modulo division.

mod invariants;

use invariants::{
    debug_assert_bounded_count, debug_assert_empty_iff_zero_len, debug_assert_index_in_bounds,
};
use thiserror::Error;

/// Errors that can occur constructing a [`RingBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// Capacity must be a positive power of two; the index arithmetic
    /// relies on `(head + offset) & (capacity - 1)`.
    #[error("ring capacity {0} is not a positive power of two")]
    CapacityNotPowerOfTwo(usize),
}

/// Fixed-capacity circular buffer, insertion order preserved.
///
/// Construction with a capacity that is not a positive power of two fails
/// loudly (`RingBuffer::new` returns `Err`) rather than silently rounding
/// up, since the caller usually has a specific power-of-two budget in
/// mind (see `next_power_of_two` for the common "round up for me" case).
pub struct RingBuffer<T> {
    data: Vec<Option<T>>,
    head: usize,
    count: usize,
    mask: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new ring buffer with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::CapacityNotPowerOfTwo`] if `capacity` is zero
    /// or not a power of two.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(RingError::CapacityNotPowerOfTwo(capacity));
        }

        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);

        Ok(Self {
            data,
            head: 0,
            count: 0,
            mask: capacity - 1,
        })
    }

    /// Rounds `hint` up to the next power of two and constructs a ring of
    /// that capacity. Used by the dispatcher to size its rings from a
    /// rate limit `R` that need not itself be a power of two.
    pub fn with_capacity_at_least(hint: usize) -> Self {
        let capacity = hint.max(1).next_power_of_two();
        Self::new(capacity).expect("next_power_of_two always yields a power of two")
    }

    #[inline]
    fn index_of(&self, offset: usize) -> usize {
        let idx = (self.head + offset) & self.mask;
        debug_assert_index_in_bounds!(idx, self.data.len());
        idx
    }

    /// Appends `v` at the tail. If the ring is full, the oldest element
    /// is overwritten and the head advances. This call always succeeds.
    pub fn push(&mut self, v: T) {
        if self.count < self.data.len() {
            let idx = self.index_of(self.count);
            self.data[idx] = Some(v);
            self.count += 1;
        } else {
            self.data[self.head] = Some(v);
            self.head = (self.head + 1) & self.mask;
        }
        debug_assert_bounded_count!(self.count, self.data.len());
    }

    /// Removes and returns the oldest element, or `None` if empty.
    pub fn pop_oldest(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let v = self.data[self.head].take();
        self.head = (self.head + 1) & self.mask;
        self.count -= 1;
        debug_assert_empty_iff_zero_len!(self.is_empty(), self.count);
        v
    }

    /// Removes and returns the newest element, or `None` if empty.
    pub fn pop_newest(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let idx = self.index_of(self.count - 1);
        let v = self.data[idx].take();
        self.count -= 1;
        v
    }

    /// Peeks at the oldest element without consuming it.
    pub fn oldest(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        self.data[self.head].as_ref()
    }

    /// Repeatedly pops the oldest element while `before_fn(oldest, threshold)`
    /// holds, ageing out a prefix of stale entries. Preserves relative order
    /// of what remains.
    pub fn prune_before<F>(&mut self, threshold: &T, before_fn: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        while let Some(front) = self.oldest() {
            if before_fn(front, threshold) {
                self.pop_oldest();
            } else {
                break;
            }
        }
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Maximum number of elements this ring can hold.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// `true` if `len() == capacity()`.
    pub fn is_full(&self) -> bool {
        self.count == self.data.len()
    }

    /// `true` if `len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Empties the ring, dropping all stored elements.
    pub fn reset(&mut self) {
        for slot in &mut self.data {
            *slot = None;
        }
        self.head = 0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_non_power_of_two() {
        assert!(RingBuffer::<u32>::new(0).is_err());
        assert!(RingBuffer::<u32>::new(3).is_err());
        assert!(RingBuffer::<u32>::new(6).is_err());
        assert!(RingBuffer::<u32>::new(4).is_ok());
    }

    #[test]
    fn push_then_pop_oldest_preserves_fifo_order() {
        let mut ring = RingBuffer::new(8).unwrap();
        for i in 0..5 {
            ring.push(i);
        }
        assert_eq!(ring.len(), 5);
        for i in 0..5 {
            assert_eq!(ring.pop_oldest(), Some(i));
        }
        assert_eq!(ring.pop_oldest(), None);
    }

    #[test]
    fn overwrite_on_full_drops_oldest_first() {
        let mut ring = RingBuffer::new(4).unwrap();
        for i in 0..4 {
            ring.push(i);
        }
        assert!(ring.is_full());

        // Capacity + k pushes with no pops: pop_oldest yields index k onward.
        for i in 4..7 {
            ring.push(i);
        }
        assert!(ring.is_full());
        assert_eq!(ring.len(), 4);
        for expected in 3..7 {
            assert_eq!(ring.pop_oldest(), Some(expected));
        }
    }

    #[test]
    fn pop_newest_returns_tail_element() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.push(1);
        ring.push(2);
        ring.push(3);
        assert_eq!(ring.pop_newest(), Some(3));
        assert_eq!(ring.pop_newest(), Some(2));
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn oldest_peeks_without_consuming() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.push(10);
        ring.push(20);
        assert_eq!(ring.oldest(), Some(&10));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn prune_before_leaves_no_element_strictly_less_than_threshold() {
        let mut ring = RingBuffer::new(8).unwrap();
        for i in 0..6 {
            ring.push(i);
        }
        ring.prune_before(&4, |a, b| a < b);
        assert_eq!(ring.oldest(), Some(&4));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn prune_before_on_empty_ring_is_a_no_op() {
        let mut ring: RingBuffer<u32> = RingBuffer::new(4).unwrap();
        ring.prune_before(&100, |a, b| a < b);
        assert!(ring.is_empty());
    }

    #[test]
    fn reset_empties_the_ring() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.push(1);
        ring.push(2);
        ring.reset();
        assert!(ring.is_empty());
        assert_eq!(ring.oldest(), None);
    }

    #[test]
    fn with_capacity_at_least_rounds_up() {
        let ring: RingBuffer<u32> = RingBuffer::with_capacity_at_least(30);
        assert_eq!(ring.capacity(), 32);
        let ring: RingBuffer<u32> = RingBuffer::with_capacity_at_least(32);
        assert_eq!(ring.capacity(), 32);
        let ring: RingBuffer<u32> = RingBuffer::with_capacity_at_least(1);
        assert_eq!(ring.capacity(), 1);
    }

    #[test]
    fn len_never_exceeds_capacity_under_mixed_push_pop() {
        let mut ring = RingBuffer::new(4).unwrap();
        for i in 0..20u32 {
            ring.push(i);
            assert!(ring.len() <= ring.capacity());
            if i % 3 == 0 {
                ring.pop_oldest();
            }
            assert!(ring.len() <= ring.capacity());
        }
    }
}
