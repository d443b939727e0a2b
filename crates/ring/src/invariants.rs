//! Debug assertion macros for ring buffer invariants.
//!
//! Active only in debug builds (`#[cfg(debug_assertions)]`), zero overhead
//! in release builds. Mirrors the invariant tags documented alongside
//! `RingBuffer<T>`.

/// `0 <= count <= capacity` after any push/pop.
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

/// `is_empty() <=> len() == 0`, checked right after a mutation.
macro_rules! debug_assert_empty_iff_zero_len {
    ($is_empty:expr, $len:expr) => {
        debug_assert!(
            $is_empty == ($len == 0),
            "is_empty() returned {} but len() is {}",
            $is_empty,
            $len
        )
    };
}

/// Index arithmetic must stay within `[0, capacity)`.
macro_rules! debug_assert_index_in_bounds {
    ($idx:expr, $capacity:expr) => {
        debug_assert!(
            $idx < $capacity,
            "computed index {} out of bounds for capacity {}",
            $idx,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_empty_iff_zero_len;
pub(crate) use debug_assert_index_in_bounds;
