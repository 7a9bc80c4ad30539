//! Logical index → collection index mapping.
//!
//! The carousel addresses its slots with an unbounded signed
//! [`LogicalIndex`]; every slot resolves to a real item by wrapping the
//! index into `[0, len)`.

/// Unbounded position in the conceptually infinite repeating sequence.
pub type LogicalIndex = i64;

/// Wrap `index` into `[0, len)` using true mathematical modulo, so negative
/// indices count backwards from the end (`-1` → `len - 1`).
///
/// `len` must be at least 1; the engine guarantees this at construction.
pub fn wrap_index(index: LogicalIndex, len: usize) -> usize {
    debug_assert!(len >= 1, "wrap_index called with an empty collection");
    index.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_indices_wrap() {
        assert_eq!(wrap_index(0, 4), 0);
        assert_eq!(wrap_index(3, 4), 3);
        assert_eq!(wrap_index(4, 4), 0);
        assert_eq!(wrap_index(9, 4), 1);
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(-2, 4), 2);
        assert_eq!(wrap_index(-4, 4), 0);
        assert_eq!(wrap_index(-5, 4), 3);
    }

    #[test]
    fn single_item_always_maps_to_zero() {
        for i in -10..10 {
            assert_eq!(wrap_index(i, 1), 0);
        }
    }

    #[test]
    fn result_is_in_range_and_periodic() {
        for n in 1..=7usize {
            for i in -50i64..50 {
                let w = wrap_index(i, n);
                assert!(w < n, "wrap_index({i}, {n}) = {w}");
                assert_eq!(w, wrap_index(i + n as i64, n));
            }
        }
    }

    #[test]
    fn extreme_values_stay_in_range() {
        assert!(wrap_index(i64::MIN, 3) < 3);
        assert!(wrap_index(i64::MAX, 3) < 3);
    }
}
