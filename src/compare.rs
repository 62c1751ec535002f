use std::cmp::Ordering;

/// Strict weak ordering used by `SoaMap` to sort keys.
///
/// Only `less` is required. Two keys are considered the same key when
/// neither is less than the other, so `insert` and `find` never call `Eq`.
pub trait KeyCompare<K: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`
    fn less(&self, a: &K, b: &K) -> bool;

    /// `a` and `b` are equivalent, neither orders before the other
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Three way comparison derived from `less`
    #[inline]
    fn ordering(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Ascending order by `Ord`, the default comparator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> KeyCompare<K> for Less {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Descending order by `Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> KeyCompare<K> for Greater {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        a > b
    }
}

/// Adapts a closure `Fn(&K, &K) -> bool` into a `KeyCompare`.
///
/// # Examples
/// ```rust
/// use soa_map::{FnCompare, SoaMap};
///
/// // order by absolute value
/// let cmp = FnCompare(|a: &i32, b: &i32| a.abs() < b.abs());
/// let mut map = SoaMap::<i32, &str, _>::with_comparator(cmp);
/// map.insert(-3, "a");
/// map.insert(2, "b");
///
/// // 3 is equivalent to -3 under this comparator
/// assert!(!map.insert(3, "c").1);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, -3]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnCompare<F>(pub F);

impl<F> std::fmt::Debug for FnCompare<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnCompare")
    }
}

impl<K: ?Sized, F> KeyCompare<K> for FnCompare<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}
