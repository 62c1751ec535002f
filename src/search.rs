//! Binary search over a sorted key slice, driven by a `KeyCompare`.
//!
//! All functions assume `keys` is strictly ascending under `cmp`.

use crate::KeyCompare;

/// Index of the first key not less than `k`, or `keys.len()`
#[inline]
pub fn lower_bound<K, C: KeyCompare<K>>(keys: &[K], k: &K, cmp: &C) -> usize {
    keys.partition_point(|key| cmp.less(key, k))
}

/// Index of the first key strictly greater than `k`, or `keys.len()`
#[inline]
pub fn upper_bound<K, C: KeyCompare<K>>(keys: &[K], k: &K, cmp: &C) -> usize {
    keys.partition_point(|key| !cmp.less(k, key))
}

/// Search `k` in `keys`, returns same result shape as `slice::binary_search`:
/// `Ok(idx)` when an equivalent key is at `idx`, `Err(idx)` with the insert
/// position otherwise.
#[inline]
pub fn search<K, C: KeyCompare<K>>(keys: &[K], k: &K, cmp: &C) -> Result<usize, usize> {
    let idx = lower_bound(keys, k, cmp);
    match keys.get(idx) {
        // keys[idx] is not less than k, so only need to check the other side
        Some(key) if !cmp.less(k, key) => Ok(idx),
        _ => Err(idx),
    }
}
