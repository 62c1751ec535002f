use std::{
    fmt,
    marker::PhantomData,
    ops::{Bound, RangeBounds},
};

use crate::{
    search, Cursor, CursorMut, IntoIter, Iter, IterMut, KeyCompare, Less, Result, Sequence,
    SoaMapError,
};

/// Sorted map with keys and values stored in two parallel sequences.
///
/// Slot `i` of the key sequence pairs with slot `i` of the value sequence, keys are kept
/// strictly ascending under `C`. Lookups binary search the key sequence only, mutations
/// apply the same positional edit to both sequences. Scans over keys (or values) alone
/// touch one contiguous buffer, at the cost of an O(n) shift on insert and remove, the
/// same trade-off a sorted vector makes.
///
/// `KS` and `VS` pick the storage of each sequence independently.
///
/// # Example
/// ```rust
/// use soa_map::SoaMap;
///
/// let mut map = SoaMap::<u64, (f64, f64)>::new();
///
/// // insert new value
/// assert_eq!(map.insert(3, (0., 0.)), (0, true));
///
/// // the first insert wins, existing value is kept
/// assert_eq!(map.insert(3, (1., 1.)), (0, false));
/// assert_eq!(map.get(&3), Some(&(0., 0.)));
///
/// // keys and values are independent slices
/// map.insert(1, (2., 2.));
/// assert_eq!(map.keys_slice(), &[1, 3]);
/// assert_eq!(map.values_slice(), &[(2., 2.), (0., 0.)]);
///
/// // remove the value
/// assert_eq!(map.remove(&3), Some((0., 0.)));
/// assert_eq!(map.len(), 1);
/// ```
pub struct SoaMap<K, V, C = Less, KS = Vec<K>, VS = Vec<V>> {
    keys: KS,
    values: VS,
    compare: C,
    _marker: PhantomData<(K, V)>,
}

impl<K: Ord, V> SoaMap<K, V> {
    /// Create an empty map ordered by `K: Ord`
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let map = SoaMap::<i32, i32>::new();
    ///
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Less)
    }

    /// Create an empty map with room for `capacity` items in both sequences
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Less)
    }
}

impl<K, V, C: KeyCompare<K>> SoaMap<K, V, C> {
    /// Create an empty map ordered by `compare`
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::{Greater, SoaMap};
    ///
    /// let mut map = SoaMap::<i32, (), _>::with_comparator(Greater);
    /// map.insert(1, ());
    /// map.insert(2, ());
    ///
    /// assert_eq!(map.keys_slice(), &[2, 1]);
    /// ```
    #[inline]
    pub fn with_comparator(compare: C) -> Self {
        Self::new_in(compare)
    }

    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        Self::with_capacity_in(capacity, compare)
    }
}

impl<K, V, C: Default, KS: Sequence<K>, VS: Sequence<V>> Default for SoaMap<K, V, C, KS, VS> {
    fn default() -> Self {
        Self::new_in(C::default())
    }
}

impl<K, V, C, KS, VS> SoaMap<K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    /// Create an empty map over any pair of sequence types
    pub fn new_in(compare: C) -> Self {
        Self {
            keys: KS::default(),
            values: VS::default(),
            compare,
            _marker: PhantomData,
        }
    }

    pub fn with_capacity_in(capacity: usize, compare: C) -> Self {
        Self {
            keys: KS::with_capacity(capacity),
            values: VS::with_capacity(capacity),
            compare,
            _marker: PhantomData,
        }
    }

    /// Returns item count in the map
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.keys.len(), self.values.len());
        self.keys.len()
    }

    /// Returns true if the map contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Capacity of the key sequence
    pub fn key_capacity(&self) -> usize {
        self.keys.capacity()
    }

    /// Capacity of the value sequence
    pub fn value_capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Make sure both sequences can hold at least `capacity` items in total without
    /// reallocating. Never shrinks, and does not change the content.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = SoaMap::<u32, u32>::new();
    /// map.reserve(100);
    ///
    /// assert!(map.key_capacity() >= 100);
    /// assert!(map.value_capacity() >= 100);
    /// assert!(map.is_empty());
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        let additional = capacity.saturating_sub(self.len());
        self.keys.reserve(additional);
        self.values.reserve(additional);

        log::trace!(
            "reserve {capacity}: key capacity {}, value capacity {}",
            self.keys.capacity(),
            self.values.capacity()
        );
    }

    pub fn shrink_to_fit(&mut self) {
        self.keys.shrink_to_fit();
        self.values.shrink_to_fit();

        log::trace!(
            "shrink to {}: key capacity {}, value capacity {}",
            self.len(),
            self.keys.capacity(),
            self.values.capacity()
        );
    }

    /// Remove all items, capacity is kept
    pub fn clear(&mut self) {
        log::trace!("clear {} items", self.len());
        self.keys.clear();
        self.values.clear();
    }

    /// Exchange content with `other` in O(1), no item is moved
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut a = SoaMap::<i32, i32>::new();
    /// let mut b = SoaMap::<i32, i32>::new();
    /// a.insert(1, 1);
    ///
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b.get(&1), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        log::trace!("swap maps of {} and {} items", self.len(), other.len());
        std::mem::swap(self, other);
    }

    /// The sorted key sequence
    #[inline]
    pub fn keys_slice(&self) -> &[K] {
        self.keys.as_slice()
    }

    /// The value sequence, in key order
    #[inline]
    pub fn values_slice(&self) -> &[V] {
        self.values.as_slice()
    }

    #[inline]
    pub fn keys(&self) -> std::slice::Iter<'_, K> {
        self.keys.as_slice().iter()
    }

    #[inline]
    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.values.as_slice().iter()
    }

    #[inline]
    pub fn values_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.values.as_mut_slice().iter_mut()
    }

    /// Returns the key at `index`
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::{SoaMap, SoaMapError};
    ///
    /// let mut map = SoaMap::<i32, i32>::new();
    /// map.insert(5, 50);
    ///
    /// assert_eq!(map.key_at_index(0), Ok(&5));
    /// assert_eq!(
    ///     map.key_at_index(1),
    ///     Err(SoaMapError::IndexOutOfRange { index: 1, len: 1 })
    /// );
    /// ```
    pub fn key_at_index(&self, index: usize) -> Result<&K> {
        self.keys
            .as_slice()
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns the value at `index`
    pub fn at_index(&self, index: usize) -> Result<&V> {
        self.values
            .as_slice()
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mut reference to the value at `index`
    pub fn at_index_mut(&mut self, index: usize) -> Result<&mut V> {
        let len = self.len();
        self.values
            .as_mut_slice()
            .get_mut(index)
            .ok_or(SoaMapError::IndexOutOfRange { index, len })
    }

    /// Returns the key and value at `index`
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.keys.as_slice().get(index)?;
        let value = self.values.as_slice().get(index)?;
        Some((key, value))
    }

    /// Returns the key and a mut reference to the value at `index`
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let key = self.keys.as_slice().get(index)?;
        let value = self.values.as_mut_slice().get_mut(index)?;
        Some((key, value))
    }

    /// Key and value at `index`, which must be in range
    #[inline]
    pub(crate) fn index_pair(&self, index: usize) -> (&K, &V) {
        (&self.keys.as_slice()[index], &self.values.as_slice()[index])
    }

    /// Key and mut value at `index`, which must be in range
    #[inline]
    pub(crate) fn index_pair_mut(&mut self, index: usize) -> (&K, &mut V) {
        (
            &self.keys.as_slice()[index],
            &mut self.values.as_mut_slice()[index],
        )
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.get_index(0)
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Remove the item at `index`, shifting everything after it one slot to the left
    pub fn remove_at(&mut self, index: usize) -> Result<(K, V)> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.remove_at_unchecked(index))
    }

    #[inline]
    fn remove_at_unchecked(&mut self, index: usize) -> (K, V) {
        let k = self.keys.remove(index);
        let v = self.values.remove(index);
        debug_assert_eq!(self.keys.len(), self.values.len());
        (k, v)
    }

    /// Keep only the items for which `f` returns true, in O(n)
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = (0..10).map(|i| (i, i * 10)).collect::<SoaMap<i32, i32>>();
    /// map.retain(|k, v| {
    ///     *v += 1;
    ///     k % 2 == 0
    /// });
    ///
    /// assert_eq!(map.keys_slice(), &[0, 2, 4, 6, 8]);
    /// assert_eq!(map.values_slice(), &[1, 21, 41, 61, 81]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // decide first, so a panicking `f` leaves the map untouched
        let keep = self
            .keys
            .as_slice()
            .iter()
            .zip(self.values.as_mut_slice().iter_mut())
            .map(|(k, v)| f(k, v))
            .collect::<Vec<bool>>();

        let keys = self.keys.as_mut_slice();
        let values = self.values.as_mut_slice();
        let mut write = 0;
        for (read, keep) in keep.into_iter().enumerate() {
            if keep {
                if write != read {
                    keys.swap(write, read);
                    values.swap(write, read);
                }
                write += 1;
            }
        }

        self.keys.truncate(write);
        self.values.truncate(write);
    }

    /// Returns an iterator over the map, in key order
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = SoaMap::<i32, i32>::new();
    /// map.insert(2, 3);
    /// map.insert(1, 2);
    ///
    /// let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// assert_eq!(kvs, vec![(1, 2), (2, 3)]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.keys.as_slice(), self.values.as_slice())
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.keys.as_slice(), self.values.as_mut_slice())
    }

    /// Cursor at position 0
    #[inline]
    pub fn begin(&self) -> Cursor<'_, K, V, C, KS, VS> {
        Cursor::new(self, 0)
    }

    /// Cursor at the one-past-last position
    #[inline]
    pub fn end(&self) -> Cursor<'_, K, V, C, KS, VS> {
        Cursor::new(self, self.len())
    }

    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C, KS, VS> {
        CursorMut::new(self, 0)
    }

    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, C, KS, VS> {
        let len = self.len();
        CursorMut::new(self, len)
    }

    /// Cursor at `index`, `None` if `index > len`
    pub fn cursor_at(&self, index: usize) -> Option<Cursor<'_, K, V, C, KS, VS>> {
        (index <= self.len()).then(|| Cursor::new(self, index))
    }

    pub fn cursor_at_mut(&mut self, index: usize) -> Option<CursorMut<'_, K, V, C, KS, VS>> {
        if index <= self.len() {
            Some(CursorMut::new(self, index))
        } else {
            None
        }
    }

    fn out_of_range(&self, index: usize) -> SoaMapError {
        SoaMapError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl<K, V, C, KS, VS> SoaMap<K, V, C, KS, VS>
where
    C: KeyCompare<K>,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    /// Build a map from unsorted items. Sorted once by `C`, for equivalent keys the first
    /// one in `data` wins, the same as inserting them one by one.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let map = SoaMap::<i32, &str>::bulk_load(vec![(3, "c"), (1, "a"), (3, "x")]);
    ///
    /// assert_eq!(map.keys_slice(), &[1, 3]);
    /// assert_eq!(map.values_slice(), &["a", "c"]);
    /// ```
    pub fn bulk_load(data: Vec<(K, V)>) -> Self
    where
        C: Default,
    {
        Self::bulk_load_with(data, C::default())
    }

    pub fn bulk_load_with(mut data: Vec<(K, V)>, compare: C) -> Self {
        // sort is stable, and dedup_by drops the later item of each equivalent run
        data.sort_by(|a, b| compare.ordering(&a.0, &b.0));
        data.dedup_by(|later, earlier| compare.equivalent(&later.0, &earlier.0));

        let mut map = Self::with_capacity_in(data.len(), compare);
        for (k, v) in data {
            map.keys.push(k);
            map.values.push(v);
        }

        log::debug!("bulk loaded {} items", map.len());

        #[cfg(test)]
        map.validate();

        map
    }

    /// Position of the first key not less than `k`, or `len`
    #[inline]
    pub fn lower_bound_index(&self, k: &K) -> usize {
        search::lower_bound(self.keys.as_slice(), k, &self.compare)
    }

    /// Position of the first key greater than `k`, or `len`
    #[inline]
    pub fn upper_bound_index(&self, k: &K) -> usize {
        search::upper_bound(self.keys.as_slice(), k, &self.compare)
    }

    /// Position of `k`, if present
    #[inline]
    pub fn index_of(&self, k: &K) -> Option<usize> {
        search::search(self.keys.as_slice(), k, &self.compare).ok()
    }

    /// Cursor at the first key not less than `k`, the end cursor if there is none
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let map = (0..50).map(|i| (i * 2, ())).collect::<SoaMap<i32, ()>>();
    ///
    /// assert_eq!(map.lower_bound(&5).key(), &6);
    /// assert_eq!(map.lower_bound(&98).key(), &98);
    /// assert!(map.lower_bound(&99).is_end());
    /// ```
    pub fn lower_bound(&self, k: &K) -> Cursor<'_, K, V, C, KS, VS> {
        Cursor::new(self, self.lower_bound_index(k))
    }

    /// Cursor at the first key greater than `k`, the end cursor if there is none
    pub fn upper_bound(&self, k: &K) -> Cursor<'_, K, V, C, KS, VS> {
        Cursor::new(self, self.upper_bound_index(k))
    }

    /// Cursor at `k`, the end cursor if `k` is absent
    pub fn find(&self, k: &K) -> Cursor<'_, K, V, C, KS, VS> {
        let idx = self.index_of(k).unwrap_or(self.len());
        Cursor::new(self, idx)
    }

    pub fn lower_bound_mut(&mut self, k: &K) -> CursorMut<'_, K, V, C, KS, VS> {
        let idx = self.lower_bound_index(k);
        CursorMut::new(self, idx)
    }

    pub fn upper_bound_mut(&mut self, k: &K) -> CursorMut<'_, K, V, C, KS, VS> {
        let idx = self.upper_bound_index(k);
        CursorMut::new(self, idx)
    }

    pub fn find_mut(&mut self, k: &K) -> CursorMut<'_, K, V, C, KS, VS> {
        let idx = self.index_of(k).unwrap_or(self.len());
        CursorMut::new(self, idx)
    }

    #[inline]
    pub fn contains_key(&self, k: &K) -> bool {
        self.index_of(k).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, k: &K) -> Option<&V> {
        let idx = self.index_of(k)?;
        Some(&self.values.as_slice()[idx])
    }

    /// Returns a mut reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        let idx = self.index_of(k)?;
        Some(&mut self.values.as_mut_slice()[idx])
    }

    /// Returns the value for `k`, or `KeyNotFound`. Never inserts.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::{SoaMap, SoaMapError};
    ///
    /// let mut map = SoaMap::<i32, i32>::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.at(&1), Ok(&2));
    /// assert_eq!(map.at(&2), Err(SoaMapError::KeyNotFound));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn at(&self, k: &K) -> Result<&V> {
        self.get(k).ok_or(SoaMapError::KeyNotFound)
    }

    pub fn at_mut(&mut self, k: &K) -> Result<&mut V> {
        self.get_mut(k).ok_or(SoaMapError::KeyNotFound)
    }

    /// Insert a key-value pair into the map.
    ///
    /// Returns the position of `k` and whether it was inserted. If an equivalent key is
    /// already present, nothing changes and `value` is dropped.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = SoaMap::<i32, i32>::new();
    /// assert_eq!(map.insert(2, 4), (0, true));
    /// assert_eq!(map.insert(1, 2), (0, true));
    /// assert_eq!(map.insert(2, 8), (1, false));
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&2), Some(&4));
    /// ```
    #[inline]
    pub fn insert(&mut self, k: K, value: V) -> (usize, bool) {
        self.emplace(k, || value)
    }

    /// Same as `insert`, but the value is only built if `k` is not present yet. `k` is
    /// searched by reference and then moved into place, it is never cloned.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = SoaMap::<String, Vec<u8>>::new();
    /// assert_eq!(map.emplace("a".to_string(), || vec![0; 1024]), (0, true));
    ///
    /// // key exists, the closure is not called
    /// assert_eq!(map.emplace("a".to_string(), || unreachable!()), (0, false));
    /// ```
    pub fn emplace<F>(&mut self, k: K, make_value: F) -> (usize, bool)
    where
        F: FnOnce() -> V,
    {
        match search::search(self.keys.as_slice(), &k, &self.compare) {
            Ok(idx) => (idx, false),
            Err(idx) => {
                let value = make_value();

                // grow both first, so the two inserts below can't fail half way
                self.keys.reserve(1);
                self.values.reserve(1);
                self.keys.insert(idx, k);
                self.values.insert(idx, value);

                debug_assert_eq!(self.keys.len(), self.values.len());
                (idx, true)
            }
        }
    }

    /// Returns the value for `k`, inserting `f()` first if `k` is absent
    pub fn get_or_insert_with<F>(&mut self, k: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (idx, _) = self.emplace(k, f);
        &mut self.values.as_mut_slice()[idx]
    }

    /// Returns the value for `k`, inserting `V::default()` first if `k` is absent.
    /// Unlike `at`, a missing key is not an error.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = SoaMap::<i32, u32>::new();
    /// *map.get_or_insert_default(42) += 1;
    /// *map.get_or_insert_default(42) += 1;
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&42), Some(&2));
    /// ```
    pub fn get_or_insert_default(&mut self, k: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(k, V::default)
    }

    /// Remove `k` if present. Returns the position now holding the next item, which is
    /// `len` if there is none, or `len` if `k` was absent.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let mut map = (0..4).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();
    ///
    /// assert_eq!(map.erase(&1), 1);
    /// assert_eq!(map.key_at_index(1), Ok(&2));
    /// assert_eq!(map.erase(&1), 3);
    ///
    /// // 3 was the last key, nothing follows it
    /// assert_eq!(map.erase(&3), 2);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn erase(&mut self, k: &K) -> usize {
        match self.index_of(k) {
            Some(idx) => {
                self.remove_at_unchecked(idx);
                idx
            }
            None => self.len(),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map.
    #[inline]
    pub fn remove(&mut self, k: &K) -> Option<V> {
        self.remove_entry(k).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, k: &K) -> Option<(K, V)> {
        let idx = self.index_of(k)?;
        Some(self.remove_at_unchecked(idx))
    }

    /// Iterate items with keys inside `range`. An inverted range yields nothing.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let map = (0..10).map(|i| (i, i * i)).collect::<SoaMap<i32, i32>>();
    ///
    /// let values = map.range(3..6).map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(values, vec![9, 16, 25]);
    ///
    /// assert_eq!(map.range(8..).count(), 2);
    /// assert_eq!(map.range(..=1).count(), 2);
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Iter<'_, K, V> {
        let start = match range.start_bound() {
            Bound::Included(k) => self.lower_bound_index(k),
            Bound::Excluded(k) => self.upper_bound_index(k),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(k) => self.upper_bound_index(k),
            Bound::Excluded(k) => self.lower_bound_index(k),
            Bound::Unbounded => self.len(),
        };
        let end = end.max(start);

        Iter::new(
            &self.keys.as_slice()[start..end],
            &self.values.as_slice()[start..end],
        )
    }

    /// Check the structure invariants, used in test only
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        assert_eq!(self.keys.len(), self.values.len());
        for w in self.keys.as_slice().windows(2) {
            assert!(self.compare.less(&w[0], &w[1]));
        }
    }
}

impl<K, V, C, KS, VS> Clone for SoaMap<K, V, C, KS, VS>
where
    C: Clone,
    KS: Clone,
    VS: Clone,
{
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
            compare: self.compare.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K, V, C, KS, VS> fmt::Debug for SoaMap<K, V, C, KS, VS>
where
    K: fmt::Debug,
    V: fmt::Debug,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, KS, VS> PartialEq for SoaMap<K, V, C, KS, VS>
where
    K: PartialEq,
    V: PartialEq,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn eq(&self, other: &Self) -> bool {
        self.keys_slice() == other.keys_slice() && self.values_slice() == other.values_slice()
    }
}

impl<K: Eq, V: Eq, C, KS: Sequence<K>, VS: Sequence<V>> Eq for SoaMap<K, V, C, KS, VS> {}

impl<K, V, C, KS, VS> FromIterator<(K, V)> for SoaMap<K, V, C, KS, VS>
where
    C: KeyCompare<K> + Default,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::bulk_load(iter.into_iter().collect())
    }
}

/// Inserts one by one, an item whose key is already present is dropped
impl<K, V, C, KS, VS> Extend<(K, V)> for SoaMap<K, V, C, KS, VS>
where
    C: KeyCompare<K>,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C, KS, VS> IntoIterator for SoaMap<K, V, C, KS, VS>
where
    KS: Sequence<K> + IntoIterator<Item = K>,
    VS: Sequence<V> + IntoIterator<Item = V>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<KS::IntoIter, VS::IntoIter>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.keys.into_iter(), self.values.into_iter())
    }
}

impl<'a, K, V, C, KS, VS> IntoIterator for &'a SoaMap<K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C, KS, VS> IntoIterator for &'a mut SoaMap<K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// ensure SoaMap is send for send k v
fn _ensure_send<K: Send, V: Send>() {
    fn _assert_send<T: Send>() {}
    _assert_send::<SoaMap<K, V>>();
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use rand::{seq::SliceRandom, Rng};

    use super::*;
    use crate::{FnCompare, Greater};

    fn forward_fill(map: &mut SoaMap<usize, usize>, size: usize) {
        for i in 0..size {
            map.insert(i, i);
        }
    }

    fn reverse_fill(map: &mut SoaMap<usize, usize>, size: usize) {
        for i in 0..size {
            map.insert(size - i, i);
        }
    }

    #[test]
    fn test_forward_fill_iterates_in_order() {
        let mut map = SoaMap::new();
        map.reserve(100);
        forward_fill(&mut map, 100);
        map.validate();

        let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
        assert_eq!(kvs, (0..100).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_reverse_fill_iterates_in_order() {
        let mut map = SoaMap::new();
        map.reserve(100);
        reverse_fill(&mut map, 100);
        map.validate();

        assert_eq!(map.len(), 100);
        let keys = map.keys().copied().collect::<Vec<_>>();
        assert_eq!(keys, (1..=100).collect::<Vec<_>>());

        // key k arrived at step 100 - k
        for (k, v) in map.iter() {
            assert_eq!(*v, 100 - *k);
        }

        // same walk through cursors
        let mut cursor = map.begin();
        let mut expected = 1;
        while cursor != map.end() {
            assert_eq!(*cursor.key(), expected);
            expected += 1;
            cursor += 1;
        }
        assert_eq!(expected, 101);
    }

    #[test]
    fn test_lower_bound_on_sparse_keys() {
        let mut map = SoaMap::<i32, i32>::new();
        for i in 0..50 {
            map.insert(i * 2, i);
        }

        assert_eq!(*map.lower_bound(&5).key(), 6);
        assert_eq!(*map.lower_bound(&98).key(), 98);
        assert!(map.lower_bound(&99).is_end());
        assert_eq!(map.lower_bound(&99), map.end());
        assert_eq!(map.lower_bound(&-1), map.begin());

        assert_eq!(*map.upper_bound(&6).key(), 8);
        assert_eq!(*map.upper_bound(&5).key(), 6);
        assert!(map.upper_bound(&98).is_end());
    }

    #[test]
    fn test_default_insert() {
        let mut map = SoaMap::<i32, String>::new();
        let v = map.get_or_insert_default(42);
        assert_eq!(v, "");
        v.push_str("hello");

        assert_eq!(map.len(), 1);
        assert!(!map.find(&42).is_end());
        assert_eq!(map.get(&42).unwrap(), "hello");

        // existing key, value untouched
        assert_eq!(map.get_or_insert_default(42), "hello");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut map = SoaMap::<i32, &str>::new();
        assert_eq!(map.insert(7, "first"), (0, true));
        assert_eq!(map.insert(7, "second"), (0, false));

        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&7), Ok(&"first"));
    }

    #[test]
    fn test_erase() {
        let mut map = (0..10).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();

        assert_eq!(map.erase(&4), 4);
        assert_eq!(map.len(), 9);
        assert!(map.find(&4).is_end());
        assert_eq!(*map.find(&5).key(), 5);

        // absent key
        assert_eq!(map.erase(&4), 9);
        assert_eq!(map.erase(&100), 9);
        assert_eq!(map.len(), 9);

        // last key, the next position is the end
        assert_eq!(map.erase(&9), 8);
        assert_eq!(map.len(), 8);
        map.validate();
    }

    #[test]
    fn test_at_and_index_access() {
        let mut map = SoaMap::<i32, i32>::new();
        assert_eq!(map.at(&1), Err(SoaMapError::KeyNotFound));
        assert_eq!(map.at_mut(&1), Err(SoaMapError::KeyNotFound));
        assert!(map.is_empty());

        map.insert(3, 30);
        map.insert(1, 10);

        *map.at_mut(&3).unwrap() += 1;
        assert_eq!(map.at(&3), Ok(&31));

        assert_eq!(map.key_at_index(0), Ok(&1));
        assert_eq!(map.at_index(1), Ok(&31));
        *map.at_index_mut(0).unwrap() = 11;
        assert_eq!(map.get_index(0), Some((&1, &11)));
        assert_eq!(
            map.at_index(2),
            Err(SoaMapError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            map.at_index_mut(5),
            Err(SoaMapError::IndexOutOfRange { index: 5, len: 2 })
        );

        assert_eq!(map.first(), Some((&1, &11)));
        assert_eq!(map.last(), Some((&3, &31)));

        assert_eq!(map.remove_at(0), Ok((1, 11)));
        assert!(map.remove_at(1).is_err());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_emplace_builds_value_once() {
        let mut map = SoaMap::<i32, Rc<i32>>::new();
        let mut calls = 0;

        for _ in 0..3 {
            map.emplace(1, || {
                calls += 1;
                Rc::new(1)
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_clear_and_swap() {
        let mut a = (0..10).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();
        let mut b = SoaMap::<i32, i32>::with_capacity(4);

        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 10);
        assert!(a.key_capacity() >= 4);

        b.clear();
        assert!(b.is_empty());
        assert!(b.key_capacity() >= 10);

        // usable after clear
        b.insert(1, 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_reserve_keeps_content() {
        let mut map = (0..10).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();
        let before = map.clone();

        map.reserve(1000);
        assert!(map.key_capacity() >= 1000);
        assert!(map.value_capacity() >= 1000);
        assert_eq!(map, before);

        // smaller than len, nothing to do
        map.reserve(1);
        map.shrink_to_fit();
        assert_eq!(map, before);
    }

    #[test]
    fn test_custom_comparator() {
        let mut map = SoaMap::<i32, i32, _>::with_comparator(Greater);
        for i in 0..10 {
            map.insert(i, i);
        }
        map.validate();
        assert_eq!(
            map.keys().copied().collect::<Vec<_>>(),
            (0..10).rev().collect::<Vec<_>>()
        );
        assert_eq!(*map.lower_bound(&5).key(), 5);
        assert_eq!(*map.upper_bound(&5).key(), 4);

        // equivalence comes from the comparator, not Eq
        let cmp = FnCompare(|a: &String, b: &String| a.to_lowercase() < b.to_lowercase());
        let mut map = SoaMap::<String, i32, _>::with_capacity_and_comparator(4, cmp);
        assert!(map.insert("Hello".to_string(), 1).1);
        assert!(!map.insert("hello".to_string(), 2).1);
        assert_eq!(map.get(&"HELLO".to_string()), Some(&1));
    }

    #[test]
    fn test_bulk_load_first_wins() {
        let data = vec![(5, 'a'), (1, 'b'), (5, 'c'), (3, 'd'), (1, 'e')];
        let map = SoaMap::<i32, char>::bulk_load(data);

        assert_eq!(map.keys_slice(), &[1, 3, 5]);
        assert_eq!(map.values_slice(), &['b', 'd', 'a']);

        let empty = SoaMap::<i32, char>::bulk_load(vec![]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_extend_and_into_iter() {
        let mut map = SoaMap::<i32, i32>::new();
        map.extend(vec![(2, 20), (1, 10), (2, 200)]);
        assert_eq!(map.get(&2), Some(&20));

        for (_, v) in &mut map {
            *v += 1;
        }
        for v in map.values_mut() {
            *v += 1;
        }

        let owned = map.into_iter().collect::<Vec<_>>();
        assert_eq!(owned, vec![(1, 12), (2, 22)]);
    }

    #[test]
    fn test_retain() {
        let mut map = (0..100).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();
        map.retain(|k, _| k % 3 == 0);
        map.validate();
        assert_eq!(map.len(), 34);
        assert!(map.iter().all(|(k, v)| k == v && k % 3 == 0));

        map.retain(|_, _| false);
        assert!(map.is_empty());
    }

    #[test]
    fn test_debug() {
        let map = (0..3).map(|i| (i, i * 2)).collect::<SoaMap<i32, i32>>();
        assert_eq!(format!("{map:?}"), "{0: 0, 1: 2, 2: 4}");
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn test_smallvec_keys() {
        use smallvec::SmallVec;

        let mut map: SoaMap<u32, String, Less, SmallVec<[u32; 8]>, Vec<String>> =
            SoaMap::default();
        for i in (0..20).rev() {
            map.insert(i, i.to_string());
        }
        map.validate();

        assert_eq!(map.len(), 20);
        assert_eq!(map.get(&7).map(String::as_str), Some("7"));
        assert_eq!(map.remove(&7), Some("7".to_string()));
        assert_eq!(map.into_iter().count(), 19);
    }

    #[test]
    fn test_round_trip_against_btree_map() {
        let mut map = SoaMap::<i64, i64>::new();
        let mut model = BTreeMap::new();
        let mut rng = rand::thread_rng();

        for _ in 0..10_000 {
            let k = rng.gen_range(0..500);
            match rng.gen_range(0..4) {
                0 | 1 => {
                    let (idx, inserted) = map.insert(k, k % 13);
                    assert_eq!(inserted, !model.contains_key(&k));
                    model.entry(k).or_insert(k % 13);
                    assert_eq!(map.key_at_index(idx), Ok(&k));
                }
                2 => {
                    let len = map.len();
                    let next = map.erase(&k);
                    match model.remove(&k) {
                        Some(_) => {
                            assert_eq!(map.len(), len - 1);
                            assert_eq!(next, model.range(..k).count());
                        }
                        None => {
                            assert_eq!(map.len(), len);
                            assert_eq!(next, len);
                        }
                    }
                }
                _ => {
                    assert_eq!(map.get(&k), model.get(&k));
                }
            }
            assert_eq!(map.len(), model.len());
        }

        map.validate();
        assert!(map.iter().eq(model.iter()));
    }

    #[test]
    fn test_shuffled_insert_remove() {
        let size = 2000;
        let mut keys = (0..size).collect::<Vec<i64>>();
        keys.shuffle(&mut rand::thread_rng());

        let mut map = SoaMap::new();
        for k in keys.iter().copied() {
            assert!(map.insert(k, k % 13).1);
            assert_eq!(map.get(&k), Some(&(k % 13)));
        }
        map.validate();
        assert_eq!(map.len(), size as usize);

        keys.shuffle(&mut rand::thread_rng());
        for k in keys {
            assert_eq!(map.remove(&k), Some(k % 13));
            assert!(map.find(&k).is_end());
        }
        assert!(map.is_empty());
    }
}
