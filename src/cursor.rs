use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::{Iter, Less, Pair, PairMut, Sequence, SoaMap};

/// `Cursor` is a position in a `SoaMap`, from `0` to `len` inclusive. `len` is the end
/// position, it has no item.
///
/// Cursors are plain `(map, position)` values: cheap to copy, random access, and they
/// borrow the map so it can't change under them. Two cursors are equal when they point
/// into the same map at the same position.
///
/// # Examples
/// ```rust
/// use soa_map::SoaMap;
///
/// let map = (0..10).map(|i| (i, i * 10)).collect::<SoaMap<i32, i32>>();
///
/// let mut cursor = map.lower_bound(&4);
/// assert_eq!(cursor.value(), &40);
///
/// cursor += 3;
/// assert_eq!(cursor.key(), &7);
/// assert_eq!(cursor - 7, map.begin());
/// assert_eq!(cursor.distance(&map.end()), 3);
///
/// let rest = cursor.iter().map(|(k, _)| *k).collect::<Vec<_>>();
/// assert_eq!(rest, vec![7, 8, 9]);
/// ```
pub struct Cursor<'a, K, V, C = Less, KS = Vec<K>, VS = Vec<V>> {
    map: &'a SoaMap<K, V, C, KS, VS>,
    pos: usize,
}

impl<'a, K, V, C, KS, VS> Clone for Cursor<'a, K, V, C, KS, VS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, C, KS, VS> Copy for Cursor<'a, K, V, C, KS, VS> {}

impl<'a, K, V, C, KS, VS> Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    #[inline(always)]
    pub(crate) fn new(map: &'a SoaMap<K, V, C, KS, VS>, pos: usize) -> Self {
        debug_assert!(pos <= map.len());
        Self { map, pos }
    }

    /// The map this cursor points into
    #[inline]
    pub fn map(&self) -> &'a SoaMap<K, V, C, KS, VS> {
        self.map
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.map.len()
    }

    /// The pair at this position, `None` at the end
    #[inline]
    pub fn get(&self) -> Option<Pair<'a, K, V, C, KS, VS>> {
        (!self.is_end()).then(|| Pair::new(self.map, self.pos))
    }

    /// The pair at this position.
    ///
    /// # Panics
    /// If the cursor is at the end position.
    #[inline]
    pub fn pair(&self) -> Pair<'a, K, V, C, KS, VS> {
        self.assert_not_end();
        Pair::new(self.map, self.pos)
    }

    /// # Panics
    /// If the cursor is at the end position.
    #[inline]
    pub fn key(&self) -> &'a K {
        self.pair().key()
    }

    /// # Panics
    /// If the cursor is at the end position.
    #[inline]
    pub fn value(&self) -> &'a V {
        self.pair().value()
    }

    /// Step forward by one, returns false if already at the end
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.pos += 1;
        true
    }

    /// Step back by one, returns false if already at the first position
    pub fn move_prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }

    pub fn checked_add(self, n: usize) -> Option<Self> {
        let pos = self.pos.checked_add(n)?;
        (pos <= self.map.len()).then_some(Self { map: self.map, pos })
    }

    pub fn checked_sub(self, n: usize) -> Option<Self> {
        let pos = self.pos.checked_sub(n)?;
        Some(Self { map: self.map, pos })
    }

    /// Move by `delta` positions, `None` if that leaves `0..=len`
    pub fn checked_offset(self, delta: isize) -> Option<Self> {
        if delta >= 0 {
            self.checked_add(delta.unsigned_abs())
        } else {
            self.checked_sub(delta.unsigned_abs())
        }
    }

    /// # Panics
    /// If the new position is outside `0..=len`.
    pub fn offset(self, delta: isize) -> Self {
        match self.checked_offset(delta) {
            Some(c) => c,
            None => panic!(
                "cursor at {} moved by {delta}, out of 0..={}",
                self.pos,
                self.map.len()
            ),
        }
    }

    /// Number of steps from `self` to `other`, negative if `other` is before `self`
    ///
    /// # Panics
    /// If the two cursors point into different maps.
    pub fn distance(&self, other: &Self) -> isize {
        self.assert_same_map(other);
        other.pos as isize - self.pos as isize
    }

    /// Exchange position and map with `other`, the maps themselves are untouched
    pub fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Iterate from this position to the end
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(
            &self.map.keys_slice()[self.pos..],
            &self.map.values_slice()[self.pos..],
        )
    }

    /// Iterate the half open range `[self, end)`
    ///
    /// # Panics
    /// If `end` is before `self` or points into another map.
    ///
    /// # Examples
    /// ```rust
    /// use soa_map::SoaMap;
    ///
    /// let map = (0..10).map(|i| (i, ())).collect::<SoaMap<i32, ()>>();
    ///
    /// let keys = map
    ///     .lower_bound(&3)
    ///     .iter_to(&map.upper_bound(&5))
    ///     .map(|(k, _)| *k)
    ///     .collect::<Vec<_>>();
    /// assert_eq!(keys, vec![3, 4, 5]);
    /// ```
    pub fn iter_to(&self, end: &Self) -> Iter<'a, K, V> {
        self.assert_same_map(end);
        assert!(
            self.pos <= end.pos,
            "cursor range {}..{} is inverted",
            self.pos,
            end.pos
        );
        Iter::new(
            &self.map.keys_slice()[self.pos..end.pos],
            &self.map.values_slice()[self.pos..end.pos],
        )
    }

    #[inline]
    fn assert_not_end(&self) {
        assert!(
            !self.is_end(),
            "dereferenced the end cursor of a map of length {}",
            self.map.len()
        );
    }

    #[inline]
    fn assert_same_map(&self, other: &Self) {
        assert!(
            std::ptr::eq(self.map, other.map),
            "cursors point into different maps"
        );
    }
}

impl<'a, K, V, C, KS, VS> PartialEq for Cursor<'a, K, V, C, KS, VS> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.map, other.map) && self.pos == other.pos
    }
}

impl<'a, K, V, C, KS, VS> Eq for Cursor<'a, K, V, C, KS, VS> {}

/// Only cursors into the same map are ordered
impl<'a, K, V, C, KS, VS> PartialOrd for Cursor<'a, K, V, C, KS, VS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        std::ptr::eq(self.map, other.map).then(|| self.pos.cmp(&other.pos))
    }
}

impl<'a, K, V, C, KS, VS> Add<usize> for Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    type Output = Self;

    fn add(self, n: usize) -> Self {
        match self.checked_add(n) {
            Some(c) => c,
            None => panic!(
                "cursor at {} moved past the end {}",
                self.pos,
                self.map.len()
            ),
        }
    }
}

impl<'a, K, V, C, KS, VS> Sub<usize> for Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    type Output = Self;

    fn sub(self, n: usize) -> Self {
        match self.checked_sub(n) {
            Some(c) => c,
            None => panic!("cursor at {} moved before the first position", self.pos),
        }
    }
}

impl<'a, K, V, C, KS, VS> AddAssign<usize> for Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn add_assign(&mut self, n: usize) {
        *self = *self + n;
    }
}

impl<'a, K, V, C, KS, VS> SubAssign<usize> for Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn sub_assign(&mut self, n: usize) {
        *self = *self - n;
    }
}

impl<'a, K, V, C, KS, VS> fmt::Debug for Cursor<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("len", &self.map.len())
            .finish()
    }
}

/// Like `Cursor`, but holds the map exclusively, so the value under it can be changed
/// and the item under it can be removed.
///
/// # Examples
/// ```rust
/// use soa_map::SoaMap;
///
/// let mut map = (0..6).map(|i| (i, i)).collect::<SoaMap<i32, i32>>();
///
/// // remove every odd key, double the rest
/// let mut cursor = map.begin_mut();
/// while !cursor.is_end() {
///     if cursor.key() % 2 == 1 {
///         cursor.remove_current();
///     } else {
///         *cursor.value_mut() *= 2;
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(map.keys_slice(), &[0, 2, 4]);
/// assert_eq!(map.values_slice(), &[0, 4, 8]);
/// ```
pub struct CursorMut<'a, K, V, C = Less, KS = Vec<K>, VS = Vec<V>> {
    map: &'a mut SoaMap<K, V, C, KS, VS>,
    pos: usize,
}

impl<'a, K, V, C, KS, VS> CursorMut<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    #[inline(always)]
    pub(crate) fn new(map: &'a mut SoaMap<K, V, C, KS, VS>, pos: usize) -> Self {
        debug_assert!(pos <= map.len());
        Self { map, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.map.len()
    }

    /// Read only cursor at the same position
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C, KS, VS> {
        Cursor::new(&*self.map, self.pos)
    }

    pub fn get(&self) -> Option<(&K, &V)> {
        self.map.get_index(self.pos)
    }

    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        self.map.get_index_mut(self.pos)
    }

    /// # Panics
    /// If the cursor is at the end position.
    pub fn pair_mut(&mut self) -> PairMut<'_, K, V, C, KS, VS> {
        self.assert_not_end();
        PairMut::new(self.map, self.pos)
    }

    /// # Panics
    /// If the cursor is at the end position.
    pub fn key(&self) -> &K {
        self.assert_not_end();
        self.map.index_pair(self.pos).0
    }

    /// # Panics
    /// If the cursor is at the end position.
    pub fn value(&self) -> &V {
        self.assert_not_end();
        self.map.index_pair(self.pos).1
    }

    /// # Panics
    /// If the cursor is at the end position.
    pub fn value_mut(&mut self) -> &mut V {
        self.assert_not_end();
        self.map.index_pair_mut(self.pos).1
    }

    /// Turn into a reference to the value, which lives as long as the map borrow
    ///
    /// # Panics
    /// If the cursor is at the end position.
    pub fn into_value_mut(self) -> &'a mut V {
        self.assert_not_end();
        let map = self.map;
        map.index_pair_mut(self.pos).1
    }

    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.pos += 1;
        true
    }

    pub fn move_prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }

    /// Jump to `pos`, returns false and stays put if `pos > len`
    pub fn seek(&mut self, pos: usize) -> bool {
        if pos > self.map.len() {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Remove the item under the cursor. The cursor then points at the item that
    /// followed it, or the end. Returns `None` at the end position.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.is_end() {
            return None;
        }
        self.map.remove_at(self.pos).ok()
    }

    #[inline]
    fn assert_not_end(&self) {
        assert!(
            !self.is_end(),
            "dereferenced the end cursor of a map of length {}",
            self.map.len()
        );
    }
}

impl<'a, K, V, C, KS, VS> fmt::Debug for CursorMut<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.pos)
            .field("len", &self.map.len())
            .finish()
    }
}
