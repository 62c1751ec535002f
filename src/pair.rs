use std::{cmp::Ordering, fmt};

use crate::{KeyCompare, Less, Sequence, SoaMap};

/// Read only view of the item at one position of a `SoaMap`.
///
/// There is no `(K, V)` in memory to point to, the key and the value live in two
/// different sequences, so `Pair` keeps the map and the position and resolves
/// `key()`/`value()` on demand.
pub struct Pair<'a, K, V, C = Less, KS = Vec<K>, VS = Vec<V>> {
    map: &'a SoaMap<K, V, C, KS, VS>,
    pos: usize,
}

impl<'a, K, V, C, KS, VS> Clone for Pair<'a, K, V, C, KS, VS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, C, KS, VS> Copy for Pair<'a, K, V, C, KS, VS> {}

impl<'a, K, V, C, KS, VS> Pair<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    #[inline]
    pub(crate) fn new(map: &'a SoaMap<K, V, C, KS, VS>, pos: usize) -> Self {
        assert!(
            pos < map.len(),
            "pair position {pos} out of range for map of length {}",
            map.len()
        );
        Self { map, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn key(&self) -> &'a K {
        self.map.index_pair(self.pos).0
    }

    #[inline]
    pub fn value(&self) -> &'a V {
        self.map.index_pair(self.pos).1
    }

    #[inline]
    pub fn into_parts(self) -> (&'a K, &'a V) {
        self.map.index_pair(self.pos)
    }
}

/// Pairs compare by key, with the comparator of the left hand side's map
impl<'a, 'b, K, V, C, KS, VS> PartialEq<Pair<'b, K, V, C, KS, VS>> for Pair<'a, K, V, C, KS, VS>
where
    C: KeyCompare<K>,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn eq(&self, other: &Pair<'b, K, V, C, KS, VS>) -> bool {
        self.map.comparator().equivalent(self.key(), other.key())
    }
}

impl<'a, 'b, K, V, C, KS, VS> PartialOrd<Pair<'b, K, V, C, KS, VS>> for Pair<'a, K, V, C, KS, VS>
where
    C: KeyCompare<K>,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn partial_cmp(&self, other: &Pair<'b, K, V, C, KS, VS>) -> Option<Ordering> {
        Some(self.map.comparator().ordering(self.key(), other.key()))
    }
}

impl<'a, K, V, C, KS, VS> fmt::Debug for Pair<'a, K, V, C, KS, VS>
where
    K: fmt::Debug,
    V: fmt::Debug,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

/// View of the item at one position, with a mutable value.
///
/// The key is never handed out mutably, changing it in place could break the order.
pub struct PairMut<'a, K, V, C = Less, KS = Vec<K>, VS = Vec<V>> {
    map: &'a mut SoaMap<K, V, C, KS, VS>,
    pos: usize,
}

impl<'a, K, V, C, KS, VS> PairMut<'a, K, V, C, KS, VS>
where
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    #[inline]
    pub(crate) fn new(map: &'a mut SoaMap<K, V, C, KS, VS>, pos: usize) -> Self {
        assert!(
            pos < map.len(),
            "pair position {pos} out of range for map of length {}",
            map.len()
        );
        Self { map, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn key(&self) -> &K {
        self.map.index_pair(self.pos).0
    }

    #[inline]
    pub fn value(&self) -> &V {
        self.map.index_pair(self.pos).1
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        self.map.index_pair_mut(self.pos).1
    }

    /// Put `value` in place, returning the old one
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(self.value_mut(), value)
    }

    pub fn into_value_mut(self) -> &'a mut V {
        self.map.index_pair_mut(self.pos).1
    }

    pub fn into_parts(self) -> (&'a K, &'a mut V) {
        self.map.index_pair_mut(self.pos)
    }
}

impl<'a, K, V, C, KS, VS> fmt::Debug for PairMut<'a, K, V, C, KS, VS>
where
    K: fmt::Debug,
    V: fmt::Debug,
    KS: Sequence<K>,
    VS: Sequence<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairMut")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}
