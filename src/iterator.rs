use std::{iter::FusedIterator, slice};

/// A borrowed iterator for SoaMap, walks the key and value sequences side by side.
pub struct Iter<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::Iter<'a, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a [V]) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self {
            keys: keys.iter(),
            values: values.iter(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.keys.next()?;
        let v = self.values.next()?;
        Some((k, v))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.keys.next_back()?;
        let v = self.values.next_back()?;
        Some((k, v))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Like `Iter`, with mutable values. Keys stay read only.
pub struct IterMut<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::IterMut<'a, V>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a mut [V]) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self {
            keys: keys.iter(),
            values: values.iter_mut(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.keys.next()?;
        let v = self.values.next()?;
        Some((k, v))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.keys.next_back()?;
        let v = self.values.next_back()?;
        Some((k, v))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Owning iterator, drains both sequences in key order.
/// Items not yet yielded are dropped together with the iterator.
pub struct IntoIter<KI, VI> {
    keys: KI,
    values: VI,
}

impl<KI, VI> IntoIter<KI, VI> {
    pub(crate) fn new(keys: KI, values: VI) -> Self {
        Self { keys, values }
    }
}

impl<KI: Iterator, VI: Iterator> Iterator for IntoIter<KI, VI> {
    type Item = (KI::Item, VI::Item);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.keys.next()?;
        let v = self.values.next()?;
        Some((k, v))
    }
}

impl<KI, VI> DoubleEndedIterator for IntoIter<KI, VI>
where
    KI: DoubleEndedIterator,
    VI: DoubleEndedIterator,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.keys.next_back()?;
        let v = self.values.next_back()?;
        Some((k, v))
    }
}

impl<KI: ExactSizeIterator, VI: ExactSizeIterator> ExactSizeIterator for IntoIter<KI, VI> {}
impl<KI: FusedIterator, VI: FusedIterator> FusedIterator for IntoIter<KI, VI> {}
