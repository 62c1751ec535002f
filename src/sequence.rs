/// One contiguous backing sequence of a `SoaMap`.
///
/// Keys and values each live in their own `Sequence`, so the storage
/// strategy can be picked per field, e.g. inline `SmallVec` keys with
/// heap `Vec` values.
pub trait Sequence<T>: Default {
    fn with_capacity(capacity: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Reserve room for at least `additional` more items
    fn reserve(&mut self, additional: usize);

    fn shrink_to_fit(&mut self);

    /// Insert `item` at `index`, shifting all items after it to the right
    fn insert(&mut self, index: usize, item: T);

    /// Remove and return the item at `index`, shifting all items after it to the left
    fn remove(&mut self, index: usize) -> T;

    fn push(&mut self, item: T);

    /// Drop all items from `len` onwards
    fn truncate(&mut self, len: usize);

    fn clear(&mut self);

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];
}

impl<T> Sequence<T> for Vec<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    #[inline]
    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional)
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self)
    }

    #[inline]
    fn insert(&mut self, index: usize, item: T) {
        Vec::insert(self, index, item)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> T {
        Vec::remove(self, index)
    }

    #[inline]
    fn push(&mut self, item: T) {
        Vec::push(self, item)
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len)
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }

    #[inline(always)]
    fn as_slice(&self) -> &[T] {
        Vec::as_slice(self)
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [T] {
        Vec::as_mut_slice(self)
    }
}

#[cfg(feature = "smallvec")]
mod small {
    use super::Sequence;
    use smallvec::{Array, SmallVec};

    /// Inline storage for the first `A::size()` items, spills to the heap after that
    impl<A: Array> Sequence<A::Item> for SmallVec<A> {
        #[inline]
        fn with_capacity(capacity: usize) -> Self {
            SmallVec::with_capacity(capacity)
        }

        #[inline]
        fn len(&self) -> usize {
            SmallVec::len(self)
        }

        #[inline]
        fn capacity(&self) -> usize {
            SmallVec::capacity(self)
        }

        #[inline]
        fn reserve(&mut self, additional: usize) {
            SmallVec::reserve(self, additional)
        }

        fn shrink_to_fit(&mut self) {
            SmallVec::shrink_to_fit(self)
        }

        #[inline]
        fn insert(&mut self, index: usize, item: A::Item) {
            SmallVec::insert(self, index, item)
        }

        #[inline]
        fn remove(&mut self, index: usize) -> A::Item {
            SmallVec::remove(self, index)
        }

        #[inline]
        fn push(&mut self, item: A::Item) {
            SmallVec::push(self, item)
        }

        fn truncate(&mut self, len: usize) {
            SmallVec::truncate(self, len)
        }

        fn clear(&mut self) {
            SmallVec::clear(self)
        }

        #[inline(always)]
        fn as_slice(&self) -> &[A::Item] {
            SmallVec::as_slice(self)
        }

        #[inline(always)]
        fn as_mut_slice(&mut self) -> &mut [A::Item] {
            SmallVec::as_mut_slice(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sequence<S: Sequence<u32>>() {
        let mut s = S::with_capacity(4);
        assert!(s.is_empty());
        assert!(s.capacity() >= 4);

        s.push(1);
        s.push(3);
        s.insert(1, 2);
        s.insert(0, 0);
        assert_eq!(s.as_slice(), &[0, 1, 2, 3]);

        assert_eq!(s.remove(1), 1);
        assert_eq!(s.as_slice(), &[0, 2, 3]);

        s.as_mut_slice()[0] = 10;
        assert_eq!(s.as_slice(), &[10, 2, 3]);

        s.truncate(2);
        assert_eq!(s.as_slice(), &[10, 2]);

        s.reserve(100);
        assert!(s.capacity() >= 102);

        s.clear();
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn test_vec_sequence() {
        test_sequence::<Vec<u32>>();
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn test_smallvec_sequence() {
        test_sequence::<smallvec::SmallVec<[u32; 2]>>();
        test_sequence::<smallvec::SmallVec<[u32; 16]>>();
    }
}
