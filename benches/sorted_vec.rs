/// Array of structures baseline: one sorted `Vec<(K, V)>`, same semantics as `SoaMap`
#[derive(Default, Clone)]
pub struct SortedVec<K, V> {
    store: Vec<(K, V)>,
}

impl<K: Ord + Copy, V> SortedVec<K, V> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            store: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter().map(|kv| (&kv.0, &kv.1))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.store.iter().map(|kv| &kv.0)
    }

    /// first insert wins
    pub fn insert(&mut self, k: K, v: V) -> bool {
        match self.store.binary_search_by_key(&k, |i| i.0) {
            Ok(_) => false,
            Err(idx) => {
                self.store.insert(idx, (k, v));
                true
            }
        }
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        match self.store.binary_search_by_key(k, |i| i.0) {
            Ok(idx) => Some(&self.store[idx].1),
            Err(_) => None,
        }
    }
}
