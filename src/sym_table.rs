//! SymTable: separate-chaining hash table with prime-sized growth.

use crate::chain::{Chains, Link, Walk};
use crate::error::{PutError, SymTableError};
use crate::hash::{bucket_index, size_class, BUCKET_COUNTS};
use core::fmt;
use core::iter::FusedIterator;

/// Whether a table follows [`BUCKET_COUNTS`] as it fills up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Growth {
    /// Step to the next bucket count whenever the binding count reaches the
    /// current one, up to the last entry of the sequence.
    #[default]
    Expanding,
    /// Stay at the initial bucket count forever.
    Fixed,
}

/// A map from owned string keys to caller-provided value handles.
///
/// The table copies each key on `put` and drops the copy on `remove` or
/// teardown. Values are stored as given and handed back untouched by
/// [`remove`](Self::remove), [`replace`](Self::replace) and
/// [`free`](Self::free); with `V = &T` or `Rc<T>` the payload stays owned
/// by the caller.
pub struct SymTable<V> {
    buckets: Vec<Link>,
    chains: Chains<V>,
    growth: Growth,
}

impl<V> SymTable<V> {
    pub fn new() -> Self {
        Self::with_growth(Growth::default())
    }

    /// Like [`new`](Self::new), but reports allocation failure instead of
    /// aborting.
    pub fn try_new() -> Result<Self, SymTableError> {
        Self::try_with_growth(Growth::default())
    }

    pub fn with_growth(growth: Growth) -> Self {
        Self {
            buckets: vec![None; BUCKET_COUNTS[0]],
            chains: Chains::new(),
            growth,
        }
    }

    pub fn try_with_growth(growth: Growth) -> Result<Self, SymTableError> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(BUCKET_COUNTS[0])?;
        buckets.resize(BUCKET_COUNTS[0], None);
        Ok(Self {
            buckets,
            chains: Chains::new(),
            growth,
        })
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current bucket count; always an entry of [`BUCKET_COUNTS`].
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    #[inline]
    fn bucket(&self, key: &str) -> usize {
        bucket_index(key, self.buckets.len())
    }

    /// Binds `key` to `value` if `key` is not bound yet.
    ///
    /// On failure nothing changes and the value comes back inside the
    /// error. A successful insert that brings the count up to the bucket
    /// count also grows the table; growth that cannot allocate is skipped
    /// and retried on a later insert.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError<V>> {
        let i = self.bucket(key);
        self.chains.push_back(&mut self.buckets[i], key, value)?;
        if self.growth == Growth::Expanding && self.len() >= self.capacity() {
            self.grow();
        }
        Ok(())
    }

    fn grow(&mut self) {
        let from = self.capacity();
        let Some(&to) = size_class(from).and_then(|c| BUCKET_COUNTS.get(c + 1)) else {
            return;
        };
        let mut heads: Vec<Link> = Vec::new();
        let mut tails: Vec<Link> = Vec::new();
        if let Err(e) = heads
            .try_reserve_exact(to)
            .and_then(|()| tails.try_reserve_exact(to))
        {
            tracing::warn!(from, to, len = self.len(), error = %e, "symtable growth skipped");
            return;
        }
        heads.resize(to, None);
        tails.resize(to, None);
        self.chains
            .rehash(&self.buckets, &mut heads, &mut tails, |k| bucket_index(k, to));
        self.buckets = heads;
        tracing::debug!(from, to, len = self.len(), "symtable grew");
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.chains
            .find(self.buckets[self.bucket(key)], key)
            .map(|b| &b.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.chains
            .find(self.buckets[self.bucket(key)], key)
            .is_some()
    }

    /// Swaps the value bound to `key` and returns the previous one. When
    /// `key` is unbound the table is unchanged and `value` is returned as
    /// the error.
    pub fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        let head = self.buckets[self.bucket(key)];
        self.chains.replace(head, key, value)
    }

    /// Unbinds `key` and returns its value. Capacity never shrinks.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self.bucket(key);
        self.chains.remove(&mut self.buckets[i], key)
    }

    /// Calls `visit` on every binding, in bucket order then chain order.
    pub fn map<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Like [`map`](Self::map) with mutable access to the values.
    pub fn map_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        for &head in &self.buckets {
            self.chains.for_each_mut(head, &mut visit);
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            chains: &self.chains,
            buckets: self.buckets.iter(),
            walk: self.chains.walk(None),
            remaining: self.len(),
        }
    }

    /// Tears the table down, releasing every key and binding. The value
    /// handles are returned in [`map`](Self::map) order.
    pub fn free(self) -> Vec<V> {
        let Self { buckets, chains, .. } = self;
        chains.into_values(&buckets)
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        assert!(size_class(self.capacity()).is_some(), "capacity off sequence");
        if self.growth == Growth::Fixed {
            assert_eq!(self.capacity(), BUCKET_COUNTS[0]);
        }
        let mut seen = HashSet::new();
        for (i, &head) in self.buckets.iter().enumerate() {
            for b in self.chains.walk(head) {
                assert_eq!(bucket_index(&b.key, self.capacity()), i, "misplaced {:?}", b.key);
                assert!(seen.insert(b.key.clone()), "duplicate key {:?}", b.key);
            }
        }
        assert_eq!(seen.len(), self.len(), "unreachable bindings");
    }
}

impl<V> Default for SymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SymTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the bindings of a [`SymTable`], in `map` order.
pub struct Iter<'a, V> {
    chains: &'a Chains<V>,
    buckets: core::slice::Iter<'a, Link>,
    walk: Walk<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(b) = self.walk.next() {
                self.remaining -= 1;
                return Some((b.key.as_str(), &b.value));
            }
            let &head = self.buckets.next()?;
            self.walk = self.chains.walk(head);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a SymTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
