//! SymTableList: the symbol table contract over a single chain.
//!
//! Every operation is a linear scan. Useful as a reference model for
//! [`SymTable`](crate::SymTable) and for tables that stay small.

use crate::chain::{Chains, Link, Walk};
use crate::error::{PutError, SymTableError};
use core::fmt;
use core::iter::FusedIterator;

pub struct SymTableList<V> {
    head: Link,
    chains: Chains<V>,
}

impl<V> SymTableList<V> {
    pub fn new() -> Self {
        Self {
            head: None,
            chains: Chains::new(),
        }
    }

    /// Returns an empty list. Nothing is allocated until the first `put`.
    pub fn try_new() -> Result<Self, SymTableError> {
        Ok(Self::new())
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a binding after checking the whole list for `key`.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError<V>> {
        self.chains.push_back(&mut self.head, key, value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.chains.find(self.head, key).map(|b| &b.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.chains.find(self.head, key).is_some()
    }

    pub fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        self.chains.replace(self.head, key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.chains.remove(&mut self.head, key)
    }

    /// Visits bindings in insertion order.
    pub fn map<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    pub fn map_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        self.chains.for_each_mut(self.head, &mut visit);
    }

    pub fn iter(&self) -> ListIter<'_, V> {
        ListIter {
            walk: self.chains.walk(self.head),
            remaining: self.len(),
        }
    }

    pub fn free(self) -> Vec<V> {
        self.chains.into_values(&[self.head])
    }
}

impl<V> Default for SymTableList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SymTableList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over a [`SymTableList`] in insertion order.
pub struct ListIter<'a, V> {
    walk: Walk<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for ListIter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let b = self.walk.next()?;
        self.remaining -= 1;
        Some((b.key.as_str(), &b.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for ListIter<'_, V> {}
impl<V> FusedIterator for ListIter<'_, V> {}

impl<'a, V> IntoIterator for &'a SymTableList<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = ListIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
