//! Chains: arena-backed singly linked lists of bindings.
//!
//! Every binding of a table lives in one `SlotMap`; a chain is a head
//! `Link` plus the `next` links stored in its bindings. Tables own the
//! heads (one per bucket, or a single one for the list table) and route
//! all structural changes through `Chains`, so keys are allocated once on
//! insert and only relinked afterwards.
//!
//! Invariant: every `Some(slot)` reachable from a head names a live slot,
//! and every live slot is reachable from exactly one head.

use crate::error::{PutError, SymTableError};
use slotmap::{DefaultKey, SlotMap};

pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub(crate) struct Binding<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    next: Link,
}

/// Where a key sits in one chain.
pub(crate) enum Lookup {
    /// Bound at `at`; `prev` is `None` when `at` is the head.
    Found { prev: Link, at: DefaultKey },
    /// Not bound; `tail` is the last binding, `None` for an empty chain.
    Vacant { tail: Link },
}

#[derive(Debug)]
pub(crate) struct Chains<V> {
    slots: SlotMap<DefaultKey, Binding<V>>,
}

impl<V> Chains<V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn locate(&self, head: Link, key: &str) -> Lookup {
        let mut prev = None;
        let mut cur = head;
        while let Some(at) = cur {
            let b = &self.slots[at];
            if b.key == key {
                return Lookup::Found { prev, at };
            }
            prev = cur;
            cur = b.next;
        }
        Lookup::Vacant { tail: prev }
    }

    pub(crate) fn find(&self, head: Link, key: &str) -> Option<&Binding<V>> {
        match self.locate(head, key) {
            Lookup::Found { at, .. } => self.slots.get(at),
            Lookup::Vacant { .. } => None,
        }
    }

    /// Binds `key` at the end of the chain starting at `*head`. The table
    /// is untouched when the key is already bound or when room for the
    /// binding or its key copy cannot be allocated.
    pub(crate) fn push_back(&mut self, head: &mut Link, key: &str, value: V) -> Result<(), PutError<V>> {
        let tail = match self.locate(*head, key) {
            Lookup::Found { .. } => return Err(PutError::new(SymTableError::DuplicateKey, value)),
            Lookup::Vacant { tail } => tail,
        };
        if let Err(e) = self.slots.try_reserve(1) {
            return Err(PutError::new(e.into(), value));
        }
        let mut owned = String::new();
        if let Err(e) = owned.try_reserve_exact(key.len()) {
            return Err(PutError::new(e.into(), value));
        }
        owned.push_str(key);
        let at = self.slots.insert(Binding {
            key: owned,
            value,
            next: None,
        });
        match tail {
            Some(t) => self.slots[t].next = Some(at),
            None => *head = Some(at),
        }
        Ok(())
    }

    pub(crate) fn replace(&mut self, head: Link, key: &str, value: V) -> Result<V, V> {
        match self.locate(head, key) {
            Lookup::Found { at, .. } => Ok(core::mem::replace(&mut self.slots[at].value, value)),
            Lookup::Vacant { .. } => Err(value),
        }
    }

    /// Unlinks and drops the binding for `key`, returning its value.
    pub(crate) fn remove(&mut self, head: &mut Link, key: &str) -> Option<V> {
        let (prev, at) = match self.locate(*head, key) {
            Lookup::Found { prev, at } => (prev, at),
            Lookup::Vacant { .. } => return None,
        };
        let next = self.slots[at].next;
        match prev {
            Some(p) => self.slots[p].next = next,
            None => *head = next,
        }
        self.slots.remove(at).map(|b| b.value)
    }

    pub(crate) fn walk(&self, head: Link) -> Walk<'_, V> {
        Walk {
            slots: &self.slots,
            cur: head,
        }
    }

    pub(crate) fn for_each_mut<F>(&mut self, head: Link, visit: &mut F)
    where
        F: FnMut(&str, &mut V),
    {
        let mut cur = head;
        while let Some(at) = cur {
            let b = &mut self.slots[at];
            visit(&b.key, &mut b.value);
            cur = b.next;
        }
    }

    /// Moves every binding reachable from `old` onto the chains `heads`,
    /// placing each at the tail of bucket `index(key)`. `heads` and `tails`
    /// must be all `None` and of equal length. Keys are not copied; only
    /// links change, and the relative order of bindings that share a new
    /// bucket follows the traversal order of `old`.
    pub(crate) fn rehash<F>(&mut self, old: &[Link], heads: &mut [Link], tails: &mut [Link], index: F)
    where
        F: Fn(&str) -> usize,
    {
        for &head in old {
            let mut cur = head;
            while let Some(at) = cur {
                let b = &mut self.slots[at];
                cur = b.next.take();
                let i = index(&b.key);
                match tails[i] {
                    Some(t) => self.slots[t].next = Some(at),
                    None => heads[i] = Some(at),
                }
                tails[i] = Some(at);
            }
        }
    }

    /// Drops every binding, handing back the values in the order of
    /// `heads` then chain order.
    pub(crate) fn into_values(mut self, heads: &[Link]) -> Vec<V> {
        let mut out = Vec::with_capacity(self.slots.len());
        for &head in heads {
            let mut cur = head;
            while let Some(at) = cur {
                match self.slots.remove(at) {
                    Some(b) => {
                        cur = b.next;
                        out.push(b.value);
                    }
                    None => break,
                }
            }
        }
        out
    }
}

/// Borrowing walk over one chain.
pub(crate) struct Walk<'a, V> {
    slots: &'a SlotMap<DefaultKey, Binding<V>>,
    cur: Link,
}

impl<'a, V> Iterator for Walk<'a, V> {
    type Item = &'a Binding<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let b = slots.get(self.cur?)?;
        self.cur = b.next;
        Some(b)
    }
}
