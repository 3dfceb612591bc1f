//! `SymbolTable`: the operations shared by every table kind.

use crate::error::PutError;
use crate::sym_table::SymTable;
use crate::sym_table_list::SymTableList;

pub trait SymbolTable<V> {
    /// Number of live bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds a copy of `key` to `value`; fails if `key` is already bound.
    fn put(&mut self, key: &str, value: V) -> Result<(), PutError<V>>;

    fn get(&self, key: &str) -> Option<&V>;

    fn contains(&self, key: &str) -> bool;

    /// Swaps in `value` and returns the old one; `Err(value)` if unbound.
    fn replace(&mut self, key: &str, value: V) -> Result<V, V>;

    fn remove(&mut self, key: &str) -> Option<V>;

    /// Visits every binding once. The visitor cannot change the structure
    /// of the table while it runs.
    fn map<F>(&self, visit: F)
    where
        F: FnMut(&str, &V);

    fn map_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&str, &mut V);
}

macro_rules! forward_symbol_table {
    ($ty:ident) => {
        impl<V> SymbolTable<V> for $ty<V> {
            fn len(&self) -> usize {
                $ty::len(self)
            }
            fn put(&mut self, key: &str, value: V) -> Result<(), PutError<V>> {
                $ty::put(self, key, value)
            }
            fn get(&self, key: &str) -> Option<&V> {
                $ty::get(self, key)
            }
            fn contains(&self, key: &str) -> bool {
                $ty::contains(self, key)
            }
            fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
                $ty::replace(self, key, value)
            }
            fn remove(&mut self, key: &str) -> Option<V> {
                $ty::remove(self, key)
            }
            fn map<F>(&self, visit: F)
            where
                F: FnMut(&str, &V),
            {
                $ty::map(self, visit)
            }
            fn map_mut<F>(&mut self, visit: F)
            where
                F: FnMut(&str, &mut V),
            {
                $ty::map_mut(self, visit)
            }
        }
    };
}

forward_symbol_table!(SymTable);
forward_symbol_table!(SymTableList);
