//! Error types for symbol table operations.

use core::fmt;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymTableError {
    /// A binding with the same key already exists; nothing was changed.
    #[error("key is already bound")]
    DuplicateKey,
    /// The table, a binding or its key copy could not be allocated.
    #[error("allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Failed `put`. Hands the rejected value back so the table never drops a
/// value it did not bind.
#[derive(Error)]
#[error("failed to bind key: {error}")]
pub struct PutError<V> {
    #[source]
    error: SymTableError,
    value: V,
}

impl<V> PutError<V> {
    pub(crate) fn new(error: SymTableError, value: V) -> Self {
        Self { error, value }
    }

    pub fn error(&self) -> &SymTableError {
        &self.error
    }

    pub fn is_duplicate(&self) -> bool {
        self.error == SymTableError::DuplicateKey
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (SymTableError, V) {
        (self.error, self.value)
    }
}

impl<V> fmt::Debug for PutError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PutError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
