//! symtable: a string-keyed symbol table with separate chaining and
//! prime-sized incremental growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a mutable map from unique string keys to caller-provided value
//!   handles, with bucket sizing that stays close to one binding per
//!   bucket.
//! - Layers:
//!   - `hash`: the `h * 65599 + byte` key hash and the bucket size
//!     sequence `BUCKET_COUNTS`.
//!   - `Chains<V>`: an arena (`slotmap::SlotMap`) holding every binding of
//!     a table, with bindings linked into singly linked chains by slot key.
//!     All structural edits (append, unlink, relink) live here.
//!   - `SymTable<V>`: one chain head per bucket; grows along
//!     `BUCKET_COUNTS` as bindings are added.
//!   - `SymTableList<V>`: one chain for the whole table; linear but
//!     allocation-free until the first insert.
//!   - `SymbolTable<V>`: the trait both tables implement.
//!
//! Constraints
//! - Keys are unique; a duplicate `put` fails and leaves the table as it was.
//! - Keys are copied into the table on `put`. Values are stored as given and
//!   returned unchanged by `remove`, `replace` and `free`; the table never
//!   inspects them.
//! - Bucket counts come from `BUCKET_COUNTS` only and never shrink.
//! - Single-threaded; callers sharing a table across threads serialize
//!   access themselves.
//!
//! Growth
//! - After a successful insert, if the binding count has reached the bucket
//!   count and a larger size exists, a new bucket array is allocated and
//!   every binding is relinked into it. Keys are not copied during growth.
//! - If the new bucket array cannot be allocated, growth is skipped with a
//!   `tracing` warning and the table keeps working at its current size. The
//!   insert that triggered it still succeeds.
//! - `Growth::Fixed` disables growth entirely.
//!
//! Errors
//! - `put` returns `PutError<V>`, which carries a `SymTableError` and the
//!   rejected value.
//! - `try_new` reports allocation failure as `SymTableError::OutOfMemory`.
//! - Missing keys are ordinary `None`/`Err(value)` results, not errors.
//!
//! Notes and non-goals
//! - No ordering guarantee beyond "bucket order, then chain order" for
//!   `SymTable` and insertion order for `SymTableList`.
//! - Visitors passed to `map`/`map_mut` may read their captured state
//!   freely; the borrow on the table keeps them from restructuring it.

mod chain;
mod error;
pub mod hash;
mod sym_table;
mod sym_table_list;
mod sym_table_proptest;
mod table;

// Public surface
pub use error::{PutError, SymTableError};
pub use hash::BUCKET_COUNTS;
pub use sym_table::{Growth, Iter, SymTable};
pub use sym_table_list::{ListIter, SymTableList};
pub use table::SymbolTable;
