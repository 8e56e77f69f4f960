//! Request handlers, one submodule per resource.
//!
//! Reads run a single statement on the pool. Every mutating handler follows
//! the same shape: input is validated by the extractor, then the handler
//! opens one transaction with `state.pool.begin()`, runs its repository
//! calls on `&mut *tx`, and commits. Any `?` before the commit drops the
//! transaction, which rolls it back and returns the connection to the pool.

pub mod client;
pub mod price;
pub mod procedure;
pub mod quote;
