//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! List queries take `&PgPool`; writes take `&mut PgConnection` so several
//! of them can share one transaction (`&mut *tx`); single-row lookups accept
//! any executor so they work both on the pool and inside a transaction.

pub mod client_repo;
pub mod price_repo;
pub mod procedure_repo;
pub mod quote_repo;

pub use client_repo::ClientRepo;
pub use price_repo::PriceRepo;
pub use procedure_repo::ProcedureRepo;
pub use quote_repo::QuoteRepo;
