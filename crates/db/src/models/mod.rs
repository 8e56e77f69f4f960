//! Row structs for each table.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any joined/aggregated view of it. Input DTOs live
//! in `quotedesk_core::schema`.

pub mod client;
pub mod price;
pub mod procedure;
pub mod quote;
