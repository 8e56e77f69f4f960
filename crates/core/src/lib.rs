//! Domain layer for the clinic quoting backend.
//!
//! Holds everything that does not touch the database or HTTP: input
//! schemas and their validation rules, the shared error type, id and
//! timestamp aliases, and quote/procedure pricing math.

pub mod error;
pub mod pricing;
pub mod schema;
pub mod types;
