//! Typed HTTP client for the QuoteDesk API plus the per-session list cache
//! a front-end keeps between requests.

pub mod api;
pub mod cache;
pub mod error;
pub mod session;

pub use api::{ApiClient, Deleted, Health};
pub use cache::{ListCache, ViewCache};
pub use error::ClientError;
pub use session::Session;
