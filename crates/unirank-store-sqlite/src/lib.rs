//! SQLite backend for the unirank ranking store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod schema;
mod store;
mod url;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
pub use url::StoreLocation;
