//! Core types and trait definitions for unirank.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! fetcher, the SQLite store and the chart renderer all depend on it.

pub mod error;
pub mod model;
pub mod record;
pub mod source;
pub mod store;

pub use error::FetchError;
