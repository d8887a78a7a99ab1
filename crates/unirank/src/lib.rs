//! The unirank batch pipeline: fetch each year's ranking table, store it,
//! and chart the leading institutions.
//!
//! The binary in `main.rs` wires these pieces to the concrete HTTP source and
//! SQLite store; everything here is generic over
//! [`RankingSource`](unirank_core::source::RankingSource) and
//! [`RankingStore`](unirank_core::store::RankingStore).

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use crate::config::{AppConfig, ConfigError};
pub use error::Error;
