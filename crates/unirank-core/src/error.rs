//! Error types for `unirank-core`.

use thiserror::Error;

/// Why a single year's ranking payload could not be obtained.
///
/// Every variant is recoverable: the pipeline logs it and moves on to the
/// next year.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  /// The endpoint answered with something other than `200 OK`.
  #[error("HTTP status {status} for year {year}")]
  Status { year: i32, status: u16 },

  /// The request never produced a response (DNS, connect, TLS, body read).
  #[error("request failed: {0}")]
  Transport(String),

  /// The body was not a JSON array of ranking records.
  #[error("invalid ranking payload: {0}")]
  Decode(String),
}

impl From<serde_json::Error> for FetchError {
  fn from(e: serde_json::Error) -> Self { FetchError::Decode(e.to_string()) }
}
