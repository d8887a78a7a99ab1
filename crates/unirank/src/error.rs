//! Error type for the unirank pipeline.
//!
//! Fetch failures never appear here: they are contained per year and
//! reported through [`YearOutcome`](crate::pipeline::YearOutcome).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("chart error: {0}")]
  Chart(#[from] unirank_chart::Error),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(e))
  }
}
