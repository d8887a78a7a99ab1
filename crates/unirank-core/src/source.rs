//! The `RankingSource` trait: where yearly payloads come from.

use std::future::Future;

use crate::{error::FetchError, record::RankingRecord};

/// A provider of one ranking payload per year.
///
/// Implemented over HTTP by `unirank-fetch`. One call is one attempt; retry
/// policy, if any, belongs to the caller.
pub trait RankingSource: Send + Sync {
  fn fetch_year(
    &self,
    year: i32,
  ) -> impl Future<Output = Result<Vec<RankingRecord>, FetchError>> + Send + '_;
}
