//! HTTP implementation of [`RankingSource`] for the roundranking JSON
//! endpoint.

use reqwest::{Client, StatusCode};
use unirank_core::{FetchError, record::RankingRecord, source::RankingSource};

/// Placeholder substituted with the requested year.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// The public endpoint serving one overall ranking table per year.
pub const DEFAULT_URL_TEMPLATE: &str = "https://roundranking.com/final/ranking-json22r.php?year={year}&sc=All%20Countries&sa=SO&s=O";

/// Fetches yearly ranking tables over HTTP.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based. No request
/// timeout is configured; a stalled endpoint stalls the caller.
#[derive(Clone)]
pub struct HttpSource {
  client:       Client,
  url_template: String,
}

impl HttpSource {
  pub fn new(url_template: impl Into<String>) -> Result<Self, FetchError> {
    let client = Client::builder()
      .build()
      .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;
    Ok(Self { client, url_template: url_template.into() })
  }

  pub fn url_for(&self, year: i32) -> String {
    self.url_template.replace(YEAR_PLACEHOLDER, &year.to_string())
  }
}

impl RankingSource for HttpSource {
  async fn fetch_year(&self, year: i32) -> Result<Vec<RankingRecord>, FetchError> {
    let url = self.url_for(year);
    tracing::debug!(%url, "fetching rankings");

    let resp = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = resp.status();
    if status != StatusCode::OK {
      return Err(FetchError::Status { year, status: status.as_u16() });
    }

    let body = resp
      .bytes()
      .await
      .map_err(|e| FetchError::Transport(e.to_string()))?;
    Ok(serde_json::from_slice(&body)?)
  }
}
