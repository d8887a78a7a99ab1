//! The wire shape of one entry in a yearly ranking payload.

use serde::{Deserialize, Serialize};

/// One institution's placement as returned by the ranking endpoint.
///
/// The endpoint uses terse field names (`univ`, `economy`, `i`); they are
/// mapped onto descriptive names here. All four fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
  #[serde(rename = "univ")]
  pub name:     String,
  #[serde(rename = "economy")]
  pub location: String,
  #[serde(rename = "i")]
  pub rank:     i64,
  pub score:    i64,
}

impl RankingRecord {
  pub fn new(
    name: impl Into<String>,
    location: impl Into<String>,
    rank: i64,
    score: i64,
  ) -> Self {
    Self { name: name.into(), location: location.into(), rank, score }
  }
}
