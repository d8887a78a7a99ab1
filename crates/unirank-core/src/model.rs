//! Persisted entities.
//!
//! An [`Institution`] owns zero or more [`Ranking`] rows through
//! `Ranking::institution_id`. Both are append-only: rows are created during
//! ingestion and never updated or deleted.

/// A university, keyed for lookup by its exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
  pub id:       i64,
  pub name:     String,
  pub location: String,
}

/// One institution's placement in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
  pub id:             i64,
  pub institution_id: i64,
  pub year:           i32,
  pub rank:           i64,
  pub score:          i64,
}

/// What a single year's ingestion wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
  pub year:                 i32,
  pub institutions_created: usize,
  pub rankings_inserted:    usize,
}
