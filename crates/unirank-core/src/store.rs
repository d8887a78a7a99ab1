//! The `RankingStore` trait.
//!
//! Implemented by storage backends (e.g. `unirank-store-sqlite`). The
//! ingestion pipeline and the chart reporter depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  model::{IngestSummary, Institution, Ranking},
  record::RankingRecord,
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a ranking store backend.
///
/// Writes are append-only. Institutions are deduplicated by exact name at
/// ingestion time; rankings are never deduplicated, so ingesting the same
/// year twice yields two rows per (institution, year).
pub trait RankingStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Store one year's records inside a single transaction.
  ///
  /// Records are processed in order. For each one the institution is looked
  /// up by name and created with the record's location if absent, then a
  /// ranking row is appended. Nothing from the year is visible if any write
  /// fails.
  fn ingest_year(
    &self,
    year: i32,
    records: Vec<RankingRecord>,
  ) -> impl Future<Output = Result<IngestSummary, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────
  //
  // `find_institution` and `list_institutions` are not used by the pipeline
  // itself; they let callers inspect what ingestion wrote.

  /// Look up an institution by exact name. Returns `None` if not found.
  fn find_institution<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Institution>, Self::Error>> + Send + 'a;

  /// All institutions in creation order.
  fn list_institutions(
    &self,
  ) -> impl Future<Output = Result<Vec<Institution>, Self::Error>> + Send + '_;

  /// Every ranking owned by `institution_id`, ascending by year.
  fn rankings_for(
    &self,
    institution_id: i64,
  ) -> impl Future<Output = Result<Vec<Ranking>, Self::Error>> + Send + '_;

  /// Institutions that have at least one ranking, grouped per institution
  /// and ordered by rank ascending, at most `limit` of them.
  ///
  /// For an institution ranked in several years, which of its rankings
  /// supplies the ordering rank is left to the backend's grouping semantics.
  fn top_institutions(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Institution>, Self::Error>> + Send + '_;
}
