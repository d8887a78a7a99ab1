//! Turning stored rankings into plottable series.

use unirank_core::store::RankingStore;

/// One chart line: an institution's rank per year, ascending by year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionSeries {
  pub label:  String,
  pub points: Vec<(i32, i64)>,
}

impl InstitutionSeries {
  pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
    self.points.iter().map(|&(year, _)| year)
  }

  pub fn ranks(&self) -> impl Iterator<Item = i64> + '_ {
    self.points.iter().map(|&(_, rank)| rank)
  }
}

/// Load the `limit` top institutions and each one's full ranking history.
///
/// The order of the returned series is the order of
/// [`RankingStore::top_institutions`].
pub async fn collect_series<S: RankingStore>(
  store: &S,
  limit: usize,
) -> Result<Vec<InstitutionSeries>, S::Error> {
  let top = store.top_institutions(limit).await?;
  let mut series = Vec::with_capacity(top.len());

  for institution in top {
    let history = store.rankings_for(institution.id).await?;
    series.push(InstitutionSeries {
      label:  institution.name,
      points: history.into_iter().map(|r| (r.year, r.rank)).collect(),
    });
  }

  tracing::debug!(lines = series.len(), "collected chart series");
  Ok(series)
}
