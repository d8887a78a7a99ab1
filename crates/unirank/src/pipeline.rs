//! Fetch → ingest → report.
//!
//! Years run strictly in ascending order and one at a time. A year whose
//! fetch fails is logged and skipped; a store or chart failure ends the run.

use std::{ops::RangeInclusive, path::Path};

use unirank_chart::{ChartSpec, collect_series, render_svg};
use unirank_core::{
  FetchError, model::IngestSummary, source::RankingSource, store::RankingStore,
};

use crate::Error;

/// What happened to one year of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
  Stored(IngestSummary),
  Skipped { year: i32, error: FetchError },
}

impl YearOutcome {
  pub fn year(&self) -> i32 {
    match self {
      YearOutcome::Stored(summary) => summary.year,
      YearOutcome::Skipped { year, .. } => *year,
    }
  }

  pub fn is_stored(&self) -> bool { matches!(self, YearOutcome::Stored(_)) }
}

/// Fetch and store every year in `years`.
///
/// Each successfully fetched year is committed before the next one is
/// requested. Fetch errors are logged at `ERROR` and recorded as
/// [`YearOutcome::Skipped`]; store errors abort immediately.
pub async fn ingest_years<S, F>(
  store: &S,
  source: &F,
  years: RangeInclusive<i32>,
) -> Result<Vec<YearOutcome>, Error>
where
  S: RankingStore,
  F: RankingSource,
{
  let mut outcomes = Vec::new();

  for year in years {
    match source.fetch_year(year).await {
      Ok(records) => {
        let summary = store.ingest_year(year, records).await.map_err(Error::store)?;
        tracing::info!("Data for year {year} has been stored in the database.");
        outcomes.push(YearOutcome::Stored(summary));
      }
      Err(error) => {
        match &error {
          FetchError::Status { status, .. } => {
            tracing::error!("Failed to fetch data for year {year}. Status code: {status}");
          }
          other => {
            tracing::error!("An error occurred while processing data for year {year}: {other}");
          }
        }
        outcomes.push(YearOutcome::Skipped { year, error });
      }
    }
  }

  Ok(outcomes)
}

/// Chart the `limit` top institutions into an SVG at `output`.
///
/// Returns the number of lines drawn; zero when nothing has been stored.
pub async fn report<S: RankingStore>(
  store: &S,
  limit: usize,
  spec: &ChartSpec,
  output: &Path,
) -> Result<usize, Error> {
  let series = collect_series(store, limit).await.map_err(Error::store)?;
  render_svg(output, spec, &series)?;
  tracing::info!("Chart with {} lines written to {}", series.len(), output.display());
  Ok(series.len())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tracing_subscriber::filter::LevelFilter;
  use unirank_core::record::RankingRecord;
  use unirank_store_sqlite::SqliteStore;

  use super::*;
  use crate::logging::{subscriber, test_support::Captured};

  /// A source serving canned results per year.
  #[derive(Default)]
  struct FakeSource {
    years: HashMap<i32, Result<Vec<RankingRecord>, FetchError>>,
  }

  impl FakeSource {
    fn with(mut self, year: i32, result: Result<Vec<RankingRecord>, FetchError>) -> Self {
      self.years.insert(year, result);
      self
    }
  }

  impl RankingSource for FakeSource {
    async fn fetch_year(&self, year: i32) -> Result<Vec<RankingRecord>, FetchError> {
      self
        .years
        .get(&year)
        .cloned()
        .unwrap_or(Err(FetchError::Status { year, status: 404 }))
    }
  }

  fn payload(year: i32) -> Vec<RankingRecord> {
    vec![
      RankingRecord::new("Acme U", "Testland", 1, 95),
      RankingRecord::new(format!("Class of {year}"), "Otherland", 2, 90),
    ]
  }

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory().await.expect("in-memory store")
  }

  #[tokio::test]
  async fn one_failed_year_does_not_stop_the_others() {
    let store = store().await;
    let source = FakeSource::default()
      .with(2020, Ok(payload(2020)))
      .with(2021, Err(FetchError::Status { year: 2021, status: 500 }))
      .with(2022, Ok(payload(2022)))
      .with(2023, Ok(payload(2023)));

    let sink = Captured::default();
    let writer = sink.clone();
    let _guard = tracing::subscriber::set_default(subscriber(LevelFilter::INFO, move || {
      writer.clone()
    }));

    let outcomes = ingest_years(&store, &source, 2020..=2023).await.unwrap();

    let stored: Vec<i32> = outcomes
      .iter()
      .filter(|o| o.is_stored())
      .map(YearOutcome::year)
      .collect();
    assert_eq!(stored, vec![2020, 2022, 2023]);

    let errors: Vec<String> = sink
      .lines()
      .into_iter()
      .filter(|l| l.contains(" - ERROR - "))
      .collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("2021"));
    assert!(errors[0].contains("500"));

    let acme = store.find_institution("Acme U").await.unwrap().unwrap();
    let years: Vec<i32> = store
      .rankings_for(acme.id)
      .await
      .unwrap()
      .into_iter()
      .map(|r| r.year)
      .collect();
    assert_eq!(years, vec![2020, 2022, 2023]);
  }

  #[tokio::test]
  async fn transport_and_decode_errors_are_logged_and_skipped() {
    let store = store().await;
    let source = FakeSource::default()
      .with(2020, Err(FetchError::Transport("connection refused".into())))
      .with(2021, Err(FetchError::Decode("expected value at line 1".into())))
      .with(2022, Ok(payload(2022)));

    let sink = Captured::default();
    let writer = sink.clone();
    let _guard = tracing::subscriber::set_default(subscriber(LevelFilter::INFO, move || {
      writer.clone()
    }));

    let outcomes = ingest_years(&store, &source, 2020..=2022).await.unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(!outcomes[0].is_stored());
    assert!(!outcomes[1].is_stored());
    assert!(outcomes[2].is_stored());

    let lines = sink.lines();
    assert!(lines.iter().any(|l| l.contains("year 2020: request failed: connection refused")));
    assert!(lines.iter().any(|l| l.contains("year 2021: invalid ranking payload")));
    assert!(lines
      .iter()
      .any(|l| l.ends_with("INFO - Data for year 2022 has been stored in the database.")));
  }

  #[tokio::test]
  async fn every_fetched_name_is_stored() {
    let store = store().await;
    let source = FakeSource::default()
      .with(2020, Ok(payload(2020)))
      .with(2021, Ok(payload(2021)));

    ingest_years(&store, &source, 2020..=2021).await.unwrap();

    let stored: Vec<String> = store
      .list_institutions()
      .await
      .unwrap()
      .into_iter()
      .map(|i| i.name)
      .collect();
    for year in [2020, 2021] {
      for record in payload(year) {
        assert!(stored.contains(&record.name), "{} missing", record.name);
      }
    }
    // "Acme U" appears in both years but is stored once.
    assert_eq!(stored.iter().filter(|n| *n == "Acme U").count(), 1);
  }

  #[tokio::test]
  async fn rerunning_duplicates_rankings_but_reuses_institutions() {
    let store = store().await;
    let source = FakeSource::default().with(2020, Ok(payload(2020)));

    ingest_years(&store, &source, 2020..=2020).await.unwrap();
    ingest_years(&store, &source, 2020..=2020).await.unwrap();

    let institutions = store.list_institutions().await.unwrap();
    assert_eq!(institutions.len(), 2);
    for institution in institutions {
      let rankings = store.rankings_for(institution.id).await.unwrap();
      assert_eq!(rankings.len(), 2);
      assert!(rankings.iter().all(|r| r.year == 2020));
    }
  }

  #[tokio::test]
  async fn report_charts_one_line_per_top_institution() {
    let store = store().await;
    let source = FakeSource::default()
      .with(2020, Ok(payload(2020)))
      .with(2021, Ok(payload(2021)));
    ingest_years(&store, &source, 2020..=2021).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chart.svg");
    let spec = ChartSpec::top_rankings(2020..=2021);

    let lines = report(&store, 20, &spec, &output).await.unwrap();
    assert_eq!(lines, 3);

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("Acme U"));
    assert!(svg.contains("Class of 2020"));
    assert!(svg.contains("Class of 2021"));
  }

  #[tokio::test]
  async fn smaller_limit_keeps_the_chart_title() {
    let store = store().await;
    let source = FakeSource::default().with(2020, Ok(payload(2020)));
    ingest_years(&store, &source, 2020..=2020).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chart.svg");
    let spec = ChartSpec::top_rankings(2020..=2020);

    let lines = report(&store, 1, &spec, &output).await.unwrap();
    assert_eq!(lines, 1);

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("Top 20 Universities Rankings"));
    assert!(!svg.contains("Top 1 Universities Rankings"));
  }

  #[tokio::test]
  async fn all_years_failing_yields_an_empty_chart() {
    let store = store().await;
    let source = FakeSource::default();

    let outcomes = ingest_years(&store, &source, 2020..=2023).await.unwrap();
    assert!(outcomes.iter().all(|o| !o.is_stored()));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chart.svg");
    let spec = ChartSpec::top_rankings(2020..=2023);

    let lines = report(&store, 20, &spec, &output).await.unwrap();
    assert_eq!(lines, 0);
    assert!(output.exists());
  }
}
