//! unirank binary.
//!
//! Reads `config.ini` (or the path given with `--config`), fetches every
//! configured year from the ranking endpoint into the SQLite store, then
//! charts the top institutions' rank over time and opens the chart in the
//! system viewer. The viewer runs on its own; unirank exits without waiting
//! for it to close.
//!
//! ```
//! cargo run -p unirank -- --config config.ini
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use clap::Parser;
use unirank::{
  AppConfig,
  config::LoggingConfig,
  logging,
  pipeline::{self, YearOutcome},
};
use unirank_chart::ChartSpec;
use unirank_fetch::HttpSource;
use unirank_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Fetch yearly university rankings, store them, and chart the leaders")]
struct Cli {
  /// Path to the INI configuration file.
  #[arg(short, long, default_value = "config.ini")]
  config: PathBuf,

  /// Where to write the chart; overrides `[report] output`.
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Write the chart without opening it in a viewer.
  ///
  /// Without this flag the chart is handed to the system viewer and the run
  /// finishes at once; it does not wait for the viewer to be closed.
  #[arg(long)]
  no_show: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let cfg = AppConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  init_logging(&cfg.logging)?;
  tracing::debug!(web_port = %cfg.web.port, "configuration loaded");

  let store = SqliteStore::connect(&cfg.database.url)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.database.url))?;

  // Close the store whether or not the run succeeded.
  let result = run(&cli, &cfg, &store).await;
  let closed = store.close().await.context("failed to close store");
  result?;
  closed?;

  println!("Data processing completed.");
  Ok(())
}

async fn run(cli: &Cli, cfg: &AppConfig, store: &SqliteStore) -> anyhow::Result<()> {
  let source = HttpSource::new(cfg.source.url_template.clone())?;

  let outcomes = pipeline::ingest_years(store, &source, cfg.ingest.years())
    .await
    .context("ingestion failed")?;
  let skipped = outcomes.iter().filter(|o| !o.is_stored()).count();
  if skipped > 0 {
    let years: Vec<_> = outcomes
      .iter()
      .filter(|o| !o.is_stored())
      .map(YearOutcome::year)
      .collect();
    tracing::warn!("{skipped} year(s) skipped: {years:?}");
  }

  println!("Plot is loading...");

  let output = cli.output.clone().unwrap_or_else(|| cfg.report.output.clone());
  let spec = ChartSpec::top_rankings(cfg.ingest.years());
  pipeline::report(store, cfg.report.limit, &spec, &output)
    .await
    .context("reporting failed")?;

  if cli.no_show {
    println!("Chart written to {}", output.display());
  } else {
    println!("The plot is displayed in a separate window");
    if open::that(&output).is_err() {
      eprintln!("Could not open a viewer automatically. Chart written to {}", output.display());
    }
  }

  Ok(())
}

/// Append formatted log lines to the configured file.
fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
  let level = cfg.level_filter()?;
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&cfg.file)
    .with_context(|| format!("failed to open log file {:?}", cfg.file))?;

  tracing::subscriber::set_global_default(logging::subscriber(level, Mutex::new(file)))
    .context("failed to install log subscriber")?;
  Ok(())
}
