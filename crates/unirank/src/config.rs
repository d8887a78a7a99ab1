//! Configuration loaded from `config.ini`.
//!
//! ```ini
//! [database]
//! url = sqlite:///rankings.db
//!
//! [logging]
//! file = rankings.log
//! level = INFO
//!
//! [web]
//! port = 8080
//!
//! ; optional sections, shown with their defaults
//! [ingest]
//! start_year = 2020
//! end_year = 2023
//!
//! [source]
//! url_template = https://roundranking.com/final/ranking-json22r.php?year={year}&sc=All%20Countries&sa=SO&s=O
//!
//! [report]
//! limit = 20
//! output = rankings.svg
//! ```
//!
//! Any key can be overridden from the environment as
//! `UNIRANK_<SECTION>__<KEY>`, e.g. `UNIRANK_DATABASE__URL`.
//! `[web] port` is required but never interpreted.

use std::{
  ops::RangeInclusive,
  path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use unirank_fetch::{DEFAULT_URL_TEMPLATE, YEAR_PLACEHOLDER};

use crate::logging::parse_level;

/// Prefix of environment variables overriding file values.
pub const ENV_PREFIX: &str = "UNIRANK";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(transparent)]
  Load(#[from] config::ConfigError),
  #[error("unknown log level {0:?}")]
  InvalidLogLevel(String),
  #[error("start_year {start} is after end_year {end}")]
  InvalidYearRange { start: i32, end: i32 },
  #[error("url_template {0:?} has no {{year}} placeholder")]
  MissingYearPlaceholder(String),
  #[error("report limit must be at least 1")]
  ZeroLimit,
}

// ─── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  pub database: DatabaseConfig,
  pub logging:  LoggingConfig,
  pub web:      WebConfig,
  #[serde(default)]
  pub ingest:   IngestConfig,
  #[serde(default)]
  pub source:   SourceConfig,
  #[serde(default)]
  pub report:   ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// Connection string, e.g. `sqlite:///rankings.db`.
  pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  pub file:  PathBuf,
  pub level: String,
}

/// Reserved for an HTTP front-end. Required, but kept as the raw string and
/// otherwise unused.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
  pub port: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
  pub start_year: i32,
  pub end_year:   i32,
}

impl Default for IngestConfig {
  fn default() -> Self { Self { start_year: 2020, end_year: 2023 } }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
  pub url_template: String,
}

impl Default for SourceConfig {
  fn default() -> Self { Self { url_template: DEFAULT_URL_TEMPLATE.to_owned() } }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  pub limit:  usize,
  pub output: PathBuf,
}

impl Default for ReportConfig {
  fn default() -> Self { Self { limit: 20, output: PathBuf::from("rankings.svg") } }
}

// ─── Loading ──────────────────────────────────────────────────────────────────

impl AppConfig {
  /// Read and validate the INI file at `path`, applying `UNIRANK_*`
  /// environment overrides.
  ///
  /// A missing file, section or required key is an error; nothing else is
  /// touched before this succeeds.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::load_with_env_prefix(path, ENV_PREFIX)
  }

  fn load_with_env_prefix(path: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
    let settings = config::Config::builder()
      .add_source(
        config::File::from(path)
          .format(config::FileFormat::Ini)
          .required(true),
      )
      .add_source(
        config::Environment::with_prefix(env_prefix)
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?;

    let cfg: AppConfig = settings.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    self.logging.level_filter()?;

    let IngestConfig { start_year, end_year } = self.ingest;
    if start_year > end_year {
      return Err(ConfigError::InvalidYearRange { start: start_year, end: end_year });
    }
    if !self.source.url_template.contains(YEAR_PLACEHOLDER) {
      return Err(ConfigError::MissingYearPlaceholder(self.source.url_template.clone()));
    }
    if self.report.limit == 0 {
      return Err(ConfigError::ZeroLimit);
    }
    Ok(())
  }
}

impl LoggingConfig {
  pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
    parse_level(&self.level).ok_or_else(|| ConfigError::InvalidLogLevel(self.level.clone()))
  }
}

impl IngestConfig {
  /// The years to fetch, ascending and inclusive.
  pub fn years(&self) -> RangeInclusive<i32> { self.start_year..=self.end_year }
}
