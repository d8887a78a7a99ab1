//! Log-file output.
//!
//! Every event becomes one line of the form
//! `2023-05-04 12:00:01,250 - ERROR - message`, appended to the configured
//! log file.

use std::fmt;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
  filter::LevelFilter,
  fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter, format::Writer},
  registry::LookupSpan,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Parse a severity name as written in `config.ini`.
///
/// Accepts the conventional names case-insensitively, including `WARNING`,
/// `CRITICAL` (treated as `ERROR`) and `NOTSET` (everything).
pub fn parse_level(name: &str) -> Option<LevelFilter> {
  match name.trim().to_ascii_uppercase().as_str() {
    "CRITICAL" | "ERROR" => Some(LevelFilter::ERROR),
    "WARNING" | "WARN" => Some(LevelFilter::WARN),
    "INFO" => Some(LevelFilter::INFO),
    "DEBUG" => Some(LevelFilter::DEBUG),
    "NOTSET" | "TRACE" => Some(LevelFilter::TRACE),
    "OFF" => Some(LevelFilter::OFF),
    _ => None,
  }
}

/// `<timestamp> - <LEVEL> - <message>` event formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
  S: Subscriber + for<'a> LookupSpan<'a>,
  N: for<'a> FormatFields<'a> + 'static,
{
  fn format_event(
    &self,
    ctx: &FmtContext<'_, S, N>,
    mut writer: Writer<'_>,
    event: &Event<'_>,
  ) -> fmt::Result {
    let level = match *event.metadata().level() {
      Level::ERROR => "ERROR",
      Level::WARN => "WARNING",
      Level::INFO => "INFO",
      Level::DEBUG => "DEBUG",
      Level::TRACE => "TRACE",
    };
    write!(writer, "{} - {level} - ", Local::now().format(TIMESTAMP_FORMAT))?;
    ctx.field_format().format_fields(writer.by_ref(), event)?;
    writeln!(writer)
  }
}

/// Build the subscriber used by the binary, writing through `make_writer`.
pub fn subscriber<W>(level: LevelFilter, make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
  W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(make_writer)
    .event_format(LineFormat)
    .finish()
}


#[cfg(test)]
mod tests {
  use super::{test_support::Captured, *};

  #[test]
  fn parses_conventional_level_names() {
    assert_eq!(parse_level("INFO"), Some(LevelFilter::INFO));
    assert_eq!(parse_level("warning"), Some(LevelFilter::WARN));
    assert_eq!(parse_level("CRITICAL"), Some(LevelFilter::ERROR));
    assert_eq!(parse_level(" debug "), Some(LevelFilter::DEBUG));
    assert_eq!(parse_level("NOTSET"), Some(LevelFilter::TRACE));
    assert_eq!(parse_level("LOUD"), None);
  }

  #[test]
  fn lines_have_timestamp_level_and_message() {
    let sink = Captured::default();
    let writer = sink.clone();
    let sub = subscriber(LevelFilter::INFO, move || writer.clone());

    tracing::subscriber::with_default(sub, || {
      tracing::info!("Data for year 2020 has been stored in the database.");
      tracing::warn!("careful");
      tracing::debug!("filtered out");
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);

    let parts: Vec<_> = lines[0].splitn(3, " - ").collect();
    assert_eq!(parts.len(), 3);
    assert!(
      chrono::NaiveDateTime::parse_from_str(parts[0], TIMESTAMP_FORMAT).is_ok(),
      "bad timestamp {:?}",
      parts[0]
    );
    assert_eq!(parts[1], "INFO");
    assert_eq!(parts[2], "Data for year 2020 has been stored in the database.");

    assert!(lines[1].ends_with(" - WARNING - careful"));
  }
}
