//! SVG rendering of rank-over-time series.

use std::{fmt::Display, ops::RangeInclusive, path::Path};

use plotters::prelude::*;

use crate::{Error, InstitutionSeries, Result};

/// Titles, axis bounds and canvas size for one chart.
#[derive(Debug, Clone)]
pub struct ChartSpec {
  pub title:  String,
  pub x_desc: String,
  pub y_desc: String,
  /// Inclusive span of the x-axis, normally the ingested year range.
  pub years:  RangeInclusive<i32>,
  pub size:   (u32, u32),
}

/// Title of the rank-over-time chart, whatever the configured limit.
pub const TOP_RANKINGS_TITLE: &str = "Top 20 Universities Rankings";

impl ChartSpec {
  /// The standard rank-over-time chart titled [`TOP_RANKINGS_TITLE`].
  pub fn top_rankings(years: RangeInclusive<i32>) -> Self {
    Self {
      title: TOP_RANKINGS_TITLE.to_owned(),
      x_desc: "Year".to_owned(),
      y_desc: "Rank".to_owned(),
      years,
      size: (1024, 768),
    }
  }
}

fn draw_err(e: impl Display) -> Error { Error::Render(e.to_string()) }

/// Draw `series` into an SVG file at `path`, one labelled line each.
///
/// The y-axis is inverted so rank 1 sits at the top. An empty `series` still
/// produces a chart with axes and title.
pub fn render_svg(path: &Path, spec: &ChartSpec, series: &[InstitutionSeries]) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }

  let first_year = *spec.years.start();
  let last_year = (*spec.years.end()).max(first_year + 1);

  // Ranks are plotted negated so that the best rank is the highest point.
  let deepest = series
    .iter()
    .flat_map(InstitutionSeries::ranks)
    .max()
    .unwrap_or(1)
    .clamp(1, i64::from(i32::MAX - 1));
  let deepest = i32::try_from(deepest).unwrap_or(i32::MAX - 1);

  let root = SVGBackend::new(path, spec.size).into_drawing_area();
  root.fill(&WHITE).map_err(draw_err)?;

  let mut chart = ChartBuilder::on(&root)
    .caption(&spec.title, ("sans-serif", 24))
    .margin(16)
    .x_label_area_size(40)
    .y_label_area_size(50)
    .build_cartesian_2d(first_year..last_year, -(deepest + 1)..0)
    .map_err(draw_err)?;

  let year_count = usize::try_from(last_year - first_year + 1).unwrap_or(1);
  chart
    .configure_mesh()
    .x_desc(spec.x_desc.as_str())
    .y_desc(spec.y_desc.as_str())
    .x_labels(year_count)
    .x_label_formatter(&|year| year.to_string())
    .y_label_formatter(&|rank| (-rank).to_string())
    .draw()
    .map_err(draw_err)?;

  for (idx, line) in series.iter().enumerate() {
    let color = Palette99::pick(idx).to_rgba();
    let points = line.points.iter().map(|&(year, rank)| {
      (year, -i32::try_from(rank).unwrap_or(deepest))
    });

    chart
      .draw_series(LineSeries::new(points, color.stroke_width(2)).point_size(3))
      .map_err(draw_err)?
      .label(line.label.as_str())
      .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
  }

  if !series.is_empty() {
    chart
      .configure_series_labels()
      .position(SeriesLabelPosition::LowerRight)
      .label_font(("sans-serif", 10))
      .background_style(WHITE.mix(0.8))
      .border_style(BLACK)
      .draw()
      .map_err(draw_err)?;
  }

  root.present().map_err(draw_err)?;
  tracing::debug!(path = %path.display(), lines = series.len(), "rendered chart");
  Ok(())
}
