//! Rank-over-time reporting for unirank.
//!
//! [`collect_series`] reads the top institutions and their histories from any
//! [`RankingStore`](unirank_core::store::RankingStore); [`render_svg`] draws
//! them as one line per institution with rank 1 at the top of the y-axis.

mod render;
mod series;

pub mod error;

pub use error::{Error, Result};
pub use render::{ChartSpec, TOP_RANKINGS_TITLE, render_svg};
pub use series::{InstitutionSeries, collect_series};
