//! Error type for `unirank-chart`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to draw chart: {0}")]
  Render(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
