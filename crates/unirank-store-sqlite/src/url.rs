//! Parsing of database connection strings.
//!
//! Accepts `sqlite:///path` style URLs as commonly written in `config.ini`
//! files as well as bare filesystem paths:
//!
//! | input                         | location               |
//! |-------------------------------|------------------------|
//! | `sqlite://`                   | in-memory              |
//! | `sqlite:///:memory:`          | in-memory              |
//! | `sqlite:///rankings.db`       | `rankings.db`          |
//! | `sqlite:////var/lib/r.db`     | `/var/lib/r.db`        |
//! | `sqlite+pysqlite:///r.db`     | `r.db`                 |
//! | `data/rankings.db`            | `data/rankings.db`     |

use std::path::PathBuf;

use crate::{Error, Result};

/// Where a [`SqliteStore`](crate::SqliteStore) keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
  Memory,
  File(PathBuf),
}

impl StoreLocation {
  pub fn parse(url: &str) -> Result<Self> {
    let url = url.trim();

    let Some((scheme, rest)) = url.split_once("://") else {
      if url.is_empty() || url == ":memory:" {
        return Ok(Self::Memory);
      }
      return Ok(Self::File(PathBuf::from(url)));
    };

    let backend = scheme.split('+').next().unwrap_or_default();
    if !backend.eq_ignore_ascii_case("sqlite") {
      return Err(Error::UnsupportedUrl(url.to_owned()));
    }

    // Query parameters are driver options; none of them apply here.
    let rest = rest.split('?').next().unwrap_or_default();

    // `sqlite://` has no host part, so the path follows a single `/`.
    let path = rest.strip_prefix('/').unwrap_or(rest);
    match path {
      "" | ":memory:" => Ok(Self::Memory),
      path => Ok(Self::File(PathBuf::from(path))),
    }
  }
}
