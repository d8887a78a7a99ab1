//! [`SqliteStore`], the SQLite implementation of [`RankingStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use unirank_core::{
  model::{IngestSummary, Institution, Ranking},
  record::RankingRecord,
  store::RankingStore,
};

use crate::{Error, Result, StoreLocation, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ranking store backed by a single SQLite database.
///
/// Cloning is cheap; the inner connection is reference-counted. The
/// connection closes once the last clone is dropped, or explicitly through
/// [`SqliteStore::close`].
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the store named by a connection string (see [`StoreLocation`]).
  pub async fn connect(url: &str) -> Result<Self> {
    match StoreLocation::parse(url)? {
      StoreLocation::Memory => Self::open_in_memory().await,
      StoreLocation::File(path) => Self::open(path).await,
    }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Flush and close the underlying connection.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn institution_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Institution> {
  Ok(Institution {
    id:       row.get(0)?,
    name:     row.get(1)?,
    location: row.get(2)?,
  })
}

fn ranking_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ranking> {
  Ok(Ranking {
    id:             row.get(0)?,
    institution_id: row.get(1)?,
    year:           row.get(2)?,
    rank:           row.get(3)?,
    score:          row.get(4)?,
  })
}

// ─── RankingStore impl ───────────────────────────────────────────────────────

impl RankingStore for SqliteStore {
  type Error = Error;

  async fn ingest_year(
    &self,
    year: i32,
    records: Vec<RankingRecord>,
  ) -> Result<IngestSummary> {
    let summary = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut summary = IngestSummary { year, ..IngestSummary::default() };

        {
          let mut find = tx.prepare(
            "SELECT id FROM institutions WHERE name = ?1 ORDER BY id LIMIT 1",
          )?;
          let mut create = tx
            .prepare("INSERT INTO institutions (name, location) VALUES (?1, ?2)")?;
          let mut append = tx.prepare(
            "INSERT INTO rankings (institution_id, year, rank, score)
             VALUES (?1, ?2, ?3, ?4)",
          )?;

          for record in &records {
            let existing: Option<i64> = find
              .query_row(rusqlite::params![record.name], |r| r.get(0))
              .optional()?;

            let institution_id = match existing {
              Some(id) => id,
              None => {
                create.execute(rusqlite::params![record.name, record.location])?;
                summary.institutions_created += 1;
                tx.last_insert_rowid()
              }
            };

            append.execute(rusqlite::params![
              institution_id,
              year,
              record.rank,
              record.score,
            ])?;
            summary.rankings_inserted += 1;
          }
        }

        tx.commit()?;
        Ok(summary)
      })
      .await?;

    tracing::debug!(
      year,
      institutions_created = summary.institutions_created,
      rankings_inserted = summary.rankings_inserted,
      "committed year"
    );
    Ok(summary)
  }

  async fn find_institution<'a>(&'a self, name: &'a str) -> Result<Option<Institution>> {
    let name = name.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, name, location FROM institutions
             WHERE name = ?1 ORDER BY id LIMIT 1",
            rusqlite::params![name],
            institution_from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(found)
  }

  async fn list_institutions(&self) -> Result<Vec<Institution>> {
    let all = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, location FROM institutions ORDER BY id")?;
        let rows = stmt
          .query_map([], institution_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(all)
  }

  async fn rankings_for(&self, institution_id: i64) -> Result<Vec<Ranking>> {
    let history = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, institution_id, year, rank, score FROM rankings
           WHERE institution_id = ?1
           ORDER BY year, id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![institution_id], ranking_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(history)
  }

  async fn top_institutions(&self, limit: usize) -> Result<Vec<Institution>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    // `r.rank` is a bare column under GROUP BY: SQLite takes it from an
    // arbitrary row of the group.
    let top = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT i.id, i.name, i.location
           FROM institutions i
           JOIN rankings r ON r.institution_id = i.id
           GROUP BY i.id
           ORDER BY r.rank
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], institution_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(top)
  }
}
