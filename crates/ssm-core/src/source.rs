//! The `MapSource` trait and the Record Fetcher built on it.
//!
//! A source is consumed by a single fetch: backends close their connection
//! before [`MapSource::fetch_all`] returns, so one run opens exactly one
//! connection and releases it as soon as the rows are in memory.

use std::io::Write;

use crate::{
  Error, Result,
  record::{MapRecord, SortKey, sort_records},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A relational source of map rows.
pub trait MapSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every row of the maps table, unfiltered and in storage order.
  fn fetch_all(self) -> Result<Vec<MapRecord>, Self::Error>;
}

// ─── Fetcher ─────────────────────────────────────────────────────────────────

/// Drain `source`, report how many rows came back, and return them sorted
/// ascending by `key`.
pub fn fetch_sorted<S, W>(
  source: S,
  key:    SortKey,
  out:    &mut W,
) -> Result<Vec<MapRecord>>
where
  S: MapSource,
  W: Write + ?Sized,
{
  let mut records = source
    .fetch_all()
    .map_err(|e| Error::Source(Box::new(e)))?;

  writeln!(out, "number of maps fetched: {}", records.len())
    .map_err(Error::Report)?;
  tracing::info!(count = records.len(), sort = ?key, "fetched maps");

  sort_records(&mut records, key);
  Ok(records)
}
