//! [`SqliteStore`] — the SQLite implementation of [`MapSource`].

use std::path::PathBuf;

use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use ssm_core::{MapRecord, MapSource};

use crate::{Error, Result, encode::RawMap};

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_database() -> PathBuf { PathBuf::from("ssm.db") }

fn default_table() -> String { "maps".to_owned() }

/// Where the map store lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
  /// Path of the SQLite database file.
  #[serde(default = "default_database")]
  pub database: PathBuf,
  /// Table holding one row per map.
  #[serde(default = "default_table")]
  pub table:    String,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      database: default_database(),
      table:    default_table(),
    }
  }
}

/// A table name is interpolated into SQL, so only plain identifiers pass.
fn validate_table(table: &str) -> Result<()> {
  let mut chars = table.chars();
  let valid = chars
    .next()
    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
  if valid { Ok(()) } else { Err(Error::InvalidTable(table.to_owned())) }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only connection to the map store.
///
/// The connection is consumed by [`MapSource::fetch_all`], which closes it
/// once the rows are in memory.
pub struct SqliteStore {
  conn:  Connection,
  table: String,
}

impl SqliteStore {
  /// Open the store described by `config` read-only.
  ///
  /// A missing or unreadable database file is reported as
  /// [`Error::Connect`]; nothing is created on disk.
  pub fn connect(config: &StoreConfig) -> Result<Self> {
    validate_table(&config.table)?;

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(&config.database, flags).map_err(|source| {
      tracing::error!(database = %config.database.display(), error = %source, "connection failed");
      Error::Connect {
        database: config.database.clone(),
        source,
      }
    })?;

    tracing::debug!(database = %config.database.display(), table = %config.table, "connected");
    Ok(Self {
      conn,
      table: config.table.clone(),
    })
  }

  fn select_all(&self) -> Result<Vec<RawMap>> {
    let mut stmt = self.conn.prepare(&format!("SELECT * FROM {}", self.table))?;
    let rows = stmt
      .query_map([], RawMap::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

// ─── MapSource impl ──────────────────────────────────────────────────────────

impl MapSource for SqliteStore {
  type Error = Error;

  fn fetch_all(self) -> Result<Vec<MapRecord>> {
    let raws = self.select_all()?;
    self.conn.close().map_err(|(_, e)| Error::Database(e))?;

    raws.into_iter().map(RawMap::into_record).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_names_are_plain_identifiers() {
    for ok in ["maps", "_maps", "maps_2019", "Maps"] {
      assert!(validate_table(ok).is_ok(), "{ok}");
    }
    for bad in ["", "2maps", "maps; DROP TABLE maps", "public.maps", "ma ps", "\"maps\""] {
      assert!(matches!(validate_table(bad), Err(Error::InvalidTable(_))), "{bad}");
    }
  }
}
