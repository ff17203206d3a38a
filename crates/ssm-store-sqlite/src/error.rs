//! Error type for `ssm-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The store could not be opened.
  #[error("cannot connect to ssm database {database:?}: {source}")]
  Connect {
    database: PathBuf,
    #[source]
    source:   rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A row whose columns do not decode into a map record.
  #[error("malformed record {id}: {reason}")]
  MalformedRecord { id: i64, reason: String },

  #[error("invalid table name: {0:?}")]
  InvalidTable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
