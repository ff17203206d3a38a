//! `MapRecord` — one row of the `maps` table.
//!
//! Records are read-only snapshots: nothing in this workspace mutates a
//! record after it has been fetched.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The structured SSM payload: a JSON object with arbitrary nested values.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// One map plus its metadata, in the column order of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRecord {
  pub id:          i64,
  /// Account that authored the map.
  pub owner:       i64,
  pub document:    Document,
  pub created_at:  NaiveDateTime,
  pub modified_at: NaiveDateTime,
  /// Free-text map name; never used for output naming.
  pub name:        String,
}

/// Record attribute used to order a fetched record set.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  Id,
  Owner,
  CreatedAt,
  #[default]
  ModifiedAt,
  Name,
}

impl SortKey {
  /// Ascending comparison of two records on this attribute.
  pub fn compare(self, a: &MapRecord, b: &MapRecord) -> Ordering {
    match self {
      SortKey::Id => a.id.cmp(&b.id),
      SortKey::Owner => a.owner.cmp(&b.owner),
      SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
      SortKey::ModifiedAt => a.modified_at.cmp(&b.modified_at),
      SortKey::Name => a.name.cmp(&b.name),
    }
  }
}

/// Sort `records` ascending by `key`. Ties keep their fetched order.
pub fn sort_records(records: &mut [MapRecord], key: SortKey) {
  records.sort_by(|a, b| key.compare(a, b));
}
