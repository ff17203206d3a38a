//! Inclusion rule for exported maps.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use crate::record::MapRecord;

fn default_location_key() -> String { "schoolLocation".to_owned() }

fn default_excluded_owners() -> BTreeSet<i64> { BTreeSet::from([2, 20]) }

/// Decides which records are exported.
///
/// A record qualifies when its document carries `location_key` and its owner
/// is not one of `excluded_owners`. Only maps produced by the study's
/// customised wizard carry the location key; the excluded owners are staff
/// accounts whose maps are not study data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportFilter {
  #[serde(default = "default_location_key")]
  pub location_key:    String,
  #[serde(default = "default_excluded_owners")]
  pub excluded_owners: BTreeSet<i64>,
}

impl Default for ExportFilter {
  fn default() -> Self {
    Self {
      location_key:    default_location_key(),
      excluded_owners: default_excluded_owners(),
    }
  }
}

impl ExportFilter {
  /// The record's location value if it qualifies for export, else `None`.
  pub fn location<'r>(&self, record: &'r MapRecord) -> Option<&'r Value> {
    if self.excluded_owners.contains(&record.owner) {
      return None;
    }
    record.document.get(&self.location_key)
  }
}
