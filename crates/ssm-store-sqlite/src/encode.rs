//! Decoding helpers from raw SQLite column values to `ssm-core` types.
//!
//! Documents are stored as JSON text (or UTF-8 JSON in a BLOB). Timestamps
//! are accepted as SQL-style or ISO 8601 text, RFC 3339 with an offset (kept
//! as the wall-clock time written), or integer Unix seconds.

use chrono::{DateTime, NaiveDateTime};
use rusqlite::types::Value;
use ssm_core::{Document, MapRecord};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

pub fn decode_timestamp(value: &Value) -> Result<NaiveDateTime> {
  match value {
    Value::Text(s) => decode_timestamp_str(s),
    Value::Integer(secs) => DateTime::from_timestamp(*secs, 0)
      .map(|dt| dt.naive_utc())
      .ok_or_else(|| Error::DateParse(format!("timestamp out of range: {secs}"))),
    other => Err(Error::DateParse(format!("unsupported timestamp value: {other:?}"))),
  }
}

pub fn decode_timestamp_str(s: &str) -> Result<NaiveDateTime> {
  let s = s.trim();
  for format in NAIVE_FORMATS {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
      return Ok(dt);
    }
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.naive_local())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn decode_document(id: i64, value: Value) -> Result<Document> {
  let invalid_json = |e: serde_json::Error| Error::MalformedRecord {
    id,
    reason: format!("document is not valid JSON: {e}"),
  };
  let parsed: serde_json::Value = match value {
    Value::Text(s) => serde_json::from_str(&s).map_err(invalid_json)?,
    Value::Blob(bytes) => serde_json::from_slice(&bytes).map_err(invalid_json)?,
    Value::Null => {
      return Err(Error::MalformedRecord {
        id,
        reason: "document is NULL".into(),
      });
    }
    other => {
      return Err(Error::MalformedRecord {
        id,
        reason: format!("document is not JSON text: {other:?}"),
      });
    }
  };

  match parsed {
    serde_json::Value::Object(map) => Ok(map),
    other => Err(Error::MalformedRecord {
      id,
      reason: format!("document is not a JSON object: {other}"),
    }),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column values read positionally from one maps row:
/// id, owner, document, created_at, modified_at, name.
pub struct RawMap {
  pub id:          i64,
  pub owner:       i64,
  pub document:    Value,
  pub created_at:  Value,
  pub modified_at: Value,
  pub name:        Option<String>,
}

impl RawMap {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      owner:       row.get(1)?,
      document:    row.get(2)?,
      created_at:  row.get(3)?,
      modified_at: row.get(4)?,
      name:        row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<MapRecord> {
    let id = self.id;
    let with_id = |e: Error| match e {
      Error::DateParse(msg) => Error::DateParse(format!("record {id}: {msg}")),
      other => other,
    };

    Ok(MapRecord {
      id,
      owner:       self.owner,
      document:    decode_document(id, self.document)?,
      created_at:  decode_timestamp(&self.created_at).map_err(with_id)?,
      modified_at: decode_timestamp(&self.modified_at).map_err(with_id)?,
      name:        self.name.unwrap_or_default(),
    })
  }
}
