//! Document Writer — persists one map document as pretty-printed JSON.

use std::{
  fs::{self, File},
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{Error, Result, naming::output_file_path, record::Document};

const INDENT: &[u8] = b"    ";

/// Write `doc` to `{dir}/ssm-{location}-{id}.json`, creating `dir` (and any
/// missing parents) first. An existing file at that path is overwritten.
///
/// Keys are emitted in sorted order with four-space indentation, so the
/// output for a given document is byte-for-byte stable across runs.
pub fn write_map_to_file(
  dir:      &Path,
  location: &str,
  id:       i64,
  doc:      &Document,
) -> Result<PathBuf> {
  if !dir.exists() {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
      path: dir.to_path_buf(),
      source,
    })?;
  }

  let path = output_file_path(dir, location, id);
  let file = File::create(&path).map_err(|source| Error::Io {
    path: path.clone(),
    source,
  })?;

  let mut writer = BufWriter::new(file);
  write_document(&mut writer, doc)?;
  writer.flush().map_err(|source| Error::Io {
    path: path.clone(),
    source,
  })?;

  Ok(path)
}

/// Serialise `doc` with sorted keys and four-space indentation, without a
/// trailing newline.
pub fn write_document<W: Write>(writer: W, doc: &Document) -> Result<()> {
  // `serde_json::Map` is backed by a `BTreeMap`, so keys at every depth
  // serialise in lexicographic order.
  let formatter = PrettyFormatter::with_indent(INDENT);
  let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
  doc.serialize(&mut ser)?;
  Ok(())
}
