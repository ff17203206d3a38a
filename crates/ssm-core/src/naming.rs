//! Deterministic output file names.

use std::{
  ffi::{OsStr, OsString},
  path::{Path, PathBuf},
};

/// Build the export path for one map: `{dir}/ssm-{location}-{id}.json`.
///
/// Trailing `/` characters are stripped from `dir`. The location is trimmed,
/// loses every ASCII punctuation character, and has its spaces replaced by
/// underscores. No I/O is performed and the directory is not validated;
/// non-UTF-8 directory names are kept byte-for-byte.
pub fn output_file_path(dir: &Path, location: &str, id: i64) -> PathBuf {
  let mut path = OsString::from(trim_trailing_slashes(dir.as_os_str()));
  path.push("/");
  path.push(output_file_name(location, id));
  PathBuf::from(path)
}

fn trim_trailing_slashes(dir: &OsStr) -> &OsStr {
  let mut bytes = dir.as_encoded_bytes();
  while let [rest @ .., b'/'] = bytes {
    bytes = rest;
  }
  // SAFETY: `bytes` is a prefix of `dir`'s encoded bytes ending right before
  // an ASCII `/`, which is a valid split point for the platform encoding.
  unsafe { OsStr::from_encoded_bytes_unchecked(bytes) }
}

/// The file-name part of [`output_file_path`].
pub fn output_file_name(location: &str, id: i64) -> String {
  format!("ssm-{}-{id}.json", clean_location(location))
}

fn clean_location(location: &str) -> String {
  location
    .trim()
    .chars()
    .filter(|c| !c.is_ascii_punctuation())
    .map(|c| if c == ' ' { '_' } else { c })
    .collect()
}
