//! Python-literal rendering of JSON values.
//!
//! The console report has always shown a document's "size" as the length of
//! its Python `str()` rendering rather than a serialised byte count, and the
//! location column uses `str()` of the location value. Both are reproduced
//! here so the report stays comparable with earlier runs.
//!
//! Rendering follows Python 3 `repr`: single-quoted strings (double-quoted
//! when the text holds `'` but no `"`), `True`/`False`/`None`, `': '` and
//! `', '` separators, the shortest round-trip float form, and `\xNN` /
//! `\uNNNN` / `\UNNNNNNNN` escapes for characters Python does not print.

use serde_json::{Number, Value};

use crate::record::Document;

/// Character count of the Python rendering of `doc`.
///
/// This is an approximation of document size, kept as-is for report
/// compatibility.
pub fn repr_len(doc: &Document) -> usize {
  let mut buf = String::new();
  write_object(&mut buf, doc);
  buf.chars().count()
}

/// Python `repr()` of a JSON value.
pub fn repr(value: &Value) -> String {
  let mut buf = String::new();
  write_value(&mut buf, value);
  buf
}

/// Python `str()` of a JSON value: strings verbatim, everything else as
/// [`repr`].
pub fn to_py_str(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => repr(other),
  }
}

fn write_value(buf: &mut String, value: &Value) {
  match value {
    Value::Null => buf.push_str("None"),
    Value::Bool(true) => buf.push_str("True"),
    Value::Bool(false) => buf.push_str("False"),
    Value::Number(n) => write_number(buf, n),
    Value::String(s) => write_str(buf, s),
    Value::Array(items) => {
      buf.push('[');
      for (i, item) in items.iter().enumerate() {
        if i > 0 {
          buf.push_str(", ");
        }
        write_value(buf, item);
      }
      buf.push(']');
    }
    Value::Object(map) => write_object(buf, map),
  }
}

fn write_object(buf: &mut String, map: &Document) {
  buf.push('{');
  for (i, (key, value)) in map.iter().enumerate() {
    if i > 0 {
      buf.push_str(", ");
    }
    write_str(buf, key);
    buf.push_str(": ");
    write_value(buf, value);
  }
  buf.push('}');
}

fn write_number(buf: &mut String, n: &Number) {
  match n.as_f64() {
    Some(f) if !(n.is_i64() || n.is_u64()) => buf.push_str(&float_repr(f)),
    _ => buf.push_str(&n.to_string()),
  }
}

/// Python's `repr(float)`: fixed notation for decimal exponents in
/// `-4..16`, scientific with a signed two-digit exponent otherwise.
fn float_repr(f: f64) -> String {
  if f.is_nan() {
    return "nan".to_owned();
  }
  if f.is_infinite() {
    return if f > 0.0 { "inf" } else { "-inf" }.to_owned();
  }

  let sci = format!("{f:e}");
  let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let exp: i32 = exp.parse().unwrap_or(0);

  if (-4..16).contains(&exp) {
    let fixed = f.to_string();
    if fixed.contains('.') { fixed } else { format!("{fixed}.0") }
  } else {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
  }
}

fn write_str(buf: &mut String, s: &str) {
  let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
  buf.push(quote);
  for c in s.chars() {
    match c {
      '\\' => buf.push_str("\\\\"),
      '\n' => buf.push_str("\\n"),
      '\r' => buf.push_str("\\r"),
      '\t' => buf.push_str("\\t"),
      c if c == quote => {
        buf.push('\\');
        buf.push(c);
      }
      c if !is_printable(c) => buf.push_str(&escape(c)),
      c => buf.push(c),
    }
  }
  buf.push(quote);
}

fn escape(c: char) -> String {
  match c as u32 {
    n @ 0..=0xff => format!("\\x{n:02x}"),
    n @ 0x100..=0xffff => format!("\\u{n:04x}"),
    n => format!("\\U{n:08x}"),
  }
}

/// Python's `str.isprintable` for one character: false for control and
/// format characters, private use, surrogates, noncharacters, and every
/// separator other than the ASCII space. Unassigned code points are treated
/// as printable.
fn is_printable(c: char) -> bool {
  if c == ' ' {
    return true;
  }
  if c.is_control() {
    return false;
  }
  let n = c as u32;
  let noncharacter = (0xfdd0..=0xfdef).contains(&n) || n & 0xfffe == 0xfffe;
  let separator = matches!(
    n,
    0xa0 | 0x1680 | 0x2000..=0x200a | 0x2028 | 0x2029 | 0x202f | 0x205f | 0x3000
  );
  let format = matches!(
    n,
    0xad
      | 0x600..=0x605
      | 0x61c
      | 0x6dd
      | 0x70f
      | 0x890..=0x891
      | 0x8e2
      | 0x180e
      | 0x200b..=0x200f
      | 0x202a..=0x202e
      | 0x2060..=0x2064
      | 0x2066..=0x206f
      | 0xfeff
      | 0xfff9..=0xfffb
      | 0x110bd
      | 0x110cd
      | 0x13430..=0x1343f
      | 0x1bca0..=0x1bca3
      | 0x1d173..=0x1d17a
      | 0xe0001
      | 0xe0020..=0xe007f
  );
  let private_use =
    matches!(n, 0xe000..=0xf8ff | 0xf0000..=0xffffd | 0x100000..=0x10fffd);
  !(noncharacter || separator || format || private_use)
}
