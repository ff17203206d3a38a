//! Fixed-width console report of exported maps.
//!
//! ```text
//!      Location of school                  Size (bytes)     Last modified
//! __________________________________________________________________________
//!    1. Lincoln Elementary!                   53             2019-03-01 10:15
//! ```

use std::io::{self, Write};

use chrono::NaiveDateTime;

pub const HEADER: &str =
  "     Location of school                  Size (bytes)     Last modified";

pub const RULE_WIDTH: usize = 74;

/// Width shared by the location column, its padding and the size column.
const LOCATION_SIZE_WIDTH: usize = 40;

const SIZE_GAP: &str = "             ";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn write_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
  writeln!(out, "{HEADER}")?;
  writeln!(out, "{}", "_".repeat(RULE_WIDTH))
}

pub fn write_row<W: Write + ?Sized>(
  out:      &mut W,
  n:        usize,
  location: &str,
  size:     usize,
  modified: NaiveDateTime,
) -> io::Result<()> {
  writeln!(out, "{}", format_row(n, location, size, modified))
}

/// One report line. Counters below 1000 are right-aligned in four columns.
/// When the location and size together exceed the 40-column field, no
/// padding is inserted and the line simply runs long.
pub fn format_row(
  n:        usize,
  location: &str,
  size:     usize,
  modified: NaiveDateTime,
) -> String {
  let size = size.to_string();
  let used = location.chars().count() + size.chars().count();
  let pad = LOCATION_SIZE_WIDTH.saturating_sub(used);
  format!(
    "{}{n}. {location}{}{size}{SIZE_GAP}{}",
    counter_pad(n),
    " ".repeat(pad),
    modified.format(TIMESTAMP_FORMAT),
  )
}

fn counter_pad(n: usize) -> &'static str {
  match n {
    0..=9 => "   ",
    10..=99 => "  ",
    100..=999 => " ",
    _ => "",
  }
}
