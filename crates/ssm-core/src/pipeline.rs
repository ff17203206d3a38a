//! Filter, report and export loop over a sorted record set.

use std::{
  io::Write,
  path::{Path, PathBuf},
};

use crate::{
  Error, Result,
  export::write_map_to_file,
  filter::ExportFilter,
  pyrepr::{repr_len, to_py_str},
  record::MapRecord,
  report::{write_header, write_row},
};

/// One map written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMap {
  pub id:       i64,
  pub location: String,
  pub path:     PathBuf,
}

/// Outcome of [`export_maps`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
  /// Records examined, qualifying or not.
  pub scanned:  usize,
  pub exported: Vec<ExportedMap>,
}

/// Export every qualifying record in `records` to `out_dir`, printing the
/// report table to `out`.
///
/// Records are visited in the order given; the running counter only
/// advances for records that pass `filter`. The first failure aborts the
/// run and leaves files already written in place.
pub fn export_maps<W: Write + ?Sized>(
  records: &[MapRecord],
  out_dir: &Path,
  filter:  &ExportFilter,
  out:     &mut W,
) -> Result<ExportSummary> {
  write_header(out).map_err(Error::Report)?;

  let mut summary = ExportSummary {
    scanned:  records.len(),
    exported: Vec::new(),
  };

  for record in records {
    let Some(location) = filter.location(record) else {
      continue;
    };
    let location = to_py_str(location);
    let n = summary.exported.len() + 1;

    write_row(out, n, &location, repr_len(&record.document), record.modified_at)
      .map_err(Error::Report)?;
    let path = write_map_to_file(out_dir, &location, record.id, &record.document)?;
    tracing::debug!(id = record.id, path = %path.display(), "exported map");

    summary.exported.push(ExportedMap {
      id: record.id,
      location,
      path,
    });
  }

  tracing::info!(
    scanned = summary.scanned,
    exported = summary.exported.len(),
    dir = %out_dir.display(),
    "export finished"
  );
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use serde_json::json;

  use super::*;
  use crate::{
    record::SortKey,
    report::HEADER,
    source::{
      fetch_sorted,
      tests::{VecSource, record},
    },
  };

  fn run(records: &[MapRecord], dir: &Path) -> (ExportSummary, String) {
    let mut out = Vec::new();
    let summary = export_maps(records, dir, &ExportFilter::default(), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
  }

  #[test]
  fn exports_qualifying_map() {
    let tmp = tempfile::tempdir().unwrap();
    let records = vec![record(
      42,
      5,
      json!({"schoolLocation": "Lincoln Elementary!", "other": 1}),
      "2019-03-01 10:15",
    )];

    let (summary, text) = run(&records, tmp.path());

    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.exported.len(), 1);
    let exported = &summary.exported[0];
    assert_eq!(exported.id, 42);
    assert_eq!(exported.location, "Lincoln Elementary!");
    assert_eq!(exported.path, tmp.path().join("ssm-Lincoln_Elementary-42.json"));
    assert!(exported.path.is_file());

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
      lines[2],
      format!("   1. Lincoln Elementary!{}53{}2019-03-01 10:15", " ".repeat(19), " ".repeat(13))
    );
  }

  #[test]
  fn excluded_records_do_not_advance_counter() {
    let tmp = tempfile::tempdir().unwrap();
    let records = vec![
      record(1, 5, json!({"schoolLocation": "First"}), "2019-01-01 00:00"),
      record(2, 2, json!({"schoolLocation": "Staff"}), "2019-01-02 00:00"),
      record(3, 5, json!({"other": 1}), "2019-01-03 00:00"),
      record(4, 20, json!({"schoolLocation": "Staff"}), "2019-01-04 00:00"),
      record(5, 9, json!({"schoolLocation": "Second"}), "2019-01-05 00:00"),
    ];

    let (summary, text) = run(&records, tmp.path());

    assert_eq!(summary.scanned, 5);
    let ids: Vec<_> = summary.exported.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 5]);

    let rows: Vec<_> = text.lines().skip(2).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("   1. First"));
    assert!(rows[1].starts_with("   2. Second"));

    let mut files: Vec<_> = fs::read_dir(tmp.path())
      .unwrap()
      .map(|e| e.unwrap().file_name().into_string().unwrap())
      .collect();
    files.sort();
    assert_eq!(files, vec!["ssm-First-1.json", "ssm-Second-5.json"]);
  }

  #[test]
  fn empty_record_set_prints_only_header() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("never-created");

    let (summary, text) = run(&[], &out_dir);

    assert_eq!(summary, ExportSummary::default());
    assert_eq!(text, format!("{HEADER}\n{}\n", "_".repeat(74)));
    assert!(!out_dir.exists());
  }

  #[test]
  fn non_string_location_uses_python_rendering() {
    let tmp = tempfile::tempdir().unwrap();
    let records = vec![record(8, 5, json!({"schoolLocation": 12}), "2019-01-01 00:00")];

    let (summary, _) = run(&records, tmp.path());
    assert_eq!(summary.exported[0].location, "12");
    assert_eq!(summary.exported[0].path, tmp.path().join("ssm-12-8.json"));
  }

  #[test]
  fn fetch_then_export_follows_modified_order() {
    let tmp = tempfile::tempdir().unwrap();
    let source = VecSource(vec![
      record(1, 5, json!({"schoolLocation": "Late"}), "2019-06-01 12:00"),
      record(2, 5, json!({"schoolLocation": "Early"}), "2018-06-01 12:00"),
    ]);
    let mut out = Vec::new();

    let records = fetch_sorted(source, SortKey::ModifiedAt, &mut out).unwrap();
    let summary = export_maps(&records, tmp.path(), &ExportFilter::default(), &mut out).unwrap();

    let locations: Vec<_> = summary.exported.iter().map(|e| e.location.as_str()).collect();
    assert_eq!(locations, vec!["Early", "Late"]);

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("number of maps fetched: 2\n"));
  }

  #[test]
  fn write_failure_stops_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, "").unwrap();
    let records = vec![record(1, 5, json!({"schoolLocation": "A"}), "2019-01-01 00:00")];
    let mut out = Vec::new();

    let err = export_maps(&records, &blocker.join("out"), &ExportFilter::default(), &mut out)
      .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
