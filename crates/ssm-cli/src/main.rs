//! `get-mental-maps` — export the school mental-health system support maps.
//!
//! Reads every map from the SSM store, keeps those created by the
//! "Roles in Mental Health Care within Schools" wizard (the ones whose
//! document carries a `schoolLocation`), and writes each as a `.json` file
//! into the output directory, printing a tracking table to stdout.
//!
//! # Usage
//!
//! ```
//! get-mental-maps ./ssm-export
//! get-mental-maps --config ssm.toml ./ssm-export
//! SSM_STORE__DATABASE=/data/ssm.db get-mental-maps ./ssm-export
//! ```

use std::{
  io::{self, Write},
  path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use ssm_core::{ExportFilter, SortKey, export_maps, fetch_sorted};
use ssm_store_sqlite::{SqliteStore, StoreConfig};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "get-mental-maps",
  version,
  about = "Export school system support maps as JSON files"
)]
struct Cli {
  /// Directory the .json files are written to; created if missing.
  output_dir: PathBuf,

  /// Optional TOML file overriding the store location and filter.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Run configuration: compiled-in defaults, then the `--config` file, then
/// `SSM_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Settings {
  #[serde(default)]
  store:  StoreConfig,
  #[serde(default)]
  filter: ExportFilter,
}

/// `SSM_STORE__DATABASE`, `SSM_FILTER__EXCLUDED_OWNERS=2,20,31`, ...
fn environment() -> config::Environment {
  config::Environment::with_prefix("SSM")
    .prefix_separator("_")
    .separator("__")
    .list_separator(",")
    .with_list_parse_key("filter.excluded_owners")
    .try_parsing(true)
}

fn load_settings(path: Option<&std::path::Path>) -> anyhow::Result<Settings> {
  load_settings_with(path, environment())
}

fn load_settings_with(
  path: Option<&std::path::Path>,
  env:  config::Environment,
) -> anyhow::Result<Settings> {
  let mut builder = config::Config::builder();
  if let Some(path) = path {
    builder = builder.add_source(config::File::from(path).required(true));
  }
  let settings = builder
    .add_source(env)
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise Settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries only the export report.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(cli.config.as_deref())?;
  tracing::debug!(?settings, "loaded settings");

  let stdout = io::stdout();
  let mut out = stdout.lock();

  writeln!(out, "Connecting to ssm database...")?;
  let store = SqliteStore::connect(&settings.store)
    .with_context(|| format!("failed to open store at {:?}", settings.store.database))?;

  let maps = fetch_sorted(store, SortKey::ModifiedAt, &mut out)
    .context("failed to fetch maps")?;

  export_maps(&maps, &cli.output_dir, &settings.filter, &mut out)
    .with_context(|| format!("failed to export maps to {:?}", cli.output_dir))?;

  out.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_is_well_formed() { Cli::command().debug_assert(); }

  #[test]
  fn output_dir_is_required() {
    assert!(Cli::try_parse_from(["get-mental-maps"]).is_err());

    let cli = Cli::try_parse_from(["get-mental-maps", "out/"]).unwrap();
    assert_eq!(cli.output_dir, PathBuf::from("out/"));
    assert!(cli.config.is_none());
  }

  #[test]
  fn defaults_without_sources() {
    let settings = load_settings_with(None, env_vars(&[])).unwrap();
    assert_eq!(settings.store.table, "maps");
    assert_eq!(settings.filter.location_key, "schoolLocation");
    assert_eq!(settings.filter.excluded_owners, BTreeSet::from([2, 20]));
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ssm.toml");
    std::fs::write(
      &path,
      r#"
[store]
database = "/srv/ssm/maps.db"

[filter]
excluded_owners = [2, 20, 31]
"#,
    )
    .unwrap();

    let settings = load_settings_with(Some(&path), env_vars(&[])).unwrap();
    assert_eq!(settings.store.database, PathBuf::from("/srv/ssm/maps.db"));
    assert_eq!(settings.store.table, "maps");
    assert_eq!(settings.filter.excluded_owners, BTreeSet::from([2, 20, 31]));
  }

  fn env_vars(vars: &[(&str, &str)]) -> config::Environment {
    let map: config::Map<String, String> = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    environment().source(Some(map))
  }

  #[test]
  fn environment_overrides_store_and_filter() {
    let env = env_vars(&[
      ("SSM_STORE__DATABASE", "/data/ssm.db"),
      ("SSM_FILTER__EXCLUDED_OWNERS", "1,3"),
      ("UNRELATED_STORE__DATABASE", "/elsewhere.db"),
    ]);

    let settings = load_settings_with(None, env).unwrap();
    assert_eq!(settings.store.database, PathBuf::from("/data/ssm.db"));
    assert_eq!(settings.store.table, "maps");
    assert_eq!(settings.filter.excluded_owners, BTreeSet::from([1, 3]));
  }

  #[test]
  fn environment_wins_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ssm.toml");
    std::fs::write(&path, "[store]\ndatabase = \"/from/file.db\"\ntable = \"maps_2019\"\n").unwrap();
    let env = env_vars(&[("SSM_STORE__DATABASE", "/from/env.db")]);

    let settings = load_settings_with(Some(&path), env).unwrap();
    assert_eq!(settings.store.database, PathBuf::from("/from/env.db"));
    assert_eq!(settings.store.table, "maps_2019");
  }

  #[test]
  fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_settings(Some(&dir.path().join("nope.toml"))).is_err());
  }
}
