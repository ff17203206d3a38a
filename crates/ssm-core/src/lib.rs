//! Core types and pipeline for exporting system support maps (SSMs).
//!
//! This crate knows nothing about any particular database. Storage backends
//! implement [`source::MapSource`]; everything downstream of the fetch (the
//! filter, the console report, file naming and JSON output) lives here.

pub mod error;
pub mod export;
pub mod filter;
pub mod naming;
pub mod pipeline;
pub mod pyrepr;
pub mod record;
pub mod report;
pub mod source;

pub use error::{Error, Result};
pub use filter::ExportFilter;
pub use pipeline::{ExportSummary, ExportedMap, export_maps};
pub use record::{Document, MapRecord, SortKey};
pub use source::{MapSource, fetch_sorted};
