//! SQLite backend for SSM exports.
//!
//! [`SqliteStore`] opens the map store read-only, reads the whole maps table
//! in one query and hands the decoded rows to `ssm-core` through
//! [`ssm_core::MapSource`].

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteStore, StoreConfig};
