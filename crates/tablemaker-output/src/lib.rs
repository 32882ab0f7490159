//! Persisting rendered tables.

pub mod files;
pub mod manifest;

pub use files::{DEFAULT_MAX_CONCURRENCY, FileWriter, TableWriter, write_tables};
pub use manifest::{MANIFEST_FILE, Manifest};
