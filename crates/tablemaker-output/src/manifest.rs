use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tablemaker_core::{Clock, Error, IntrospectionResult, Result};

/// File name of the manifest written next to the table artifacts.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of one run: which requested relations produced a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub schema: String,
    /// Names written, in request order.
    pub tables: Vec<String>,
    /// Requested names that resolved to an empty slot.
    pub skipped: Vec<String>,
}

impl Manifest {
    pub fn from_result(
        clock: &dyn Clock,
        schema: &str,
        names: &[String],
        result: &IntrospectionResult,
    ) -> Self {
        let mut tables = Vec::new();
        let mut skipped = Vec::new();
        for (name, slot) in names.iter().zip(result) {
            match slot {
                Some(table) => tables.push(table.name.clone()),
                None => skipped.push(name.clone()),
            }
        }

        Self {
            generated_at: clock.now(),
            schema: schema.to_string(),
            tables,
            skipped,
        }
    }

    /// Write the manifest to `<root>/manifest.json` through a temporary file.
    pub async fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(MANIFEST_FILE);
        let data = serde_json::to_vec_pretty(self).map_err(|err| Error::Write {
            path: path.clone(),
            source: io::Error::from(err),
        })?;

        let tmp_path = root.join(format!("{MANIFEST_FILE}.tmp"));
        let written = tokio::fs::write(&tmp_path, &data).await;
        written.map_err(|source| Error::Write {
            path: tmp_path.clone(),
            source,
        })?;
        let renamed = tokio::fs::rename(&tmp_path, &path).await;
        renamed.map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
