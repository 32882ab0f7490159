use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task::{JoinError, JoinSet};

use tablemaker_core::{Error, Result, SqlRenderer, Table, TableRenderer};

/// Number of writes allowed in flight when none is configured.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Trait implemented by sinks that persist tables.
#[async_trait]
pub trait TableWriter {
    /// Persist every table, returning the first failure observed.
    ///
    /// Writes that already started are allowed to finish after a failure;
    /// artifacts written before the failure are kept.
    async fn write_all(&self, tables: &[Table]) -> Result<()>;
}

/// Writes each table to `<root>/<table name>.sql`, concurrently.
#[derive(Debug, Clone)]
pub struct FileWriter<R = SqlRenderer> {
    root: PathBuf,
    renderer: R,
    max_concurrency: usize,
}

impl FileWriter<SqlRenderer> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_renderer(root, SqlRenderer::default())
    }
}

impl<R> FileWriter<R>
where
    R: TableRenderer + Send + Sync,
{
    pub fn with_renderer(root: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            root: root.into(),
            renderer,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Bound the number of concurrent writes. Values below 1 are treated as 1.
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination of the artifact for `table_name`.
    pub fn destination(&self, table_name: &str) -> PathBuf {
        self.root.join(format!("{table_name}.sql"))
    }
}

#[async_trait]
impl<R> TableWriter for FileWriter<R>
where
    R: TableRenderer + Send + Sync,
{
    async fn write_all(&self, tables: &[Table]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| Error::Write {
                path: self.root.clone(),
                source,
            })?;

        let mut tasks = JoinSet::new();
        let mut first_error = None;

        for table in tables {
            // A slot only frees up once its result is recorded, so a failure
            // is always seen before the next write is launched.
            while tasks.len() >= self.max_concurrency {
                match tasks.join_next().await {
                    Some(joined) => record(&mut first_error, joined),
                    None => break,
                }
            }
            while let Some(joined) = tasks.try_join_next() {
                record(&mut first_error, joined);
            }
            if first_error.is_some() {
                break;
            }

            let path = self.destination(&table.name);
            let contents = self.renderer.render_table(table);
            tasks.spawn(async move {
                let written = tokio::fs::write(&path, contents).await;
                written.map_err(|source| Error::Write { path, source })
            });
        }

        while let Some(joined) = tasks.join_next().await {
            record(&mut first_error, joined);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn record(first_error: &mut Option<Error>, joined: std::result::Result<Result<()>, JoinError>) {
    let outcome = joined
        .map_err(|err| Error::Task(err.to_string()))
        .and_then(|written| written);
    if let Err(err) = outcome {
        first_error.get_or_insert(err);
    }
}

/// Write every table under `root` with the default renderer and concurrency.
pub async fn write_tables(tables: &[Table], root: impl AsRef<Path>) -> Result<()> {
    FileWriter::new(root.as_ref()).write_all(tables).await
}
