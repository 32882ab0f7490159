use sqlx::PgPool;
use sqlx::postgres::{PgExecutor, PgPoolOptions};

use tablemaker_core::{Error, IntrospectionResult, Result};

use crate::adapter::TableSource;
use crate::options::{ConnectOptions, IntrospectOptions};

mod mapper;
mod queries;
mod utils;

pub use queries::{RawArrayColumn, list_array_columns};
pub(crate) use mapper::project_onto_request;

/// Source resolving relation names against one schema of a Postgres database.
#[derive(Debug, Clone)]
pub struct PostgresTableSource {
    pool: PgPool,
    schema: String,
    options: IntrospectOptions,
}

impl PostgresTableSource {
    /// Create a source using a pre-configured pool and default options.
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self::with_options(pool, schema, IntrospectOptions::default())
    }

    /// Create a source with caller-provided options.
    pub fn with_options(
        pool: PgPool,
        schema: impl Into<String>,
        options: IntrospectOptions,
    ) -> Self {
        Self {
            pool,
            schema: schema.into(),
            options,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

#[async_trait::async_trait]
impl TableSource for PostgresTableSource {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, names: &[String]) -> Result<IntrospectionResult> {
        let pending = list_read_only(&self.pool, &self.schema, names);
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                Error::Query(format!(
                    "catalog query timed out after {}ms",
                    limit.as_millis()
                ))
            })?,
            None => pending.await,
        }
    }
}

/// Open a connection pool for introspection.
pub async fn connect(url: &str, opts: &ConnectOptions) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(opts.max_connections)
        .acquire_timeout(opts.acquire_timeout)
        .connect(url)
        .await
        .map_err(|err| Error::Connect(err.to_string()))
}

/// Resolve `names` in `schema` using any executor, including a transaction
/// owned by the caller.
///
/// Issues a single catalog query regardless of how many names are requested.
pub async fn list_tables<'e, E>(
    executor: E,
    schema: &str,
    names: &[String],
) -> Result<IntrospectionResult>
where
    E: PgExecutor<'e>,
{
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let raw = queries::list_array_columns(executor, schema, names).await?;
    let groups = mapper::group_by_relation(raw);
    Ok(mapper::project_onto_request(&groups, names))
}

async fn list_read_only(
    pool: &PgPool,
    schema: &str,
    names: &[String],
) -> Result<IntrospectionResult> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let mut tx = pool.begin().await.map_err(utils::map_connect_error)?;
    sqlx::query("set transaction read only")
        .execute(&mut *tx)
        .await
        .map_err(utils::map_sqlx_error)?;

    let result = list_tables(&mut *tx, schema, names).await?;

    tx.rollback().await.map_err(utils::map_sqlx_error)?;
    Ok(result)
}
