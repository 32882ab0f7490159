use sqlx::FromRow;
use sqlx::postgres::PgExecutor;

use tablemaker_core::Result;

use super::utils::map_sqlx_error;

/// Array-typed columns of the requested relations, ordered by relation and
/// attribute number. Only true array types (analyzed by `array_typanalyze`)
/// match; dropped and system columns are skipped.
const LIST_ARRAY_COLUMNS: &str = r#"
    select
      cls.relname::text as table_name,
      attr.attname::text as column_name,
      arr.typname::text as array_type,
      elem.typname::text as element_type
    from pg_catalog.pg_attribute as attr
    join pg_catalog.pg_class as cls on cls.oid = attr.attrelid
    join pg_catalog.pg_namespace as ns on ns.oid = cls.relnamespace
    join pg_catalog.pg_type as arr on arr.oid = attr.atttypid
    join pg_catalog.pg_type as elem on elem.oid = arr.typelem
    where ns.nspname::text = $1
      and cls.relname::text = any($2::text[])
      and cls.relkind in ('r', 'p', 'v', 'm', 'f')
      and attr.attnum > 0
      and not attr.attisdropped
      and arr.typanalyze::text = 'array_typanalyze'
    order by cls.relname, attr.attnum
"#;

#[derive(Debug, Clone, FromRow)]
pub struct RawArrayColumn {
    pub table_name: String,
    pub column_name: String,
    pub array_type: String,
    pub element_type: String,
}

pub async fn list_array_columns<'e, E>(
    executor: E,
    schema: &str,
    names: &[String],
) -> Result<Vec<RawArrayColumn>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, RawArrayColumn>(LIST_ARRAY_COLUMNS)
        .bind(schema.to_owned())
        .bind(names.to_vec())
        .fetch_all(executor)
        .await
        .map_err(map_sqlx_error)
}
