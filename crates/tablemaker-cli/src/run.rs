use std::io::Write;
use std::path::PathBuf;

use tablemaker_core::{Clock, SqlRenderer, Table, TableRenderer, validate_tables};
use tablemaker_introspect::TableSource;
use tablemaker_output::{FileWriter, Manifest, TableWriter};

use crate::CliError;

/// Everything a single generation run needs besides the table source.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub schema: String,
    pub names: Vec<String>,
    pub indent: String,
    pub out_dir: Option<PathBuf>,
    pub max_concurrency: usize,
    pub manifest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Introspect the requested relations and emit their DDL, either as one file
/// per table under `out_dir` or as a single batch on `stdout`.
pub async fn run<S, W>(
    source: &S,
    plan: &RunPlan,
    clock: &dyn Clock,
    stdout: &mut W,
) -> Result<RunSummary, CliError>
where
    S: TableSource + Sync,
    W: Write,
{
    tracing::info!(
        event = "introspection_started",
        engine = source.engine(),
        schema = %plan.schema,
        relations = plan.names.len()
    );

    let result = source.list(&plan.names).await?;

    for (name, slot) in plan.names.iter().zip(&result) {
        if slot.is_none() {
            tracing::warn!(
                event = "relation_skipped",
                relation = %name,
                reason = "no such relation or no array columns"
            );
        }
    }

    let tables: Vec<Table> = result.iter().flatten().cloned().collect();
    validate_tables(&tables)?;

    tracing::info!(event = "introspection_finished", tables = tables.len());

    let renderer = SqlRenderer::new(plan.indent.clone());
    match &plan.out_dir {
        Some(out_dir) => {
            let writer = FileWriter::with_renderer(out_dir.clone(), renderer)
                .max_concurrency(plan.max_concurrency);
            writer.write_all(&tables).await?;
            for table in &tables {
                tracing::info!(
                    event = "table_written",
                    table = %table.name,
                    path = %writer.destination(&table.name).display()
                );
            }

            if plan.manifest {
                let manifest = Manifest::from_result(clock, &plan.schema, &plan.names, &result);
                let path = manifest.write(out_dir).await?;
                tracing::info!(event = "manifest_written", path = %path.display());
            }
        }
        None => {
            if !tables.is_empty() {
                writeln!(stdout, "{}", renderer.render(&tables))?;
                stdout.flush()?;
            }
        }
    }

    Ok(RunSummary {
        written: tables.len(),
        skipped: result.len() - tables.len(),
    })
}
