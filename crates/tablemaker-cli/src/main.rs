mod logging;
mod run;
mod settings;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgConnectOptions;
use tablemaker_core::{Error as CoreError, SystemClock};
use tablemaker_introspect::{ConnectOptions, IntrospectOptions, PostgresTableSource, connect};
use thiserror::Error;

use logging::init_logging;
use run::RunPlan;
use settings::{LogFormat, Settings, SettingsError, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "tablemaker", version, about = "tablemaker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit `create table` DDL for the array columns of the given relations.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Relation names (tables, views, materialized views).
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,
    /// Path to a TOML config file (defaults to ./tablemaker.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Database connection string.
    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        value_name = "CONNECTION_STRING"
    )]
    database_url: Option<String>,
    /// Schema the relations live in.
    #[arg(long)]
    schema: Option<String>,
    /// Indentation of column lines.
    #[arg(long)]
    indent: Option<String>,
    /// Directory receiving one `<table>.sql` file per table.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Introspection timeout in seconds (0 disables).
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Maximum number of files written concurrently.
    #[arg(long)]
    max_concurrency: Option<usize>,
    /// Write manifest.json next to the generated files.
    #[arg(long, default_value_t = false)]
    manifest: bool,
    /// Log level used when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
    /// Log output format.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut settings = load_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);
    let conn = validate(&settings, &args.names)?;

    init_logging(&settings.log)?;

    let timer = Instant::now();
    match PgConnectOptions::from_str(&conn) {
        Ok(target) => tracing::info!(
            event = "run_started",
            host = %target.get_host(),
            port = target.get_port(),
            database = target.get_database().unwrap_or_default()
        ),
        Err(_) => tracing::info!(event = "run_started"),
    }

    let pool = connect(
        &conn,
        &ConnectOptions {
            max_connections: settings.max_connections,
            acquire_timeout: Duration::from_secs(settings.acquire_timeout_secs),
        },
    )
    .await?;

    let timeout = (settings.timeout_secs > 0).then(|| Duration::from_secs(settings.timeout_secs));
    let source = PostgresTableSource::with_options(
        pool.clone(),
        settings.schema.clone(),
        IntrospectOptions { timeout },
    );

    let plan = RunPlan {
        schema: settings.schema,
        names: args.names,
        indent: settings.indent,
        out_dir: settings.out_dir,
        max_concurrency: settings.max_concurrency,
        manifest: settings.manifest,
    };

    let outcome = run::run(&source, &plan, &SystemClock, &mut io::stdout()).await;
    pool.close().await;
    let summary = outcome?;

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(
        event = "run_finished",
        status = "success",
        written = summary.written,
        skipped = summary.skipped,
        duration_ms = duration_ms
    );

    Ok(())
}

/// Flags and `DATABASE_URL` take precedence over the config file.
fn apply_overrides(settings: &mut Settings, args: &GenerateArgs) {
    if let Some(url) = &args.database_url {
        settings.database_url = Some(url.clone());
    }
    if let Some(schema) = &args.schema {
        settings.schema = schema.clone();
    }
    if let Some(indent) = &args.indent {
        settings.indent = indent.clone();
    }
    if let Some(out_dir) = &args.out_dir {
        settings.out_dir = Some(out_dir.clone());
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = timeout_secs;
    }
    if let Some(max_concurrency) = args.max_concurrency {
        settings.max_concurrency = max_concurrency;
    }
    if args.manifest {
        settings.manifest = true;
    }
    if let Some(level) = &args.log_level {
        settings.log.level = level.clone();
    }
    if let Some(format) = args.log_format {
        settings.log.format = format;
    }
}

/// Check the merged settings and return the connection string.
fn validate(settings: &Settings, names: &[String]) -> Result<String, CliError> {
    let conn = settings
        .database_url
        .clone()
        .ok_or_else(|| CliError::InvalidConfig("connection string is required".to_string()))?;
    detect_engine(&conn)?;

    if names.is_empty() {
        return Err(CliError::InvalidConfig(
            "at least one relation name is required".to_string(),
        ));
    }
    if settings.max_concurrency == 0 {
        return Err(CliError::InvalidConfig(
            "max_concurrency must be at least 1".to_string(),
        ));
    }
    if settings.manifest && settings.out_dir.is_none() {
        return Err(CliError::InvalidConfig(
            "manifest requires out_dir".to_string(),
        ));
    }

    Ok(conn)
}

fn detect_engine(conn: &str) -> Result<&'static str, CliError> {
    if conn.starts_with("postgres://") || conn.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        let scheme = conn.split_once("://").map_or("<none>", |(scheme, _)| scheme);
        Err(CliError::UnsupportedEngine(scheme.to_string()))
    }
}
