use anyhow::{Context, Result};
use clap::Parser;
use fixturegen::config::{FixtureYamlConfig, TableConfig};
use fixturegen::{fetch_table, FetchOptions, FixtureError, FixtureRenderer, RenderOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroU64;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fixturegen-sqlalchemy")]
#[command(version)]
#[command(about = "Provide DSN and table name for fixture generation", long_about = None)]
#[command(after_help = "Examples:
  fixturegen-sqlalchemy sqlite:///app.db user
  fixturegen-sqlalchemy sqlite:////var/db/app.db user --where \"id > 2\" --order-by \"id DESC\"
  fixturegen-sqlalchemy duckdb:///warehouse.duckdb orders --limit 10 --naming-row-columns=id,status
  fixturegen-sqlalchemy sqlite:///app.db user --no-import -o tests/fixtures/user.py")]
pub struct Cli {
    /// Database connection string (sqlite:///path.db, duckdb:///path.duckdb)
    pub dsn: String,

    /// Table to generate the fixture from
    pub table: String,

    /// Limit fixture count
    #[arg(long, value_name = "N")]
    pub limit: Option<NonZeroU64>,

    /// Filter result, e.g. "id > 2"
    #[arg(long = "where", value_name = "EXPR")]
    pub where_clause: Option<String>,

    /// Order fixture output, e.g. "id DESC"
    #[arg(long, value_name = "EXPR")]
    pub order_by: Option<String>,

    /// Columns naming each row class (comma-separated; empty for positional)
    #[arg(long, value_name = "COLS")]
    pub naming_row_columns: Option<String>,

    /// Dataset class name (default: <Table>Data)
    #[arg(long, value_name = "NAME")]
    pub fixture_class_name: Option<String>,

    /// Omit import lines
    #[arg(long)]
    pub no_import: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// YAML config file with per-table defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse a comma-separated column list; an empty string means no columns
fn parse_columns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Merge command-line flags over config file defaults
fn resolve_options(
    cli: &Cli,
    yaml: Option<&FixtureYamlConfig>,
) -> (FetchOptions, RenderOptions) {
    let table_config = yaml
        .and_then(|c| c.get_table_config(&cli.table))
        .cloned()
        .unwrap_or_default();
    let TableConfig {
        naming_columns,
        fixture_class_name,
        where_clause,
        order_by,
        limit,
    } = table_config;

    let fetch = FetchOptions {
        limit: cli.limit.or(limit),
        where_clause: cli.where_clause.clone().or(where_clause),
        order_by: cli.order_by.clone().or(order_by),
    };

    let with_import = if cli.no_import {
        false
    } else {
        yaml.and_then(|c| c.with_import).unwrap_or(true)
    };

    let render = RenderOptions {
        row_naming_columns: cli
            .naming_row_columns
            .as_deref()
            .map(parse_columns)
            .or(naming_columns),
        with_import,
        fixture_class_name: cli.fixture_class_name.clone().or(fixture_class_name),
    };

    (fetch, render)
}

pub fn run(cli: Cli) -> Result<()> {
    let yaml = match &cli.config {
        Some(path) => Some(
            FixtureYamlConfig::load(path)
                .with_context(|| format!("Cannot load config: {}", path.display()))?,
        ),
        None => None,
    };

    let (fetch_options, render_options) = resolve_options(&cli, yaml.as_ref());
    tracing::debug!(?fetch_options, ?render_options, "resolved options");

    let table = fetch_table(&cli.table, &cli.dsn, &fetch_options)?;
    let renderer = FixtureRenderer::new()?;
    let fixture = renderer.render(&table, &render_options)?;

    if let Some(output_path) = &cli.output {
        let file = File::create(output_path)
            .with_context(|| format!("Cannot create output file: {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(fixture.as_bytes())?;
        writer.flush()?;
        eprintln!(
            "Wrote {} rows of {} to {}",
            table.row_count(),
            cli.table,
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(fixture.as_bytes())?;
        handle.flush()?;
    }

    Ok(())
}

/// Message printed on stderr for a failed run
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FixtureError>() {
        Some(FixtureError::NoSuchTable(_)) => "No such table".to_string(),
        Some(FixtureError::WrongConnection { .. }) => "Wrong DSN".to_string(),
        _ => format!("{:#}", err),
    }
}
