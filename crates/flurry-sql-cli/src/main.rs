//! flurry-sql CLI
//!
//! Parses SQL SELECT documents and prints them back as canonical SQL,
//! JSON, or a debug tree.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use flurry_sql_core::catalog::{self, Parens};
use flurry_sql_core::parser::DEFAULT_MAX_DEPTH;
use flurry_sql_core::{ParseError, Parser as SqlParser};

/// Parse a restricted SQL SELECT dialect.
#[derive(Parser)]
#[command(name = "flurry-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL file to parse; `-` or nothing reads stdin.
    file: Option<PathBuf>,

    /// Parse this text instead of reading a file.
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// How to print the parse result.
    #[arg(long, value_enum, default_value_t = Format::Sql)]
    format: Format,

    /// Parse the input as a single expression instead of statements.
    #[arg(long)]
    expression: bool,

    /// Maximum nesting depth before parsing is abandoned.
    #[arg(long, env = "FLURRY_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Print the function catalog and exit.
    #[arg(long)]
    list_functions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical SQL.
    Sql,
    /// Pretty-printed JSON.
    Json,
    /// Rust debug tree.
    Debug,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.list_functions {
        for line in function_listing() {
            println!("{line}");
        }
        return Ok(());
    }

    let (name, source) = read_source(&cli)?;
    debug!(source = %name, bytes = source.len(), max_depth = cli.max_depth, "parsing");

    let mut parser = SqlParser::new(&source).with_max_depth(cli.max_depth);
    let output = if cli.expression {
        let expr = parser
            .complete(SqlParser::expression)
            .or_else(|err| fail(&name, &source, &err))?;
        render(&expr, cli.format, |e| e.to_string())?
    } else {
        let statements = parser
            .parse_statements()
            .or_else(|err| fail(&name, &source, &err))?;
        info!(statements = statements.len(), "parsed {name}");
        render(&statements, cli.format, |stmts| {
            stmts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        })?
    };

    println!("{output}");
    Ok(())
}

/// Reads the SQL text, returning a display name for diagnostics with it.
fn read_source(cli: &Cli) -> anyhow::Result<(String, String)> {
    if let Some(text) = &cli.expr {
        return Ok((String::from("<expr>"), text.clone()));
    }

    match &cli.file {
        Some(path) if path.as_os_str() != "-" => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok((String::from("<stdin>"), source))
        }
    }
}

fn render<T: serde::Serialize + std::fmt::Debug>(
    value: &T,
    format: Format,
    sql: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    Ok(match format {
        Format::Sql => sql(value),
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Debug => format!("{value:#?}"),
    })
}

fn fail<T>(name: &str, source: &str, err: &ParseError) -> anyhow::Result<T> {
    bail!("{}", diagnostic(name, source, err))
}

/// Formats a parse error as `name:line:column`, the offending line, and a caret.
fn diagnostic(name: &str, source: &str, err: &ParseError) -> String {
    let (line, column) = err.span.line_col(source);
    let text = source.lines().nth(line - 1).unwrap_or_default();
    let caret = format!("{}^", " ".repeat(column - 1));
    format!("{name}:{line}:{column}: {}\n  {text}\n  {caret}", err.message)
}

/// One `NAME min..max` line per catalog function.
fn function_listing() -> Vec<String> {
    catalog::functions()
        .map(|(name, shape)| {
            let bare = if shape.parens == Parens::Omittable {
                " (parentheses optional)"
            } else {
                ""
            };
            format!("{name} {}..{}{bare}", shape.required, shape.max_args())
        })
        .collect()
}
