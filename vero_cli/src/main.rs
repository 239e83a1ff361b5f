//! # Vero Diagnostics CLI
//!
//! Explains error codes and maps raw engine errors to diagnostics.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use vero_diagnostics::{
    logging, mapper::RawError, registry, to_editor_markers, ErrorCategory, RuntimeErrorMapper,
    SourceMap, FALLBACK_CODE,
};

/// Vero diagnostics - error code catalog and runtime error mapping
#[derive(Parser)]
#[command(name = "vero-diag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the help page for one error code
    Explain {
        /// Code such as VERO-401 (vero_401 is accepted too)
        code: String,
    },

    /// List catalog codes
    Codes {
        /// Only codes of this category (lexer, parser, locator, ...)
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Map raw runtime errors to diagnostics
    Map {
        /// File holding the raw error(s), or - for stdin
        #[arg(long, short)]
        input: String,

        /// Source map JSON produced by the code generator
        #[arg(long, short)]
        source_map: Option<PathBuf>,

        /// Statement to attach to every diagnostic
        #[arg(long)]
        statement: Option<String>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markers,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    logging::init_global_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Explain { code } => explain(&code),
        Commands::Codes { category } => list_codes(category.as_deref()),
        Commands::Map {
            input,
            source_map,
            statement,
            format,
        } => map(&input, source_map.as_deref(), statement.as_deref(), format),
    }
}

fn explain(code: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(definition) = registry::get_definition(code) {
        println!("{}", definition.format_plain());
        return Ok(());
    }

    if registry::normalize_code(code) == FALLBACK_CODE.as_str() {
        println!("{}: Unexpected error", FALLBACK_CODE);
        println!();
        println!("A runtime error that no known pattern recognized. The original");
        println!("message is kept verbatim. One retry is suggested.");
        return Ok(());
    }

    Err(format!("Unknown error code '{}'", code).into())
}

fn list_codes(category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let definitions = match category {
        Some(name) => {
            let category = ErrorCategory::parse(name).ok_or_else(|| {
                let known: Vec<&str> = ErrorCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}' (expected one of: {})", name, known.join(", "))
            })?;
            registry::codes_for_category(category)
        }
        None => registry::all_definitions().to_vec(),
    };

    for definition in definitions {
        println!(
            "{}  {:<10}  {:<9}  {}",
            definition.code,
            definition.category.as_str(),
            definition.flakiness.as_str(),
            definition.title
        );
    }
    Ok(())
}

fn map(
    input: &str,
    source_map: Option<&Path>,
    statement: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let raws = parse_raw_errors(&text)?;
    log::debug!("Read {} raw error(s) from {}", raws.len(), input);

    let mut mapper = RuntimeErrorMapper::new();
    if let Some(path) = source_map {
        let map = SourceMap::load(path)?;
        log::info!("Loaded source map with {} entries from {}", map.len(), path.display());
        mapper.set_source_map(map);
    }

    let statements: Option<Vec<&str>> = statement.map(|s| vec![s; raws.len()]);
    let diagnostics = mapper.map_errors(&raws, statements.as_deref());

    match format {
        OutputFormat::Text => {
            for diagnostic in &diagnostics {
                println!("{}", diagnostic.format_detailed());
            }
            let unclassified = diagnostics.iter().filter(|d| d.is_unclassified()).count();
            if unclassified > 0 {
                log::warn!("{} error(s) matched no known pattern", unclassified);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
        OutputFormat::Markers => {
            println!("{}", serde_json::to_string_pretty(&to_editor_markers(&diagnostics))?)
        }
    }
    Ok(())
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

/// JSON array for a batch, a JSON string or object for one error, plain text otherwise
fn parse_raw_errors(text: &str) -> Result<Vec<RawError>, vero_diagnostics::VeroError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return Ok(RawError::batch_from_json(trimmed)?);
    }
    if trimmed.starts_with('{') || trimmed.starts_with('"') {
        return Ok(vec![RawError::from_json(trimmed)?]);
    }
    Ok(vec![RawError::new(text.trim_end())])
}
