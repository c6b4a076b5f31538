//! CLI tool for the schemagen toolchain.
//!
//! Renders JSON Schema documents for the types defined in a catalog file.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(about = "Generate JSON Schema documents from type catalogs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the schema of one catalog type
    Generate {
        /// Path to the catalog JSON file
        catalog: PathBuf,

        /// Name of the type to render
        #[arg(long = "type", short = 't')]
        type_name: String,

        /// Meta-schema URI (default: http://json-schema.org/schema#)
        #[arg(long)]
        schema: Option<String>,

        /// Spaces per indentation level
        #[arg(long, default_value_t = schemagen_core::document::DEFAULT_INDENT)]
        indent: usize,

        /// Emit single-line JSON
        #[arg(long, conflicts_with = "indent")]
        compact: bool,

        /// Output file path (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the types defined in a catalog
    List {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },

    /// Verify that every type reference in a catalog resolves
    Check {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            catalog,
            type_name,
            schema,
            indent,
            compact,
            output,
        } => {
            let format = if compact {
                commands::OutputFormat::Compact
            } else {
                commands::OutputFormat::Pretty { indent }
            };
            commands::generate(&catalog, &type_name, schema, format, output.as_deref())
        }
        Commands::List { catalog } => commands::list(&catalog),
        Commands::Check { catalog } => commands::check(&catalog),
    }
}
