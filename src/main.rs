use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rust_sqlalias::{load_field_map, rewrite_file, rewrite_queries, transform, RewriteOptions};

#[derive(Parser)]
#[command(name = "rust-sqlalias")]
#[command(author, version, about = "Rewrite SQL into bracket-token vendor syntax")]
struct Cli {
    /// Enable verbose (debug) logging; RUST_LOG takes precedence
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite queries using a JSON field map
    Rewrite {
        /// Path to the JSON field map
        #[arg(short, long, env = "SQLALIAS_FIELD_MAP")]
        field_map: PathBuf,

        /// Single query to rewrite
        #[arg(short, long, conflicts_with = "input")]
        query: Option<String>,

        /// File with one query per line (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rewrite {
            field_map,
            query,
            input,
        } => {
            let options = RewriteOptions {
                field_map_path: field_map,
                input_path: input,
            };

            let rewritten = match (query, &options.input_path) {
                (Some(query), _) => {
                    let field_map = load_field_map(&options)?;
                    vec![transform(&query, &field_map)?]
                }
                (None, Some(_)) => rewrite_file(&options)?,
                (None, None) => {
                    let mut script = String::new();
                    std::io::stdin()
                        .read_to_string(&mut script)
                        .context("Failed to read queries from stdin")?;
                    rewrite_queries(&options, &script)?
                }
            };

            for line in rewritten {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
