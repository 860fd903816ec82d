//! ruvector-pagerank - run PageRank bridge calls from the command line
//!
//! A call file is a JSON array of the eight positional host arguments, each
//! tagged with its element class:
//!
//! ```json
//! [
//!   {"class": "int32", "dims": [1, 1], "data": [4]},
//!   {"class": "int32", "dims": [4, 1], "data": [0, 1, 2, 3]},
//!   {"class": "int32", "dims": [4, 1], "data": [1, 2, 3, 0]},
//!   {"class": "double", "dims": [1, 1], "real": [0.85]},
//!   {"class": "double", "dims": [1, 1], "real": [1e-10]},
//!   {"class": "double", "dims": [0, 0], "real": []},
//!   {"class": "double", "dims": [0, 0], "real": []},
//!   {"class": "char", "dims": [1, 5], "data": "power"}
//! ]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use ruvector_pagerank_bridge::error::BridgeError;
use std::path::PathBuf;

mod cli;
mod config;

use crate::cli::commands::*;
use crate::config::Config;

const DEBUG_FILTER: &str = "ruvector_pagerank_bridge=debug,ruvector_pagerank=debug";

#[derive(Parser)]
#[command(name = "ruvector-pagerank")]
#[command(about = "Validate and run PageRank host calls", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a call file through the reference engine
    Run {
        /// Call file (JSON array of eight host values)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of outputs the host requests
        #[arg(short, long, default_value = "1")]
        nlhs: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Print an audit record to stderr under this request id
        #[arg(long)]
        audit: Option<String>,
    },

    /// Check a call file without solving
    Validate {
        /// Call file (JSON array of eight host values)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of outputs the host requests
        #[arg(short, long, default_value = "1")]
        nlhs: usize,
    },

    /// List the reference engine's methods
    Methods,
}

fn init_logging(debug: bool, config: &Config) {
    let filter = if debug {
        Some(DEBUG_FILTER.to_string())
    } else {
        config.logging.filter.clone()
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Disable colors if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = match Config::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", cli::format::format_error(&format!("{:#}", e)));
            std::process::exit(1);
        }
    };

    init_logging(cli.debug, &config);

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            nlhs,
            format,
            audit,
        } => run_call(&input, nlhs, format, audit.as_deref(), &config),
        Commands::Validate { input, nlhs } => validate_call_file(&input, nlhs),
        Commands::Methods => list_methods(&config),
    };

    // Handle errors
    if let Err(e) = result {
        // Bridge rejections go out exactly as the host would see them.
        if let Some(err) = e.downcast_ref::<BridgeError>() {
            eprintln!("{}", err);
            if cli.debug {
                eprintln!("\n{:#?}", err);
            }
            std::process::exit(1);
        }

        eprintln!("{}", cli::format::format_error(&format!("{:#}", e)));
        if cli.debug {
            eprintln!("\n{:#?}", e);
        } else {
            eprintln!("\n{}", "Run with --debug for more details".dimmed());
        }
        std::process::exit(1);
    }

    Ok(())
}
