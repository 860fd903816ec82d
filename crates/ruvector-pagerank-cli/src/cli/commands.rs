//! Command implementations

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use ruvector_pagerank_bridge::entrypoint::{
    pagerank_entry_audited, pagerank_entry_values, validate_entry,
};
use ruvector_pagerank_bridge::host::{HostArray, HostValue};
use ruvector_pagerank_bridge::traits::PageRankEngine;

use crate::cli::format::*;
use crate::config::Config;

/// How `run` prints the score column
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The output host value as JSON
    Json,
    /// A vertex / score table
    Table,
}

/// Read the positional host arguments of one call from a JSON file
pub fn read_call(path: &Path) -> Result<Vec<HostValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read call file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse call file {}", path.display()))
}

fn views(call: &[HostValue]) -> Result<Vec<HostArray<'_>>> {
    Ok(call
        .iter()
        .map(HostValue::view)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Run a call through the reference engine and print the result
pub fn run_call(
    input: &Path,
    nlhs: usize,
    format: OutputFormat,
    audit: Option<&str>,
    config: &Config,
) -> Result<()> {
    let call = read_call(input)?;
    let engine = config.engine();

    let outputs = match audit {
        Some(request_id) => {
            let inputs = views(&call)?;
            let (outputs, entry) = pagerank_entry_audited(nlhs, &inputs, &engine, request_id)?;
            eprintln!("{}", format_audit(&entry));
            outputs
        }
        None => pagerank_entry_values(nlhs, &call, &engine)?,
    };

    for output in &outputs {
        match format {
            OutputFormat::Json => println!("{}", to_json(output, config.output.pretty)?),
            OutputFormat::Table => {
                println!("{}", format_scores(output.as_real().unwrap_or_default()))
            }
        }
    }

    Ok(())
}

/// Check a call file against the argument rules without solving
pub fn validate_call_file(input: &Path, nlhs: usize) -> Result<()> {
    let call = read_call(input)?;
    let inputs = views(&call)?;
    let validated = validate_entry(nlhs, &inputs)?;

    println!("{}", format_success("Call is valid"));
    print!("{}", format_call_summary(&validated));
    Ok(())
}

/// List the methods the configured engine accepts
pub fn list_methods(config: &Config) -> Result<()> {
    let engine = config.engine();
    print!("{}", format_methods(engine.name(), engine.methods()));
    println!(
        "{}",
        format_info(&format!(
            "max iterations: {}",
            engine.max_iterations().to_string().cyan()
        ))
    );
    Ok(())
}
