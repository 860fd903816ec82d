//! Output formatting utilities

use colored::*;
use serde::Serialize;

use ruvector_pagerank_bridge::audit::CallAuditEntry;
use ruvector_pagerank_bridge::validation::ValidatedCall;

/// Format error message
pub fn format_error(msg: &str) -> String {
    format!("{} {}", "Error:".red().bold(), msg)
}

/// Format success message
pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg)
}

/// Format info message
pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

/// Serialize to JSON, pretty or compact
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| anyhow::anyhow!("Failed to serialize to JSON: {}", e))
}

/// Format a score column as a vertex / score table
pub fn format_scores(scores: &[f64]) -> String {
    let mut output = format!(
        "\n{}\n  {:>8}  {}\n",
        "PageRank Scores".bold().green(),
        "Vertex".bold(),
        "Score".bold()
    );
    for (i, score) in scores.iter().enumerate() {
        output.push_str(&format!("  {:>8}  {}\n", i.to_string().cyan(), format!("{:.10}", score)));
    }
    output
}

/// Format the parsed arguments of a valid call
pub fn format_call_summary(call: &ValidatedCall<'_>) -> String {
    let distribution = |d: &[f64]| {
        if d.is_empty() {
            "absent".dimmed().to_string()
        } else {
            format!("{} entries", d.len()).cyan().to_string()
        }
    };
    format!(
        "  Vertices: {}\n  Edges: {}\n  Alpha: {}\n  Tolerance: {}\n  u: {}\n  v: {}\n  Method: {}\n",
        call.num_vs.to_string().cyan(),
        call.heads.len().to_string().cyan(),
        call.alpha.to_string().cyan(),
        format!("{:e}", call.tol).cyan(),
        distribution(call.u),
        distribution(call.v),
        call.method.cyan()
    )
}

/// Format an audit record
pub fn format_audit(entry: &CallAuditEntry) -> String {
    let hex = |bytes: &[u8; 8]| bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>();
    format!(
        "\n{}\n  Request: {}\n  Method: {}\n  Input hash: {}\n  Output hash: {}\n  Iterations: {} ({})\n  Residual: {:e}\n  Wall time: {} us\n",
        "Call Audit".bold().green(),
        entry.request_id.cyan(),
        entry.method.cyan(),
        hex(&entry.input_hash),
        hex(&entry.output_hash),
        entry.iterations.to_string().cyan(),
        if entry.converged {
            "converged".green()
        } else {
            "not converged".yellow()
        },
        entry.residual,
        entry.wall_time_us
    )
}

/// Format the method list of an engine
pub fn format_methods(engine: &str, methods: &[&str]) -> String {
    let mut output = format!("{} {}\n", "Engine:".bold(), engine.cyan());
    for method in methods {
        output.push_str(&format!("  {}\n", method.green()));
    }
    output
}
