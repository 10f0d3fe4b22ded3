//! Output formatting for CLI commands.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::{LookupArgs, OutputFormat};
use crate::error::Result;

/// Result structure for a lookup table build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub output_path: String,
    pub keys: usize,
    pub size_bytes: u64,
    pub duration_ms: u64,
    pub lines_read: u64,
    pub sentences_indexed: u64,
    pub lines_skipped: u64,
    pub workers: usize,
}

/// Output a summary in the requested format.
pub fn output_result(summary: &BuildSummary, args: &LookupArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{}", format_human(summary, args.verbosity()));
            }
            Ok(())
        }
        OutputFormat::Json => output_json(summary, args),
    }
}

/// Render the summary the way it is printed in human mode.
pub fn format_human(summary: &BuildSummary, verbosity: u8) -> String {
    let elapsed = Duration::from_millis(summary.duration_ms);
    let mut lines = vec![
        format!("Done in {elapsed:?}"),
        format!("Keys: {}", summary.keys),
        format!(
            "Size: {} KB ({:.2} MB)",
            summary.size_bytes / 1024,
            summary.size_bytes as f64 / 1024.0 / 1024.0
        ),
    ];

    if verbosity > 1 {
        lines.push(format!("Output: {}", summary.output_path));
        lines.push(format!("Lines read: {}", summary.lines_read));
        lines.push(format!("Sentences indexed: {}", summary.sentences_indexed));
        lines.push(format!("Lines skipped: {}", summary.lines_skipped));
        lines.push(format!("Workers: {}", summary.workers));
    }

    lines.join("\n")
}

/// Output in JSON format.
fn output_json(summary: &BuildSummary, args: &LookupArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    println!("{json}");
    Ok(())
}
