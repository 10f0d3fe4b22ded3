//! Command implementations for the sentence-lookup CLI.

use std::path::Path;
use std::time::Instant;

use log::info;

use crate::analysis::tokenizer::TokenizerFactory;
use crate::analysis::tokenizer::lindera::LinderaTokenizerFactory;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizerFactory;
use crate::cli::args::{LookupArgs, TokenizerKind};
use crate::cli::output::{BuildSummary, output_result};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::index::writer::write_index;
use crate::pipeline::{Pipeline, PipelineOutput};

/// Execute the CLI command.
pub fn execute_command(args: LookupArgs) -> Result<()> {
    let summary = build_lookup(&args)?;
    output_result(&summary, &args)
}

/// Build the lookup table and write it to the output path.
///
/// Nothing is written unless the whole input was indexed.
pub fn build_lookup(args: &LookupArgs) -> Result<BuildSummary> {
    let start = Instant::now();
    let config = args.pipeline_config();

    let output = match args.tokenizer {
        TokenizerKind::Lindera => run_pipeline(
            config,
            LinderaTokenizerFactory::new(args.lindera_settings()),
            &args.input,
        )?,
        TokenizerKind::Whitespace => {
            run_pipeline(config, WhitespaceTokenizerFactory, &args.input)?
        }
    };

    let written = write_index(&output.index, &args.output, args.pretty)?;
    info!(
        "wrote {} words to {}",
        output.index.len(),
        written.path.display()
    );

    Ok(BuildSummary {
        output_path: written.path.to_string_lossy().to_string(),
        keys: output.index.len(),
        size_bytes: written.bytes,
        duration_ms: start.elapsed().as_millis() as u64,
        lines_read: output.stats.lines_read,
        sentences_indexed: output.stats.sentences_indexed,
        lines_skipped: output.stats.lines_skipped,
        workers: output.stats.workers,
    })
}

fn run_pipeline<F: TokenizerFactory>(
    config: PipelineConfig,
    factory: F,
    input: &Path,
) -> Result<PipelineOutput> {
    Pipeline::new(config, factory)?.run_file(input)
}
