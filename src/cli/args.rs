//! Command line argument parsing for the sentence-lookup CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::lindera::{DEFAULT_DICTIONARY, IPADIC_LEMMA_FIELD, LinderaSettings};
use crate::config::{DEFAULT_LANGUAGE, IdSource, PipelineConfig};

/// Build a word to sentence-id lookup table from a Tatoeba sentence export
#[derive(Parser, Debug, Clone)]
#[command(name = "sentence-lookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LookupArgs {
    /// Use line numbers instead of sentence IDs
    #[arg(long = "line-id")]
    pub line_id: bool,

    /// Location of the Tatoeba sentence file
    #[arg(short = 'i', long = "input", default_value = "jpn_sentences.tsv")]
    pub input: PathBuf,

    /// Location of the output file
    #[arg(short = 'o', long = "output", default_value = "jpn_sentence_lookup.json")]
    pub output: PathBuf,

    /// Language tag of the sentences to index
    #[arg(short = 'l', long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Number of tokenizing workers (default: number of logical CPUs)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Capacity of the internal queues (0 = hand-off without buffering)
    #[arg(long, default_value = "0")]
    pub channel_capacity: usize,

    /// Sort the sentence ids of every word ascending
    #[arg(long)]
    pub sort_ids: bool,

    /// Tokenizer to use
    #[arg(short = 't', long, default_value = "lindera")]
    pub tokenizer: TokenizerKind,

    /// Lindera dictionary URI or path. The default `embedded://ipadic` is
    /// only available when built with the `embedded-ipadic` feature
    #[arg(long, env = "SENTENCE_LOOKUP_DICTIONARY", default_value = DEFAULT_DICTIONARY)]
    pub dictionary: String,

    /// Lindera user dictionary URI or path
    #[arg(long, env = "SENTENCE_LOOKUP_USER_DICTIONARY")]
    pub user_dictionary: Option<String>,

    /// Lindera segmentation mode
    #[arg(long, default_value = "normal")]
    pub mode: String,

    /// Column of the token details that holds the base form
    #[arg(long, default_value_t = IPADIC_LEMMA_FIELD)]
    pub lemma_field: usize,

    /// Pretty-print the JSON index
    #[arg(long)]
    pub pretty: bool,

    /// Summary format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl LookupArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the pipeline configuration described by these arguments.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new()
            .with_language(self.language.clone())
            .with_id_source(if self.line_id {
                IdSource::LineNumber
            } else {
                IdSource::Field
            })
            .with_channel_capacity(self.channel_capacity)
            .with_sort_ids(self.sort_ids);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }

    /// Lindera settings described by these arguments.
    pub fn lindera_settings(&self) -> LinderaSettings {
        LinderaSettings {
            mode: self.mode.clone(),
            dictionary: self.dictionary.clone(),
            user_dictionary: self.user_dictionary.clone(),
            lemma_field: self.lemma_field,
        }
    }
}

/// Available tokenizers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerKind {
    /// Lindera morphological analysis (Japanese)
    Lindera,
    /// Split on whitespace
    Whitespace,
}

/// Summary output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
