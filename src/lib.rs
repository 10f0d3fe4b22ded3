//! # sentence-lookup
//!
//! Builds a word to sentence-id lookup table from a Tatoeba sentence export.
//!
//! ## Features
//!
//! - Concurrent pipeline: one reader, a pool of tokenizing workers, one index builder
//! - Japanese morphological analysis with Lindera, indexing dictionary forms
//! - Fail-fast error handling with line-level context
//! - JSON output written atomically

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::tokenizer::{Tokenizer, TokenizerFactory};
    pub use crate::config::{IdSource, PipelineConfig};
    pub use crate::corpus::{Line, Sentence, SentenceId};
    pub use crate::error::{LookupError, Result};
    pub use crate::index::InvertedIndex;
    pub use crate::pipeline::{LineSource, Pipeline, PipelineOutput, PipelineStats};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
