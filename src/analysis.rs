//! Text analysis for sentence-lookup.
//!
//! This module provides the tokenization layer: the [`token::Token`] type and
//! the [`tokenizer::Tokenizer`] implementations that split a sentence into
//! normalized word forms.

pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use token::*;
pub use tokenizer::*;
