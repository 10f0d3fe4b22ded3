//! Whitespace tokenizer implementation.

use super::{Tokenizer, TokenizerFactory};

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Words are indexed as written; no lemma is reported.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Produces [`WhitespaceTokenizer`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizerFactory;

impl TokenizerFactory for WhitespaceTokenizerFactory {
    fn create(&self) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(WhitespaceTokenizer::new()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
